//! OpenAI-compatible chat completions provider.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value as JsonValue};

use super::{classify_status, GenerateError, Generator};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Generator for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, GenerateError> {
        log::debug!("sending chat completion request to model {}", self.model);
        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .bearer_auth(credential)
            .json(&json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ],
                "temperature": 0.2
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("chat completions error {status}: {body}");
            return Err(classify_status(status, &body));
        }

        let response_json: JsonValue = response.json().await?;
        match response_json["choices"][0]["message"]["content"].as_str() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(GenerateError::Unknown(
                "the model returned no text".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_reads_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "interface A {}"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(Client::new()).with_base_url(server.uri());
        assert_eq!(client.generate("p", "sk-test").await.unwrap(), "interface A {}");
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(Client::new()).with_base_url(server.uri());
        let err = client.generate("p", "nope").await.unwrap_err();
        assert_eq!(err, GenerateError::Auth("invalid api key".to_string()));
    }

    #[tokio::test]
    async fn test_missing_content_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(Client::new()).with_base_url(server.uri());
        let err = client.generate("p", "k").await.unwrap_err();
        assert!(matches!(err, GenerateError::Unknown(_)));
    }
}
