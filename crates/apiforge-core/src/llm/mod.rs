//! Generation providers.
//!
//! The external text generator is modelled as the object-safe [`Generator`]
//! trait so the invoker can be driven by a real HTTP provider or by a test
//! double. Providers only distinguish the failures the caller reacts to: a
//! rejected credential, a transport problem, and everything else.

mod gemini;
mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// Failure reported by a generation provider
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The credential was rejected
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The service could not be reached
    #[error("network error: {0}")]
    Network(String),

    /// Any other failure, including malformed responses
    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL may carry credentials
        let err = err.without_url();
        if err.is_decode() {
            GenerateError::Unknown(format!("unexpected response body: {err}"))
        } else if err.is_timeout() {
            GenerateError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            GenerateError::Network(format!("connection failed: {err}"))
        } else {
            GenerateError::Network(err.to_string())
        }
    }
}

/// A text-generation capability: prompt and credential in, text out.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Provider identifier used in logs
    fn name(&self) -> &'static str;

    /// Generate text for `prompt`, authenticating with `credential`.
    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, GenerateError>;
}

/// Supported generation providers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Generative Language API
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat completions API
    #[value(name = "openai")]
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the provider selected by `config`.
pub fn generator_from_config(config: &Config) -> crate::Result<Arc<dyn Generator>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| crate::Error::config(format!("Failed to build HTTP client: {e}")))?;

    let generator: Arc<dyn Generator> = match config.provider {
        ProviderKind::Gemini => {
            let mut provider = GeminiClient::new(client);
            if let Some(model) = &config.model {
                provider = provider.with_model(model);
            }
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url.as_str());
            }
            Arc::new(provider)
        }
        ProviderKind::OpenAi => {
            let mut provider = OpenAiClient::new(client);
            if let Some(model) = &config.model {
                provider = provider.with_model(model);
            }
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url.as_str());
            }
            Arc::new(provider)
        }
    };
    Ok(generator)
}

/// Map a non-success HTTP status to a provider failure.
fn classify_status(status: StatusCode, body: &str) -> GenerateError {
    match status.as_u16() {
        401 | 403 => GenerateError::Auth(body.to_string()),
        400 if body.contains("API_KEY_INVALID") || body.contains("API key not valid") => {
            GenerateError::Auth(body.to_string())
        }
        _ => GenerateError::Unknown(format!("API error {status}: {body}")),
    }
}
