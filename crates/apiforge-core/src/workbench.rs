//! Async driver that ties the reducer to the credential store and invoker.

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::credential::CredentialStore;
use crate::invoker::GenerationInvoker;
use crate::state::{reduce, AppState, Event, Notice};
use crate::Error;

/// Owns the current state and performs the side effects the reducer asks for.
///
/// `generate` takes `&mut self`, so a workbench never has more than one
/// generation in flight.
pub struct Workbench {
    state: AppState,
    invoker: GenerationInvoker,
    credentials: CredentialStore,
}

impl Workbench {
    pub fn new(invoker: GenerationInvoker, credentials: CredentialStore) -> Self {
        Self {
            state: AppState::new(credentials.is_present()),
            invoker,
            credentials,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Credential presence feed for views that depend on it
    pub fn credential_presence(&self) -> watch::Receiver<bool> {
        self.credentials.subscribe()
    }

    /// Apply an event and return the resulting state
    pub fn dispatch(&mut self, event: Event) -> &AppState {
        self.state = reduce(&self.state, event);
        &self.state
    }

    /// Store a new credential and tell the state about it
    pub async fn set_credential(&mut self, value: &str) -> crate::Result<()> {
        self.credentials.set(value).await?;
        self.dispatch(Event::CredentialChanged(true));
        Ok(())
    }

    /// Run one generation for the current record as of `date`.
    ///
    /// Does nothing unless the reducer accepts the request. A rejected
    /// credential is erased from the store before the failure is recorded.
    pub async fn generate(&mut self, date: NaiveDate) -> &AppState {
        self.dispatch(Event::GenerationRequested);
        if !self.state.generating {
            return &self.state;
        }
        let Some(data) = self.state.parsed.clone() else {
            return &self.state;
        };

        let result = self
            .invoker
            .invoke(&data, self.credentials.get(), date)
            .await;

        match result {
            Ok(code) => self.dispatch(Event::GenerationSucceeded(code)),
            Err(err) => {
                if let Error::Auth(_) = err {
                    if let Err(clear_err) = self.credentials.clear().await {
                        log::error!("failed to erase rejected credential: {clear_err}");
                    }
                    self.dispatch(Event::CredentialChanged(false));
                }
                self.dispatch(Event::GenerationFailed(Notice::from(&err)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::tests::ScriptedGenerator;
    use crate::llm::GenerateError;
    use crate::prompt::{PromptComposer, TargetLanguage};
    use crate::ErrorKind;
    use tempfile::tempdir;

    const INPUT: &str = r#"{"name":"Balance","method":"GET","url":"https://h/api/wallet/balance?x=1",
        "response":{"example":[{"example_id":"ok","raw":"{}","expect":{"code":"200","name":"OK"},
        "raw_parameter":[{"param_id":"1","key":"body.amount","field_type":"number"}]}]}}"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    async fn workbench(
        reply: Result<String, GenerateError>,
        dir: &std::path::Path,
    ) -> (Workbench, std::sync::Arc<ScriptedGenerator>) {
        let generator = ScriptedGenerator::new(reply);
        let invoker = GenerationInvoker::new(
            PromptComposer::new(TargetLanguage::Swift).unwrap(),
            generator.clone(),
        );
        let store = CredentialStore::open(dir.join("credentials.json"))
            .await
            .unwrap();
        let mut bench = Workbench::new(invoker, store);
        bench.dispatch(Event::InputChanged(INPUT.to_string()));
        bench.dispatch(Event::ParseRequested);
        (bench, generator)
    }

    #[tokio::test]
    async fn test_generate_writes_output() {
        let dir = tempdir().unwrap();
        let (mut bench, generator) =
            workbench(Ok("```swift\nstruct WalletBalanceResponse {}\n```".into()), dir.path()).await;
        bench.set_credential("key").await.unwrap();

        let state = bench.generate(date()).await;
        assert_eq!(state.output.as_deref(), Some("struct WalletBalanceResponse {}"));
        assert!(!state.generating);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_without_credential_does_not_call() {
        let dir = tempdir().unwrap();
        let (mut bench, generator) = workbench(Ok("x".into()), dir.path()).await;

        let state = bench.generate(date()).await;
        assert_eq!(state.notice.as_ref().unwrap().kind, ErrorKind::MissingCredential);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_credential_is_erased() {
        let dir = tempdir().unwrap();
        let (mut bench, _) =
            workbench(Err(GenerateError::Auth("API_KEY_INVALID".into())), dir.path()).await;
        bench.set_credential("stale").await.unwrap();
        let presence = bench.credential_presence();
        assert!(*presence.borrow());

        let state = bench.generate(date()).await.clone();
        assert_eq!(state.notice.unwrap().kind, ErrorKind::Auth);
        assert!(!state.has_credential);
        assert_eq!(bench.credentials().get(), None);
        assert!(!*presence.borrow());

        let reopened = CredentialStore::open(dir.path().join("credentials.json"))
            .await
            .unwrap();
        assert_eq!(reopened.get(), None);
    }

    #[tokio::test]
    async fn test_generation_failure_keeps_credential() {
        let dir = tempdir().unwrap();
        let (mut bench, _) =
            workbench(Err(GenerateError::Network("reset".into())), dir.path()).await;
        bench.set_credential("key").await.unwrap();

        let state = bench.generate(date()).await;
        assert_eq!(state.notice.as_ref().unwrap().kind, ErrorKind::Generation);
        assert!(state.can_generate());
        assert_eq!(bench.credentials().get(), Some("key"));
    }
}
