//! Persistent storage for the generation-service credential.
//!
//! The store is a small JSON object of string keys to string values kept on
//! disk. The credential lives under [`CREDENTIAL_KEY`]; other keys are kept
//! untouched. Anything that depends on whether a credential exists can
//! [`subscribe`](CredentialStore::subscribe) to presence changes instead of
//! polling the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::watch;

use crate::{Error, Result};

/// Fixed key the credential is stored under
pub const CREDENTIAL_KEY: &str = "generative_api_key";

/// File-backed credential store with a presence channel
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    presence: watch::Sender<bool>,
}

impl CredentialStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                Error::config(format!(
                    "Failed to parse credential store {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        let (presence, _) = watch::channel(entries.contains_key(CREDENTIAL_KEY));
        Ok(Self {
            path,
            entries,
            presence,
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored credential, if any
    pub fn get(&self) -> Option<&str> {
        self.entries.get(CREDENTIAL_KEY).map(String::as_str)
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    /// Store a credential. Blank values are rejected and nothing is written.
    pub async fn set(&mut self, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::validation("API key must not be blank"));
        }
        self.entries
            .insert(CREDENTIAL_KEY.to_string(), value.to_string());
        self.persist().await?;
        self.presence.send_replace(true);
        log::info!("credential stored in {}", self.path.display());
        Ok(())
    }

    /// Remove the credential
    pub async fn clear(&mut self) -> Result<()> {
        if self.entries.remove(CREDENTIAL_KEY).is_some() {
            self.persist().await?;
        }
        self.presence.send_replace(false);
        Ok(())
    }

    /// Watch credential presence; the current value is available immediately.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.presence.subscribe()
    }

    async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content).await?;
        restrict_to_owner(&self.path).await
    }
}

/// Make the store readable by its owner only.
#[cfg(unix)]
async fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_is_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = CredentialStore::open(dir.path().join("none.json")).await?;
        assert_eq!(store.get(), None);
        assert!(!*store.subscribe().borrow());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_persists_and_reloads() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/credentials.json");

        let mut store = CredentialStore::open(&path).await?;
        store.set("  AIza-secret \n").await?;
        assert_eq!(store.get(), Some("AIza-secret"));

        let reopened = CredentialStore::open(&path).await?;
        assert_eq!(reopened.get(), Some("AIza-secret"));
        assert!(reopened.is_present());
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_store_file_is_owner_only() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let path = dir.path().join("credentials.json");
        let mut store = CredentialStore::open(&path).await?;
        store.set("secret").await?;

        let mode = tokio::fs::metadata(&path).await?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_value_is_rejected_and_not_written() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("credentials.json");
        let mut store = CredentialStore::open(&path).await?;

        let err = store.set("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!path.exists());
        assert_eq!(store.get(), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_keeps_other_keys() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("credentials.json");
        tokio::fs::write(&path, r#"{"generative_api_key": "k", "theme": "dark"}"#).await?;

        let mut store = CredentialStore::open(&path).await?;
        assert_eq!(store.get(), Some("k"));
        store.clear().await?;
        assert_eq!(store.get(), None);

        let content = tokio::fs::read_to_string(&path).await?;
        assert!(content.contains("theme"));
        assert!(!content.contains(CREDENTIAL_KEY));
        Ok(())
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() -> Result<()> {
        let dir = tempdir()?;
        let mut store = CredentialStore::open(dir.path().join("c.json")).await?;
        let mut rx = store.subscribe();
        assert!(!*rx.borrow_and_update());

        store.set("key").await?;
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        store.clear().await?;
        assert!(!*rx.borrow_and_update());
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_file_is_config_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("credentials.json");
        tokio::fs::write(&path, "not json").await?;
        let err = CredentialStore::open(&path).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        Ok(())
    }
}
