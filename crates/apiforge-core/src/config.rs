//! Configuration management for apiforge.
//!
//! This module defines the `Config` struct: which generation provider to call,
//! which rule template to render, and where the credential lives. The
//! configuration can be loaded from a YAML file or created programmatically;
//! every field has a default so a partial file is valid.
//!
//! # Examples
//!
//! ```no_run
//! use apiforge_core::config::Config;
//! use apiforge_core::prompt::TargetLanguage;
//!
//! # #[tokio::main]
//! # async fn main() -> apiforge_core::Result<()> {
//! // Create a config programmatically
//! let mut config = Config::default();
//! config.target = TargetLanguage::TypeScript;
//!
//! // Or load one from a file
//! let config = Config::from_file("apiforge.yaml").await?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

use crate::llm::ProviderKind;
use crate::prompt::TargetLanguage;

/// Directory name used under the platform config directory
pub const APP_DIR: &str = "apiforge";

/// Configuration for prompt composition and code generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Generation service to call
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model name; the provider default is used when unset
    #[serde(default)]
    pub model: Option<String>,

    /// Override for the provider's API base URL
    #[serde(default)]
    pub base_url: Option<Url>,

    /// Language to generate
    #[serde(default)]
    pub target: TargetLanguage,

    /// Rule template file, required for the custom target
    #[serde(default)]
    pub template_path: Option<String>,

    /// Where the credential store lives
    #[serde(default)]
    pub credential_path: Option<String>,

    /// HTTP timeout for generation requests, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            base_url: None,
            target: TargetLanguage::default(),
            template_path: None,
            credential_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check field combinations that serde cannot express
    pub fn validate(&self) -> crate::Result<()> {
        if self.target == TargetLanguage::Custom && self.template_path.is_none() {
            return Err(crate::Error::config(
                "target 'custom' requires template_path to be set",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Default location of the config file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yaml"))
    }

    /// Resolved location of the credential store
    pub fn credential_path(&self) -> PathBuf {
        self.credential_path
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join("credentials.json")))
            .unwrap_or_else(|| PathBuf::from(".apiforge-credentials.json"))
    }
}

fn default_timeout_secs() -> u64 {
    120
}
