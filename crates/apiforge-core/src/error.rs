//! Error handling for the apiforge pipeline.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every user-facing failure of the
//! pipeline has its own variant so that callers can react to it (clear the
//! current record, erase a rejected credential, offer a retry) without string
//! matching. `Error::kind` collapses the variants into a `Copy` classification
//! that can be stored in UI state.
//!
//! # Examples
//!
//! ```
//! use apiforge_core::error::{Error, ErrorKind, Result};
//!
//! fn might_fail(text: &str) -> Result<()> {
//!     if text.trim().is_empty() {
//!         return Err(Error::EmptyInput);
//!     }
//!     Ok(())
//! }
//!
//! let err = might_fail("  ").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::EmptyInput);
//! ```

use std::fmt;

use thiserror::Error;

/// Result type for apiforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for apiforge operations
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint text was empty
    #[error("no endpoint JSON was provided")]
    EmptyInput,

    /// The endpoint text was not valid JSON
    #[error("endpoint JSON could not be parsed: {0}")]
    Parse(#[source] serde_json::Error),

    /// Generation was requested without a stored credential
    #[error("no API key is configured; run `apiforge key set` first")]
    MissingCredential,

    /// The generation service rejected the credential
    #[error("the API key was rejected by the generation service: {0}")]
    Auth(String),

    /// Any other generation failure
    #[error("code generation failed: {0}")]
    Generation(String),

    /// User supplied value was rejected
    #[error("invalid value: {0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], cheap to copy into UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    Parse,
    MissingCredential,
    Auth,
    Generation,
    Validation,
    Internal,
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        Self::Generation(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::Parse(_) => ErrorKind::Parse,
            Self::MissingCredential => ErrorKind::MissingCredential,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Generation(_) => ErrorKind::Generation,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Io(_)
            | Self::Json(_)
            | Self::Yaml(_)
            | Self::Tera(_)
            | Self::Template(_)
            | Self::Config(_) => ErrorKind::Internal,
        }
    }

    /// Whether the user may simply try the same action again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}

impl ErrorKind {
    /// Returns the kind identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::Parse => "parse",
            Self::MissingCredential => "missing_credential",
            Self::Auth => "auth",
            Self::Generation => "generation",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
