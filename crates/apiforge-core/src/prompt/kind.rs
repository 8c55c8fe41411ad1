//! Target languages for generated code.
//!
//! Each built-in target carries its own rule template. `Custom` means the rule
//! template is supplied by the user as a file.
//!
//! # Examples
//!
//! ```
//! use apiforge_core::prompt::TargetLanguage;
//! use std::str::FromStr;
//!
//! let target = TargetLanguage::from_str("swift").unwrap();
//! assert_eq!(target, TargetLanguage::Swift);
//! assert_eq!(target.as_str(), "swift");
//! assert_eq!(target.to_string(), "swift");
//!
//! // Swift is the default target
//! assert_eq!(TargetLanguage::default(), TargetLanguage::Swift);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rules;

/// Supported code-generation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// Swift `Codable` models and a request function
    #[default]
    Swift,
    /// TypeScript interfaces and a `fetch` wrapper
    TypeScript,
    /// User supplied rule template
    Custom,
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "swift" => Ok(Self::Swift),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// Returns the target identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swift => "swift",
            Self::TypeScript => "typescript",
            Self::Custom => "custom",
        }
    }

    /// The built-in rule template, if this target has one
    pub fn builtin_template(&self) -> Option<&'static str> {
        match self {
            Self::Swift => Some(rules::SWIFT),
            Self::TypeScript => Some(rules::TYPESCRIPT),
            Self::Custom => None,
        }
    }

    /// Returns an iterator over all targets
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Swift, Self::TypeScript, Self::Custom].into_iter()
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
