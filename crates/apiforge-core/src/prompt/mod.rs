//! Prompt construction for the external code generator.
//!
//! A [`PromptComposer`] renders a rule template (built-in per
//! [`TargetLanguage`] or loaded from a file) against a [`ParsedData`] record.
//! Rendering is deterministic: the same record and date always give the same
//! prompt.
//!
//! # Examples
//!
//! ```
//! use apiforge_core::extract::extract;
//! use apiforge_core::prompt::{PromptComposer, TargetLanguage};
//! use chrono::NaiveDate;
//!
//! let data = extract(r#"{"name":"Balance","method":"GET","url":"/api/wallet/balance"}"#).unwrap();
//! let composer = PromptComposer::new(TargetLanguage::Swift).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let prompt = composer.compose(&data, date).unwrap();
//! assert!(prompt.contains("/api/wallet/balance"));
//! assert!(prompt.contains("2024-05-01"));
//! ```

mod kind;
mod rules;

pub use kind::TargetLanguage;

use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tera::{Context, Tera};
use tokio::fs;

use crate::config::Config;
use crate::model::{Parameter, ParsedData, ResponseExample};
use crate::utils::{to_lower_camel_case, type_name_for};
use crate::{Error, Result};

/// Literal used in place of an absent raw example.
pub const PLACEHOLDER: &str = "(none)";

const TEMPLATE_NAME: &str = "prompt";

/// The first documented response with a 2xx status code.
pub fn first_success_response(data: &ParsedData) -> Option<&ResponseExample> {
    data.responses.iter().find(|r| r.is_success())
}

/// Body parameters of the first 2xx response, in their original order.
pub fn response_body_params(data: &ParsedData) -> Vec<Parameter> {
    first_success_response(data)
        .map(|response| {
            response
                .raw_parameter
                .iter()
                .filter(|p| p.key.starts_with("body."))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Variables handed to the rule template
#[derive(Debug, Serialize)]
struct PromptContext<'a> {
    name: &'a str,
    method: &'a str,
    url: &'a str,
    date: String,
    type_name: String,
    fn_name: String,
    request_params: String,
    response_params: String,
    request_raw: &'a str,
    response_raw: &'a str,
}

/// Renders prompts from a rule template
#[derive(Debug, Clone)]
pub struct PromptComposer {
    tera: Tera,
    target: TargetLanguage,
}

impl PromptComposer {
    /// Create a composer for a built-in target.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for [`TargetLanguage::Custom`], which needs
    /// a template file.
    pub fn new(target: TargetLanguage) -> Result<Self> {
        let template = target.builtin_template().ok_or_else(|| {
            Error::config("the custom target needs a template file (template_path)")
        })?;
        Self::with_template(target, template)
    }

    /// Create a composer from template text.
    pub fn from_template_str(template: &str) -> Result<Self> {
        Self::with_template(TargetLanguage::Custom, template)
    }

    /// Load a custom rule template from disk.
    pub async fn from_template_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::template(format!(
                "Failed to read prompt template {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_template_str(&content)
    }

    /// Create the composer selected by a configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        match (&config.target, &config.template_path) {
            (TargetLanguage::Custom, Some(path)) => Self::from_template_file(path).await,
            (target, _) => Self::new(*target),
        }
    }

    fn with_template(target: TargetLanguage, template: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self { tera, target })
    }

    /// The target this composer renders for
    pub fn target(&self) -> TargetLanguage {
        self.target
    }

    /// Render the prompt for `data` as of `date`.
    pub fn compose(&self, data: &ParsedData, date: NaiveDate) -> Result<String> {
        let success = first_success_response(data);
        let type_name = type_name_for(&data.url, &data.name);
        let context = PromptContext {
            name: &data.name,
            method: &data.method,
            url: &data.url,
            date: date.format("%Y-%m-%d").to_string(),
            fn_name: to_lower_camel_case(&type_name),
            type_name,
            request_params: serde_json::to_string_pretty(&data.request_params)?,
            response_params: serde_json::to_string_pretty(&response_body_params(data))?,
            request_raw: or_placeholder(&data.request_raw),
            response_raw: or_placeholder(success.map(|r| r.raw.as_str()).unwrap_or_default()),
        };

        let context = Context::from_serialize(&context)?;
        self.tera.render(TEMPLATE_NAME, &context).map_err(|e| {
            log::error!("prompt rendering failed: {e}");
            Error::from(e)
        })
    }

    /// Render the prompt using today's local date.
    pub fn compose_today(&self, data: &ParsedData) -> Result<String> {
        self.compose(data, Local::now().date_naive())
    }
}

fn or_placeholder(raw: &str) -> &str {
    if raw.trim().is_empty() {
        PLACEHOLDER
    } else {
        raw
    }
}
