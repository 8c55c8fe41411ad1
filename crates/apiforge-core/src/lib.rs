//! apiforge Core Library
//!
//! This library turns the JSON export of a single HTTP endpoint into editable
//! metadata, composes a code-generation prompt from it, and runs that prompt
//! against a generative-language service.

pub mod config;
pub mod credential;
pub mod edit;
pub mod error;
pub mod extract;
pub mod fence;
pub mod invoker;
mod lenient;
pub mod llm;
pub mod model;
pub mod prompt;
pub mod state;
pub mod utils;
pub mod workbench;

pub use crate::{
    config::Config,
    credential::CredentialStore,
    edit::{DataField, ParamEdit},
    error::{Error, ErrorKind, Result},
    extract::extract,
    fence::strip_code_fence,
    invoker::GenerationInvoker,
    llm::{generator_from_config, GenerateError, Generator, ProviderKind},
    model::{Expect, Parameter, ParsedData, ResponseExample},
    prompt::{first_success_response, response_body_params, PromptComposer, TargetLanguage},
    state::{reduce, AppState, Event, Notice, Page},
    workbench::Workbench,
};
