//! Front-end state as immutable snapshots and a pure reducer.
//!
//! Every user action is an [`Event`]; [`reduce`] maps the current
//! [`AppState`] and an event to the next state without side effects. Async
//! work (the generation call) happens outside and reports back through
//! `GenerationSucceeded` / `GenerationFailed`.

use crate::edit::{DataField, ParamEdit};
use crate::error::{Error, ErrorKind};
use crate::extract::extract;
use crate::model::ParsedData;

/// Logical pages of the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Credential chip and tool entry
    #[default]
    Landing,
    /// Extraction, editing and generation
    Composer,
}

/// An inline message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub page: Page,
    pub input: String,
    pub parsed: Option<ParsedData>,
    pub notice: Option<Notice>,
    pub generating: bool,
    pub output: Option<String>,
    pub has_credential: bool,
}

impl AppState {
    /// Initial state given whether a credential is already stored
    pub fn new(has_credential: bool) -> Self {
        Self {
            has_credential,
            ..Default::default()
        }
    }

    /// Whether the generate action should be enabled
    pub fn can_generate(&self) -> bool {
        self.parsed.is_some() && self.has_credential && !self.generating
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Navigate(Page),
    InputChanged(String),
    ParseRequested,
    DataEdited(DataField, String),
    RequestParamEdited {
        param_id: String,
        edit: ParamEdit,
    },
    ResponseParamEdited {
        example_id: String,
        param_id: String,
        edit: ParamEdit,
    },
    CredentialChanged(bool),
    GenerationRequested,
    GenerationSucceeded(String),
    GenerationFailed(Notice),
}

/// Compute the state that follows `event`.
pub fn reduce(state: &AppState, event: Event) -> AppState {
    let mut next = state.clone();
    match event {
        Event::Navigate(page) => next.page = page,
        Event::InputChanged(text) => next.input = text,
        Event::ParseRequested => match extract(&state.input) {
            Ok(data) => {
                next.parsed = Some(data);
                next.notice = None;
                next.output = None;
            }
            Err(err) => {
                next.parsed = None;
                next.notice = Some(Notice::from(&err));
            }
        },
        Event::DataEdited(field, value) => {
            next.parsed = state.parsed.as_ref().map(|d| d.with_field(field, value));
        }
        Event::RequestParamEdited { param_id, edit } => {
            next.parsed = state
                .parsed
                .as_ref()
                .map(|d| d.with_request_param(&param_id, &edit));
        }
        Event::ResponseParamEdited {
            example_id,
            param_id,
            edit,
        } => {
            next.parsed = state
                .parsed
                .as_ref()
                .map(|d| d.with_response_param(&example_id, &param_id, &edit));
        }
        Event::CredentialChanged(present) => next.has_credential = present,
        Event::GenerationRequested => {
            if state.generating || state.parsed.is_none() {
                return next;
            }
            if state.has_credential {
                next.generating = true;
                next.notice = None;
            } else {
                next.notice = Some(Notice::from(&Error::MissingCredential));
            }
        }
        Event::GenerationSucceeded(code) => {
            next.generating = false;
            next.output = Some(code);
        }
        Event::GenerationFailed(notice) => {
            next.generating = false;
            if notice.kind == ErrorKind::Auth {
                next.has_credential = false;
            }
            next.notice = Some(notice);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"name":"Ping","method":"POST","url":"api/ping",
        "request":{"body":{"raw_parameter":[{"param_id":"p","key":"id"}]}}}"#;

    fn parsed_state() -> AppState {
        let state = reduce(&AppState::new(true), Event::InputChanged(VALID.to_string()));
        reduce(&state, Event::ParseRequested)
    }

    #[test]
    fn test_navigation_changes_only_page() {
        let state = parsed_state();
        let next = reduce(&state, Event::Navigate(Page::Composer));
        assert_eq!(next.page, Page::Composer);
        assert_eq!(next.parsed, state.parsed);
        assert_eq!(next.input, state.input);
    }

    #[test]
    fn test_parse_success() {
        let state = parsed_state();
        let data = state.parsed.as_ref().unwrap();
        assert_eq!(data.url, "/api/ping");
        assert_eq!(state.notice, None);
        assert!(state.can_generate());
    }

    #[test]
    fn test_failed_parse_clears_record() {
        let state = parsed_state();
        let state = reduce(&state, Event::InputChanged("{oops".into()));
        let state = reduce(&state, Event::ParseRequested);
        assert_eq!(state.parsed, None);
        assert_eq!(state.notice.as_ref().unwrap().kind, ErrorKind::Parse);

        let state = reduce(&state, Event::InputChanged(String::new()));
        let state = reduce(&state, Event::ParseRequested);
        assert_eq!(state.notice.unwrap().kind, ErrorKind::EmptyInput);
    }

    #[test]
    fn test_edits_do_not_touch_previous_state() {
        let before = parsed_state();
        let after = reduce(
            &before,
            Event::RequestParamEdited {
                param_id: "p".into(),
                edit: ParamEdit::Key("user.id".into()),
            },
        );
        assert_eq!(before.parsed.as_ref().unwrap().request_params[0].key, "id");
        assert_eq!(after.parsed.as_ref().unwrap().request_params[0].key, "user.id");

        let renamed = reduce(&after, Event::DataEdited(DataField::Name, "Pong".into()));
        assert_eq!(renamed.parsed.unwrap().name, "Pong");
    }

    #[test]
    fn test_edit_without_record_is_noop() {
        let state = AppState::default();
        let next = reduce(&state, Event::DataEdited(DataField::Url, "/x".into()));
        assert_eq!(next, state);
    }

    #[test]
    fn test_generation_lifecycle() {
        let state = reduce(&parsed_state(), Event::GenerationRequested);
        assert!(state.generating);
        assert!(!state.can_generate());

        // A second request while one is in flight changes nothing
        assert_eq!(reduce(&state, Event::GenerationRequested), state);

        let done = reduce(&state, Event::GenerationSucceeded("struct A {}".into()));
        assert!(!done.generating);
        assert_eq!(done.output.as_deref(), Some("struct A {}"));
    }

    #[test]
    fn test_generation_without_credential() {
        let state = reduce(&parsed_state(), Event::CredentialChanged(false));
        let next = reduce(&state, Event::GenerationRequested);
        assert!(!next.generating);
        assert_eq!(next.notice.unwrap().kind, ErrorKind::MissingCredential);
    }

    #[test]
    fn test_auth_failure_drops_credential() {
        let state = reduce(&parsed_state(), Event::GenerationRequested);
        let failed = reduce(
            &state,
            Event::GenerationFailed(Notice::new(ErrorKind::Auth, "rejected")),
        );
        assert!(!failed.generating);
        assert!(!failed.has_credential);

        let state = reduce(&parsed_state(), Event::GenerationRequested);
        let failed = reduce(
            &state,
            Event::GenerationFailed(Notice::new(ErrorKind::Generation, "timeout")),
        );
        assert!(failed.has_credential);
        assert!(failed.can_generate());
    }

    #[test]
    fn test_result_lands_even_after_reparse() {
        let state = reduce(&parsed_state(), Event::GenerationRequested);
        let state = reduce(&state, Event::ParseRequested);
        let state = reduce(&state, Event::GenerationSucceeded("late".into()));
        assert_eq!(state.output.as_deref(), Some("late"));
    }
}
