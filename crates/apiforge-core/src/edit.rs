//! Copy-on-write edits of a [`ParsedData`] record.
//!
//! Each edit borrows the current record and returns a new one; the original is
//! left untouched. Edits address parameters by id and change exactly one entry.

use std::fmt;
use std::str::FromStr;

use crate::lenient::parse_flag;
use crate::model::{Parameter, ParsedData};
use crate::Error;

/// Editable top-level fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataField {
    Name,
    Method,
    Url,
    RequestRaw,
}

/// A change to a single parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamEdit {
    Description(String),
    FieldType(String),
    Key(String),
    Value(String),
    IsChecked(i64),
    NotNull(i64),
}

impl ParamEdit {
    /// Build an edit from a field name and its textual value.
    pub fn parse(field: &str, value: &str) -> crate::Result<Self> {
        let flag = |name: &str| {
            parse_flag(value).ok_or_else(|| {
                Error::validation(format!("{name} expects 0 or 1, got '{value}'"))
            })
        };
        match field.trim() {
            "description" => Ok(Self::Description(value.to_string())),
            "field_type" | "type" => Ok(Self::FieldType(value.to_string())),
            "key" => Ok(Self::Key(value.to_string())),
            "value" => Ok(Self::Value(value.to_string())),
            "is_checked" => Ok(Self::IsChecked(flag("is_checked")?)),
            "not_null" => Ok(Self::NotNull(flag("not_null")?)),
            other => Err(Error::validation(format!(
                "unknown parameter field '{other}'"
            ))),
        }
    }

    fn apply(&self, param: &mut Parameter) {
        match self {
            Self::Description(v) => param.description = v.clone(),
            Self::FieldType(v) => param.field_type = v.clone(),
            Self::Key(v) => param.key = v.clone(),
            Self::Value(v) => param.value = v.clone(),
            Self::IsChecked(v) => param.is_checked = *v,
            Self::NotNull(v) => param.not_null = *v,
        }
    }
}

impl DataField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Method => "method",
            Self::Url => "url",
            Self::RequestRaw => "request_raw",
        }
    }
}

impl FromStr for DataField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "method" => Ok(Self::Method),
            "url" => Ok(Self::Url),
            "request_raw" | "raw" => Ok(Self::RequestRaw),
            other => Err(Error::validation(format!("unknown field '{other}'"))),
        }
    }
}

impl fmt::Display for DataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ParsedData {
    /// Return a copy with one top-level field replaced.
    ///
    /// Values are stored as given: an edited URL is not re-sanitized and an
    /// edited method keeps its case.
    pub fn with_field(&self, field: DataField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            DataField::Name => next.name = value,
            DataField::Method => next.method = value,
            DataField::Url => next.url = value,
            DataField::RequestRaw => next.request_raw = value,
        }
        next
    }

    /// Return a copy with one request parameter edited.
    pub fn with_request_param(&self, param_id: &str, edit: &ParamEdit) -> Self {
        let mut next = self.clone();
        if !edit_in(&mut next.request_params, param_id, edit) {
            log::debug!("no request parameter with id {param_id}");
        }
        next
    }

    /// Return a copy with one parameter of one response example edited.
    pub fn with_response_param(&self, example_id: &str, param_id: &str, edit: &ParamEdit) -> Self {
        let mut next = self.clone();
        let edited = next
            .responses
            .iter_mut()
            .find(|r| r.example_id == example_id)
            .map(|r| edit_in(&mut r.raw_parameter, param_id, edit))
            .unwrap_or(false);
        if !edited {
            log::debug!("no parameter {param_id} in response example {example_id}");
        }
        next
    }
}

fn edit_in(params: &mut [Parameter], param_id: &str, edit: &ParamEdit) -> bool {
    match params.iter_mut().find(|p| p.param_id == param_id) {
        Some(param) => {
            edit.apply(param);
            true
        }
        None => false,
    }
}
