//! Wire envelopes shared by every response the server writes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Coarse classification of a failed response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Client-side failure (4xx)
    Fail,
    /// Server-side failure (5xx)
    Error,
}

impl ResponseStatus {
    /// `Error` iff the code is 500 or above
    pub fn from_code(code: u16) -> Self {
        if code >= 500 {
            ResponseStatus::Error
        } else {
            ResponseStatus::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Fail => "fail",
            ResponseStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field-level rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path into the payload, empty for the root
    pub field: String,
    pub message: String,
    /// Machine-readable rule identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Error-path envelope
///
/// Field order on the wire: `success, status, message, data, code, errors, stack`,
/// followed by any whitelisted extra details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub status: ResponseStatus,
    pub message: String,
    pub data: Value,
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationIssue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ErrorEnvelope {
    /// Build an envelope for `code`; the status is derived from it
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: ResponseStatus::from_code(code),
            message: message.into(),
            data: Value::Null,
            code,
            errors: None,
            stack: None,
            extra: BTreeMap::new(),
        }
    }

    /// Attach field-level issues; an empty list leaves `errors` absent
    pub fn with_errors(mut self, errors: Vec<ValidationIssue>) -> Self {
        self.errors = if errors.is_empty() { None } else { Some(errors) };
        self
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }

    pub fn with_extra(mut self, extra: BTreeMap<String, Value>) -> Self {
        self.extra = extra;
        self
    }
}

/// Success-path envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T = Value> {
    pub success: bool,
    pub message: String,
    pub code: u16,
    pub data: Option<T>,
}

impl<T> SuccessEnvelope<T> {
    /// Fill unset fields with `200`, `true`, `""` and `null`
    pub fn emit(
        code: Option<u16>,
        success: Option<bool>,
        message: Option<String>,
        data: Option<T>,
    ) -> Self {
        Self {
            success: success.unwrap_or(true),
            message: message.unwrap_or_default(),
            code: code.unwrap_or(200),
            data,
        }
    }

    /// 200 with a message and payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::emit(None, None, Some(message.into()), Some(data))
    }

    /// 201 with a message and payload
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::emit(Some(201), None, Some(message.into()), Some(data))
    }

    /// 200 with a message and no payload
    pub fn message(message: impl Into<String>) -> Self {
        Self::emit(None, None, Some(message.into()), None)
    }
}
