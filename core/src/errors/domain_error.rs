//! Deliberately raised, expected failures carrying their own HTTP classification

use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::BTreeMap;

use dv_shared::types::{ResponseStatus, ValidationIssue};
use serde_json::Value;
use thiserror::Error;

/// Envelope keys a detail entry may never shadow
pub const RESERVED_DETAIL_KEYS: [&str; 7] =
    ["success", "status", "message", "code", "data", "stack", "errors"];

/// Whether `key` names a field the envelope already owns
pub fn is_reserved_detail_key(key: &str) -> bool {
    RESERVED_DETAIL_KEYS.contains(&key)
}

/// Structured extras merged into the error envelope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorDetails {
    /// Field-level issues, rendered as `errors`
    pub errors: Vec<ValidationIssue>,
    /// Additional top-level entries, never a reserved key
    pub extra: BTreeMap<String, Value>,
}

impl ErrorDetails {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.extra.is_empty()
    }
}

/// An operational failure raised by business logic
///
/// Immutable once built: the builder methods consume `self`, and the fields
/// are only reachable through accessors.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DomainError {
    message: String,
    status_code: u16,
    details: ErrorDetails,
    stack: Option<String>,
}

impl DomainError {
    /// Build an error; codes outside `100..=599` resolve to 500
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        let status_code = if (100..=599).contains(&status_code) {
            status_code
        } else {
            500
        };

        Self {
            message: message.into(),
            status_code,
            details: ErrorDetails::default(),
            stack: capture_stack(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, 400)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, 401)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message, 403)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, 404)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, 409)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(message, 429)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, 500)
    }

    /// 404 naming a path no route matched
    pub fn route_not_found(path: &str) -> Self {
        Self::not_found(format!("Cannot find {} on this server", path))
    }

    /// Attach field-level issues
    pub fn with_errors(mut self, errors: Vec<ValidationIssue>) -> Self {
        self.details.errors = errors;
        self
    }

    /// Attach one extra envelope entry
    ///
    /// Reserved keys are refused and the error is returned unchanged.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if is_reserved_detail_key(&key) {
            tracing::warn!(key = %key, "refusing reserved envelope key as error detail");
            return self;
        }
        self.details.extra.insert(key, value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// `error` for 5xx, `fail` otherwise
    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::from_code(self.status_code)
    }

    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Always true: a `DomainError` is an anticipated failure
    pub fn is_operational(&self) -> bool {
        true
    }
}

/// Render a backtrace when the process has them enabled
pub(crate) fn capture_stack() -> Option<String> {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}
