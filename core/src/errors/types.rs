//! Failure kinds produced at the boundaries with storage, transport and validation

use std::collections::BTreeMap;

use dv_shared::types::ValidationIssue;
use thiserror::Error;

/// Failures reported by the persistence layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// A value could not be cast to the stored type (e.g. a malformed id)
    #[error("cast to {field} failed for value \"{value}\"")]
    Cast { field: String, value: String },

    /// A uniqueness constraint rejected the write; fields in the order the store reports them
    #[error("duplicate key on {fields:?}")]
    Duplicate { fields: Vec<String> },

    /// The store's own schema rejected one or more fields
    #[error("{} field(s) failed storage validation", .errors.len())]
    FieldValidation { errors: BTreeMap<String, String> },

    /// Anything else the backend raised
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn cast(field: impl Into<String>, value: impl Into<String>) -> Self {
        StorageError::Cast {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>) -> Self {
        StorageError::Duplicate {
            fields: vec![field.into()],
        }
    }
}

/// Input shape violations collected by schema validation
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Validation failed")]
pub struct ValidationFailure {
    issues: Vec<ValidationIssue>,
}

impl ValidationFailure {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>, code: &str) -> Self {
        Self::new(vec![ValidationIssue::new(field, message).with_code(code)])
    }

    /// Issues in evaluation order
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

impl From<validator::ValidationErrors> for ValidationFailure {
    /// Field errors come out of a hash map, so they are ordered by field name
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let issues = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    ValidationIssue::new(field.to_string(), message).with_code(e.code.to_string())
                })
            })
            .collect();

        Self::new(issues)
    }
}

/// Which part of the request failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Body,
    Query,
    Path,
}

/// The transport could not decode a request segment
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}: {reason}", .segment.message())]
pub struct ParseFailure {
    pub segment: PayloadSource,
    /// Decoder text; logged, never sent to the client
    pub reason: String,
}

impl PayloadSource {
    /// Client-facing message for a decode failure of this segment
    pub fn message(&self) -> &'static str {
        match self {
            PayloadSource::Body => "Invalid JSON payload",
            PayloadSource::Query => "Invalid query string",
            PayloadSource::Path => "Invalid path parameters",
        }
    }
}

impl ParseFailure {
    pub fn new(segment: PayloadSource, reason: impl Into<String>) -> Self {
        Self {
            segment,
            reason: reason.into(),
        }
    }
}

/// A failure that only offers a human-readable message and maybe a status
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct MessageError {
    pub message: String,
    pub status_code: Option<u16>,
    pub stack: Option<String>,
}

impl MessageError {
    pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status_code,
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
