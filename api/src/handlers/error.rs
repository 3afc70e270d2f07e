//! Error normalization
//!
//! Every failure a request can produce is reduced to one [`Failure`] variant
//! and rendered here into the error envelope. The dispatch is a single
//! exhaustive `match`, so a new failure kind cannot be added without deciding
//! how it is rendered.

use std::collections::BTreeMap;

use actix_web::{
    http::{Method, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use chrono::Utc;
use serde_json::Value;

use dv_core::errors::{
    is_reserved_detail_key, DomainError, Failure, MessageError, ParseFailure, StorageError,
    TokenError, ValidationFailure,
};
use dv_shared::types::{ErrorEnvelope, ValidationIssue};

/// Client-facing message for failures whose text must not leak
pub const GENERIC_MESSAGE: &str = "Something went wrong!";

/// A failure translated into its HTTP form
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub status: u16,
    pub envelope: ErrorEnvelope,
    /// Failure kind label, logged alongside the envelope
    pub kind: &'static str,
}

impl Normalized {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope)
    }
}

/// Translate `failure` into a status code and envelope
///
/// Pure: the same failure always yields the same envelope. `stack` is only
/// filled in when `expose_stack` is set and the failure carries one.
pub fn normalize(failure: &Failure, expose_stack: bool) -> Normalized {
    let mut extra = BTreeMap::new();

    let (status, message, errors) = match failure {
        Failure::Domain(error) => {
            extra = whitelisted(&error.details().extra);
            (
                error.status_code(),
                error.message().to_string(),
                error.details().errors.clone(),
            )
        }
        Failure::Validation(error) => (400, String::from("Validation failed"), error.issues().to_vec()),
        Failure::Storage(StorageError::Cast { field, value }) => (
            400,
            format!("Invalid {}: {}", field, value),
            vec![ValidationIssue::new(field.clone(), "Invalid ID format")],
        ),
        Failure::Storage(StorageError::Duplicate { fields }) => duplicate_key(fields),
        Failure::Storage(StorageError::FieldValidation { errors }) => (
            400,
            String::from("Validation failed"),
            errors
                .iter()
                .map(|(field, message)| ValidationIssue::new(field.clone(), message.clone()))
                .collect(),
        ),
        Failure::Storage(StorageError::Backend(_)) => (500, GENERIC_MESSAGE.to_string(), Vec::new()),
        Failure::MalformedInput(error) => (400, error.segment.message().to_string(), Vec::new()),
        Failure::Message(error) => (
            error
                .status_code
                .filter(|code| (100..=599).contains(code))
                .unwrap_or(500),
            error.message.clone(),
            Vec::new(),
        ),
        Failure::Unknown(_) => (500, GENERIC_MESSAGE.to_string(), Vec::new()),
    };

    let stack = if expose_stack { failure.stack() } else { None };

    Normalized {
        status,
        envelope: ErrorEnvelope::new(status, message)
            .with_errors(errors)
            .with_stack(stack)
            .with_extra(extra),
        kind: failure.kind(),
    }
}

fn duplicate_key(fields: &[String]) -> (u16, String, Vec<ValidationIssue>) {
    if fields.is_empty() {
        return (
            409,
            String::from("Duplicate key error"),
            vec![ValidationIssue::new("unknown", "Duplicate field value entered")],
        );
    }

    let issues = fields
        .iter()
        .map(|field| ValidationIssue::new(field.clone(), format!("{} must be unique", field)))
        .collect();
    (
        409,
        format!("Duplicate value: {} must be unique", fields.join(", ")),
        issues,
    )
}

fn whitelisted(extra: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    extra
        .iter()
        .filter(|(key, _)| !is_reserved_detail_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Emit one structured log record for a normalized failure
///
/// 5xx failures log at error level, everything else at warn. `cause` is the
/// internal description of the failure and only ever reaches the log.
pub fn log_failure(
    normalized: &Normalized,
    method: &Method,
    path: &str,
    cause: &dyn std::fmt::Display,
) {
    let errors = normalized
        .envelope
        .errors
        .as_ref()
        .and_then(|issues| serde_json::to_string(issues).ok());
    let timestamp = Utc::now().to_rfc3339();

    if normalized.status >= 500 {
        tracing::error!(
            timestamp = %timestamp,
            status = normalized.status,
            method = %method,
            path = %path,
            error_message = %normalized.envelope.message,
            errors = ?errors,
            kind = normalized.kind,
            cause = %cause,
            "request failed"
        );
    } else {
        tracing::warn!(
            timestamp = %timestamp,
            status = normalized.status,
            method = %method,
            path = %path,
            error_message = %normalized.envelope.message,
            errors = ?errors,
            kind = normalized.kind,
            cause = %cause,
            "request rejected"
        );
    }
}

/// The error type returned by every handler and extractor
///
/// Wraps a [`Failure`] so it can be turned into an actix response. Rendering
/// here never exposes stacks; the [`ErrorNormalizer`](crate::middleware::ErrorNormalizer)
/// middleware re-renders with request context and the configured policy.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] Failure);

impl ApiError {
    pub fn failure(&self) -> &Failure {
        &self.0
    }

    pub fn into_failure(self) -> Failure {
        self.0
    }
}

macro_rules! api_error_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for ApiError {
                fn from(error: $source) -> Self {
                    ApiError(Failure::from(error))
                }
            }
        )*
    };
}

api_error_from!(
    DomainError,
    ValidationFailure,
    StorageError,
    ParseFailure,
    MessageError,
    TokenError,
    anyhow::Error,
);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        normalize(&self.0, false).status_code()
    }

    fn error_response(&self) -> HttpResponse {
        normalize(&self.0, false).into_response()
    }
}

/// Fallback for requests no route matched
pub async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.path());
    Err(DomainError::route_not_found(target).into())
}

/// Failure for an actix error raised outside our handlers
///
/// Client errors keep their status and text; server errors degrade to the
/// generic message.
pub fn foreign_failure(error: &actix_web::Error) -> Failure {
    let status = error.as_response_error().status_code();
    if status.is_server_error() {
        Failure::Unknown(anyhow::anyhow!("{}", error))
    } else {
        Failure::message(error.to_string(), Some(status.as_u16()))
    }
}

/// Normalize an actix error, unwrapping our own failures when present
pub fn normalize_error(error: &actix_web::Error, expose_stack: bool) -> Normalized {
    match error.as_error::<ApiError>() {
        Some(api_error) => normalize(api_error.failure(), expose_stack),
        None => normalize(&foreign_failure(error), expose_stack),
    }
}
