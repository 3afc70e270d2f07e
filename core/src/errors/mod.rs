//! Domain-specific error types and the closed failure taxonomy.
//!
//! Every failure a handler can produce is reduced to one [`Failure`] variant at
//! the boundary where it is raised, so the HTTP layer can pattern-match over a
//! closed set instead of probing arbitrary error values.

mod domain_error;
mod types;

#[cfg(test)]
mod tests;

use std::backtrace::BacktraceStatus;

use thiserror::Error;

pub use domain_error::{is_reserved_detail_key, DomainError, ErrorDetails, RESERVED_DETAIL_KEYS};
pub use types::{
    MessageError, ParseFailure, PayloadSource, StorageError, TokenError, ValidationFailure,
};

/// Every failure the request pipeline knows how to translate
///
/// Variants are listed in dispatch priority order.
#[derive(Error, Debug)]
pub enum Failure {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    MalformedInput(#[from] ParseFailure),

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl Failure {
    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::Domain(_) => "domain",
            Failure::Validation(_) => "validation",
            Failure::Storage(StorageError::Cast { .. }) => "storage_cast",
            Failure::Storage(StorageError::Duplicate { .. }) => "storage_duplicate",
            Failure::Storage(StorageError::FieldValidation { .. }) => "storage_validation",
            Failure::Storage(StorageError::Backend(_)) => "storage_backend",
            Failure::MalformedInput(_) => "malformed_input",
            Failure::Message(_) => "message",
            Failure::Unknown(_) => "unknown",
        }
    }

    /// Stack information carried by the failure, if any
    pub fn stack(&self) -> Option<String> {
        match self {
            Failure::Domain(e) => e.stack().map(str::to_owned),
            Failure::Message(e) => e.stack.clone(),
            Failure::Unknown(e) => {
                let backtrace = e.backtrace();
                match backtrace.status() {
                    BacktraceStatus::Captured => Some(backtrace.to_string()),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// A message-only failure with an optional status
    pub fn message(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Failure::Message(MessageError::new(message, status_code))
    }
}

impl From<validator::ValidationErrors> for Failure {
    fn from(errors: validator::ValidationErrors) -> Self {
        Failure::Validation(errors.into())
    }
}

impl From<TokenError> for Failure {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::TokenGenerationFailed => Failure::Unknown(anyhow::Error::new(error)),
            _ => DomainError::unauthorized("Unauthorized: Invalid or expired token").into(),
        }
    }
}

pub type DomainResult<T> = Result<T, Failure>;
