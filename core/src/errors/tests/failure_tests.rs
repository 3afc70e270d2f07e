//! Tests for failure conversions and classification

use serde::Deserialize;
use validator::Validate;

use crate::errors::{
    DomainError, Failure, MessageError, ParseFailure, PayloadSource, StorageError, TokenError,
};

#[derive(Debug, Deserialize, Validate)]
struct Signup {
    #[validate(length(min = 2, message = "Name too short"))]
    name: String,
    #[validate(email(message = "Invalid email address"))]
    email: String,
    #[validate(range(min = 18))]
    age: u32,
}

#[test]
fn test_validator_errors_are_ordered_by_field() {
    let input = Signup {
        name: "A".to_string(),
        email: "bad".to_string(),
        age: 3,
    };
    let failure: Failure = input.validate().unwrap_err().into();

    let Failure::Validation(validation) = failure else {
        panic!("expected a validation failure");
    };
    let fields: Vec<_> = validation.issues().iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, vec!["age", "email", "name"]);

    // Messages fall back to the rule code when none is configured
    assert_eq!(validation.issues()[0].message, "range");
    assert_eq!(validation.issues()[1].message, "Invalid email address");
    assert_eq!(validation.issues()[2].code.as_deref(), Some("length"));
}

#[test]
fn test_kind_labels() {
    assert_eq!(Failure::from(DomainError::not_found("x")).kind(), "domain");
    assert_eq!(Failure::from(StorageError::cast("id", "zzz")).kind(), "storage_cast");
    assert_eq!(Failure::from(StorageError::duplicate("email")).kind(), "storage_duplicate");
    assert_eq!(
        Failure::from(ParseFailure::new(PayloadSource::Body, "eof")).kind(),
        "malformed_input"
    );
    assert_eq!(Failure::message("teapot", Some(418)).kind(), "message");
    assert_eq!(Failure::from(anyhow::anyhow!("secret")).kind(), "unknown");
}

#[test]
fn test_token_errors_become_unauthorized() {
    let failure: Failure = TokenError::TokenExpired.into();
    match failure {
        Failure::Domain(e) => {
            assert_eq!(e.status_code(), 401);
            assert_eq!(e.message(), "Unauthorized: Invalid or expired token");
        }
        other => panic!("unexpected failure: {:?}", other),
    }

    assert!(matches!(
        Failure::from(TokenError::TokenGenerationFailed),
        Failure::Unknown(_)
    ));
}

#[test]
fn test_message_stack_is_carried() {
    let failure = Failure::Message(
        MessageError::new("boom", None).with_stack(Some("at handler".to_string())),
    );
    assert_eq!(failure.stack().as_deref(), Some("at handler"));
    assert!(Failure::from(StorageError::duplicate("email")).stack().is_none());
}

#[test]
fn test_parse_failure_messages() {
    assert_eq!(PayloadSource::Body.message(), "Invalid JSON payload");
    assert_eq!(PayloadSource::Query.message(), "Invalid query string");
    assert_eq!(PayloadSource::Path.message(), "Invalid path parameters");
}
