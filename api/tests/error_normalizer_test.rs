//! Properties of the error normalizer, independent of HTTP plumbing

use std::collections::BTreeMap;

use serde_json::json;

use dv_api::handlers::error::{normalize, GENERIC_MESSAGE};
use dv_core::errors::{
    DomainError, Failure, MessageError, ParseFailure, PayloadSource, StorageError,
    ValidationFailure,
};
use dv_core::validation::{validate, ObjectSchema, Rule};
use dv_shared::types::{ResponseStatus, ValidationIssue};

#[test]
fn test_status_class_follows_code() {
    for code in 400..=599u16 {
        let normalized = normalize(&DomainError::new("boom", code).into(), false);
        let expected = if code >= 500 {
            ResponseStatus::Error
        } else {
            ResponseStatus::Fail
        };
        assert_eq!(normalized.envelope.status, expected, "code {}", code);
        assert_eq!(normalized.envelope.code, code);
        assert_eq!(normalized.status, code);
    }
}

#[test]
fn test_domain_error_is_rendered_verbatim() {
    let cases = [
        ("User already exists with this email", 409),
        ("Unauthorized: No token provided", 401),
        ("Internal failure we chose to expose", 503),
    ];
    for (message, code) in cases {
        let normalized = normalize(&DomainError::new(message, code).into(), false);
        assert_eq!(normalized.envelope.message, message);
        assert_eq!(normalized.envelope.code, code);
        assert!(!normalized.envelope.success);
        assert_eq!(normalized.kind, "domain");
    }
}

#[test]
fn test_domain_details_are_merged_without_reserved_keys() {
    let error = DomainError::too_many_requests("Slow down")
        .with_detail("retryAfter", 60)
        .with_detail("code", 200)
        .with_errors(vec![ValidationIssue::new("email", "taken")]);

    let json = serde_json::to_value(normalize(&error.into(), false).envelope).unwrap();
    assert_eq!(json["retryAfter"], 60);
    assert_eq!(json["code"], 429);
    assert_eq!(json["errors"], json!([{ "field": "email", "message": "taken" }]));
}

#[test]
fn test_validation_issues_keep_count_and_order() {
    let issues: Vec<_> = ["zeta", "alpha", "mid", "alpha"]
        .iter()
        .enumerate()
        .map(|(i, field)| ValidationIssue::new(*field, format!("issue {}", i)))
        .collect();

    let normalized = normalize(&ValidationFailure::new(issues.clone()).into(), false);
    assert_eq!(normalized.status, 400);
    assert_eq!(normalized.envelope.message, "Validation failed");
    assert_eq!(normalized.envelope.errors.as_deref(), Some(issues.as_slice()));
}

#[test]
fn test_three_field_signup_scenario() {
    let schema = ObjectSchema::new()
        .field("name", Rule::string().min(2, "Name too short"))
        .field("email", Rule::string().email("Invalid email address"))
        .field("password", Rule::string().min(6, "Password too short"));

    let failure = validate(
        &schema,
        &json!({ "name": "A", "email": "bad", "password": "12345" }),
    )
    .unwrap_err();

    let normalized = normalize(&failure.into(), false);
    let fields: Vec<_> = normalized
        .envelope
        .errors
        .unwrap()
        .into_iter()
        .map(|issue| issue.field)
        .collect();
    assert_eq!(fields, vec!["name", "email", "password"]);
}

#[test]
fn test_normalization_is_idempotent() {
    let failures: Vec<Failure> = vec![
        DomainError::not_found("Product not found").into(),
        ValidationFailure::single("page", "Expected number, received string", "invalid_type").into(),
        StorageError::duplicate("email").into(),
        ParseFailure::new(PayloadSource::Query, "bad escape").into(),
        anyhow::anyhow!("socket closed").into(),
    ];

    for failure in &failures {
        let first = serde_json::to_string(&normalize(failure, false).envelope).unwrap();
        let second = serde_json::to_string(&normalize(failure, false).envelope).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_unknown_failures_never_leak_internal_text() {
    let failures: Vec<Failure> = vec![
        anyhow::anyhow!("connection refused at 10.0.0.3:5432").into(),
        StorageError::Backend("pool exhausted: secret-host".into()).into(),
    ];

    for failure in &failures {
        let normalized = normalize(failure, true);
        assert_eq!(normalized.status, 500);
        assert_eq!(normalized.envelope.message, GENERIC_MESSAGE);
        assert_eq!(normalized.envelope.status, ResponseStatus::Error);
        let text = serde_json::to_string(&normalized.envelope).unwrap();
        assert!(!text.contains("10.0.0.3"));
        assert!(!text.contains("secret-host"));
    }
}

#[test]
fn test_duplicate_email_scenario() {
    let normalized = normalize(&StorageError::duplicate("email").into(), false);
    assert_eq!(
        serde_json::to_value(normalized.envelope).unwrap(),
        json!({
            "success": false,
            "status": "fail",
            "message": "Duplicate value: email must be unique",
            "data": null,
            "code": 409,
            "errors": [{ "field": "email", "message": "email must be unique" }]
        })
    );
}

#[test]
fn test_duplicate_on_several_fields_names_all() {
    let failure = StorageError::Duplicate {
        fields: vec!["email".into(), "name".into()],
    };
    let normalized = normalize(&failure.into(), false);
    assert_eq!(
        normalized.envelope.message,
        "Duplicate value: email, name must be unique"
    );
    assert_eq!(normalized.envelope.errors.map(|e| e.len()), Some(2));
}

#[test]
fn test_duplicate_without_field_information() {
    let failure = StorageError::Duplicate { fields: vec![] };
    let normalized = normalize(&failure.into(), false);
    assert_eq!(normalized.status, 409);
    assert_eq!(normalized.envelope.message, "Duplicate key error");
    assert_eq!(
        normalized.envelope.errors,
        Some(vec![ValidationIssue::new("unknown", "Duplicate field value entered")])
    );
}

#[test]
fn test_cast_failure_names_field_and_value() {
    let normalized = normalize(&StorageError::cast("id", "12345").into(), false);
    assert_eq!(normalized.status, 400);
    assert_eq!(normalized.envelope.message, "Invalid id: 12345");
    assert_eq!(
        normalized.envelope.errors,
        Some(vec![ValidationIssue::new("id", "Invalid ID format")])
    );
}

#[test]
fn test_storage_field_validation_lists_every_field() {
    let mut errors = BTreeMap::new();
    errors.insert("email".to_string(), "Path `email` is required.".to_string());
    errors.insert("name".to_string(), "Path `name` is required.".to_string());

    let normalized = normalize(&StorageError::FieldValidation { errors }.into(), false);
    assert_eq!(normalized.status, 400);
    assert_eq!(normalized.envelope.message, "Validation failed");
    assert_eq!(normalized.envelope.errors.map(|e| e.len()), Some(2));
}

#[test]
fn test_malformed_segments() {
    let cases = [
        (PayloadSource::Body, "Invalid JSON payload"),
        (PayloadSource::Query, "Invalid query string"),
        (PayloadSource::Path, "Invalid path parameters"),
    ];
    for (segment, message) in cases {
        let normalized = normalize(&ParseFailure::new(segment, "expected value at line 1").into(), false);
        assert_eq!(normalized.status, 400);
        assert_eq!(normalized.envelope.message, message);
        assert!(normalized.envelope.errors.is_none());
    }
}

#[test]
fn test_message_failures_keep_their_status() {
    let normalized = normalize(&Failure::message("Payload too large", Some(413)), false);
    assert_eq!(normalized.status, 413);
    assert_eq!(normalized.envelope.message, "Payload too large");

    let normalized = normalize(&Failure::message("no status", None), false);
    assert_eq!(normalized.status, 500);

    let normalized = normalize(&Failure::message("bogus status", Some(42)), false);
    assert_eq!(normalized.status, 500);
}

#[test]
fn test_stack_only_when_exposed_and_carried() {
    let failure: Failure = MessageError::new("kaboom", Some(500))
        .with_stack(Some("at handler (app.rs:1)".into()))
        .into();

    assert_eq!(
        normalize(&failure, true).envelope.stack.as_deref(),
        Some("at handler (app.rs:1)")
    );

    // Production never exposes a stack
    let json = serde_json::to_value(normalize(&failure, false).envelope).unwrap();
    assert!(json.get("stack").is_none());

    // Nothing to expose
    let bare = Failure::message("kaboom", Some(500));
    assert!(normalize(&bare, true).envelope.stack.is_none());
}
