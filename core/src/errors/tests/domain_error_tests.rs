//! Unit tests for domain error types

use dv_shared::types::{ResponseStatus, ValidationIssue};
use serde_json::json;

use crate::errors::{is_reserved_detail_key, DomainError, RESERVED_DETAIL_KEYS};

#[test]
fn test_status_is_derived_from_code() {
    assert_eq!(DomainError::new("boom", 500).status(), ResponseStatus::Error);
    assert_eq!(DomainError::new("gateway", 503).status(), ResponseStatus::Error);
    assert_eq!(DomainError::new("nope", 404).status(), ResponseStatus::Fail);
    assert_eq!(DomainError::new("moved", 301).status(), ResponseStatus::Fail);
}

#[test]
fn test_out_of_range_code_resolves_to_500() {
    let low = DomainError::new("too low", 42);
    assert_eq!(low.status_code(), 500);
    assert_eq!(low.status(), ResponseStatus::Error);

    assert_eq!(DomainError::new("too high", 600).status_code(), 500);
    assert_eq!(DomainError::new("edge", 100).status_code(), 100);
    assert_eq!(DomainError::new("edge", 599).status_code(), 599);
}

#[test]
fn test_helpers_pick_expected_codes() {
    assert_eq!(DomainError::bad_request("x").status_code(), 400);
    assert_eq!(DomainError::unauthorized("x").status_code(), 401);
    assert_eq!(DomainError::forbidden("x").status_code(), 403);
    assert_eq!(DomainError::not_found("x").status_code(), 404);
    assert_eq!(DomainError::conflict("x").status_code(), 409);
    assert_eq!(DomainError::too_many_requests("x").status_code(), 429);
}

#[test]
fn test_route_not_found_names_the_path() {
    let error = DomainError::route_not_found("/foo/bar");
    assert_eq!(error.status_code(), 404);
    assert_eq!(error.message(), "Cannot find /foo/bar on this server");
}

#[test]
fn test_is_always_operational() {
    assert!(DomainError::internal("x").is_operational());
    assert!(DomainError::bad_request("x").is_operational());
}

#[test]
fn test_reserved_detail_keys_are_refused() {
    let error = DomainError::conflict("taken")
        .with_detail("message", "overwritten?")
        .with_detail("code", 200)
        .with_detail("retryAfter", 30);

    let extra = &error.details().extra;
    assert_eq!(extra.len(), 1);
    assert_eq!(extra["retryAfter"], json!(30));
    assert_eq!(error.message(), "taken");

    for key in RESERVED_DETAIL_KEYS {
        assert!(is_reserved_detail_key(key));
    }
    assert!(!is_reserved_detail_key("hint"));
}

#[test]
fn test_errors_are_kept_in_order() {
    let error = DomainError::bad_request("bad").with_errors(vec![
        ValidationIssue::new("b", "second"),
        ValidationIssue::new("a", "first"),
    ]);
    let fields: Vec<_> = error.details().errors.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, vec!["b", "a"]);
}

#[test]
fn test_display_is_the_message() {
    assert_eq!(DomainError::forbidden("Access denied").to_string(), "Access denied");
}
