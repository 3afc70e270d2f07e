//! Behaviour of `validate` against declared object schemas

use serde_json::json;

use crate::validation::{codes, validate, ObjectSchema, Rule};

fn signup_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("name", Rule::string().min(2, "Name must be at least 2 characters"))
        .field("email", Rule::string().email("Invalid email address"))
        .field("password", Rule::string().min(6, "Password must be at least 6 characters"))
}

fn fields(failure: &crate::errors::ValidationFailure) -> Vec<&str> {
    failure.issues().iter().map(|i| i.field.as_str()).collect()
}

#[test]
fn test_collects_every_field_in_declaration_order() {
    let failure = validate(
        &signup_schema(),
        &json!({"name": "A", "email": "bad", "password": "12345"}),
    )
    .unwrap_err();

    assert_eq!(fields(&failure), vec!["name", "email", "password"]);
    let issues = failure.issues();
    assert_eq!(issues[0].message, "Name must be at least 2 characters");
    assert_eq!(issues[0].code.as_deref(), Some(codes::TOO_SMALL));
    assert_eq!(issues[1].code.as_deref(), Some(codes::INVALID_STRING));
    assert_eq!(issues[2].message, "Password must be at least 6 characters");
}

#[test]
fn test_order_follows_schema_not_payload() {
    let failure = validate(
        &signup_schema(),
        &json!({"password": "1", "email": "nope", "name": ""}),
    )
    .unwrap_err();
    assert_eq!(fields(&failure), vec!["name", "email", "password"]);
}

#[test]
fn test_missing_required_fields_are_reported() {
    let failure = validate(&signup_schema(), &json!({"email": "jo@example.com"})).unwrap_err();
    assert_eq!(fields(&failure), vec!["name", "password"]);
    assert!(failure.issues().iter().all(|i| i.message == "Required"));
    assert!(failure
        .issues()
        .iter()
        .all(|i| i.code.as_deref() == Some(codes::INVALID_TYPE)));
}

#[test]
fn test_valid_payload_strips_unknown_keys() {
    let value = validate(
        &signup_schema(),
        &json!({"name": "Ada", "email": "ada@example.com", "password": "secret1", "role": "admin"}),
    )
    .unwrap();
    assert_eq!(
        value,
        json!({"name": "Ada", "email": "ada@example.com", "password": "secret1"})
    );
}

#[test]
fn test_null_payload_is_one_root_issue() {
    let failure = validate(&signup_schema(), &json!(null)).unwrap_err();
    assert_eq!(failure.issues().len(), 1);
    assert_eq!(failure.issues()[0].field, "");
    assert_eq!(failure.issues()[0].message, "Expected object, received null");
}

#[test]
fn test_array_payload_is_one_root_issue() {
    let failure = validate(&signup_schema(), &json!([1, 2])).unwrap_err();
    assert_eq!(failure.issues().len(), 1);
    assert_eq!(failure.issues()[0].message, "Expected object, received array");
}

#[test]
fn test_empty_payload_against_optional_schema() {
    let schema = ObjectSchema::new()
        .optional("bio", Rule::string())
        .with_default("page", Rule::number().integer().min(1.0), 1)
        .with_default("active", Rule::boolean(), true);

    let value = validate(&schema, &json!({})).unwrap();
    assert_eq!(value, json!({"page": 1, "active": true}));
}

#[test]
fn test_all_checks_of_a_field_are_reported() {
    let schema = ObjectSchema::new().field(
        "code",
        Rule::string()
            .min(5, "Code too short")
            .one_of(&["alpha-1", "beta-22"]),
    );
    let failure = validate(&schema, &json!({"code": "x"})).unwrap_err();
    let codes_seen: Vec<_> = failure
        .issues()
        .iter()
        .map(|i| i.code.clone().unwrap_or_default())
        .collect();
    assert_eq!(codes_seen, vec![codes::TOO_SMALL, codes::INVALID_ENUM_VALUE]);
    assert_eq!(
        failure.issues()[1].message,
        "Invalid enum value. Expected 'alpha-1' | 'beta-22', received 'x'"
    );
}

#[test]
fn test_wrong_type_reports_once() {
    let schema = ObjectSchema::new().field("name", Rule::string().min(2, "short"));
    let failure = validate(&schema, &json!({"name": 42})).unwrap_err();
    assert_eq!(failure.issues().len(), 1);
    assert_eq!(failure.issues()[0].message, "Expected string, received number");
}

#[test]
fn test_nested_issues_use_dotted_paths() {
    let schema = ObjectSchema::new().field("name", Rule::string()).field(
        "address",
        ObjectSchema::new()
            .field("city", Rule::string().min(2, "City too short"))
            .field("zip", Rule::number().integer()),
    );

    let failure = validate(
        &schema,
        &json!({"name": 1, "address": {"city": "X", "zip": 12.5}}),
    )
    .unwrap_err();
    assert_eq!(fields(&failure), vec!["name", "address.city", "address.zip"]);

    let failure = validate(&schema, &json!({"name": "n", "address": "street"})).unwrap_err();
    assert_eq!(fields(&failure), vec!["address"]);
}

#[test]
fn test_number_bounds_and_coercion() {
    let schema = ObjectSchema::new()
        .field("page", Rule::number().integer().min(1.0).coerce())
        .field("limit", Rule::number().integer().min(1.0).max(100.0).coerce());

    let value = validate(&schema, &json!({"page": "2", "limit": 10})).unwrap();
    assert_eq!(value, json!({"page": 2, "limit": 10}));

    let failure = validate(&schema, &json!({"page": "0", "limit": "500"})).unwrap_err();
    assert_eq!(failure.issues()[0].message, "Number must be greater than or equal to 1");
    assert_eq!(failure.issues()[1].message, "Number must be less than or equal to 100");

    let failure = validate(&schema, &json!({"page": "two", "limit": 1})).unwrap_err();
    assert_eq!(failure.issues()[0].message, "Expected number, received string");
}

#[test]
fn test_uncoerced_number_rejects_strings() {
    let schema = ObjectSchema::new().field("price", Rule::number().min(0.0));
    assert!(validate(&schema, &json!({"price": "12"})).is_err());
    assert_eq!(
        validate(&schema, &json!({"price": 12.5})).unwrap(),
        json!({"price": 12.5})
    );
}

#[test]
fn test_string_transforms_run_before_checks() {
    let schema = ObjectSchema::new().field(
        "email",
        Rule::string().trim().lowercase().email("Invalid email address"),
    );
    let value = validate(&schema, &json!({"email": "  Ada@Example.COM "})).unwrap();
    assert_eq!(value, json!({"email": "ada@example.com"}));
}

#[test]
fn test_url_and_boolean_rules() {
    let schema = ObjectSchema::new()
        .optional("profileImage", Rule::string().url("Invalid url"))
        .optional("newsletter", Rule::boolean().coerce());

    let value = validate(
        &schema,
        &json!({"profileImage": "https://cdn.example.com/a.png", "newsletter": "false"}),
    )
    .unwrap();
    assert_eq!(value["newsletter"], json!(false));

    let failure = validate(&schema, &json!({"profileImage": "not a url", "newsletter": "yes"}))
        .unwrap_err();
    assert_eq!(fields(&failure), vec!["profileImage", "newsletter"]);
}

#[test]
fn test_explicit_null_is_a_type_error() {
    let schema = ObjectSchema::new().optional("bio", Rule::string());
    let failure = validate(&schema, &json!({"bio": null})).unwrap_err();
    assert_eq!(failure.issues()[0].message, "Expected string, received null");
}

#[test]
fn test_email_rule_accepts_mixed_case() {
    let schema = ObjectSchema::new().field("email", Rule::string().email("bad email"));
    let value = validate(&schema, &json!({"email": "Jo@Example.com"})).unwrap();
    assert_eq!(value, json!({"email": "Jo@Example.com"}));

    let failure = validate(&schema, &json!({"email": "Jo@Example"})).unwrap_err();
    assert_eq!(failure.issues()[0].message, "bad email");
}

#[test]
fn test_integers_beyond_i64_are_rejected() {
    let schema = ObjectSchema::new().field("id", Rule::number().integer().min(1.0).coerce());

    let failure = validate(&schema, &json!({"id": "99999999999999999999999"})).unwrap_err();
    assert_eq!(failure.issues().len(), 1);
    assert_eq!(failure.issues()[0].code.as_deref(), Some(codes::TOO_BIG));
    assert_eq!(
        failure.issues()[0].message,
        "Number must be less than or equal to 9223372036854775807"
    );

    let failure = validate(&schema, &json!({"id": -1e30})).unwrap_err();
    assert_eq!(failure.issues()[0].code.as_deref(), Some(codes::TOO_SMALL));

    let value = validate(&schema, &json!({"id": "9007199254740993"})).unwrap();
    assert!(value["id"].as_i64().is_some());
}
