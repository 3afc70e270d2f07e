//! Declarative payload validation
//!
//! A schema is built once (usually in a `Lazy` static) and applied to the
//! decoded body, query or path parameters of a request:
//!
//! ```
//! use dv_core::validation::{validate, ObjectSchema, Rule};
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new()
//!     .field("email", Rule::string().trim().lowercase().email("Invalid email address"))
//!     .with_default("page", Rule::number().integer().min(1.0).coerce(), 1);
//!
//! let value = validate(&schema, &json!({"email": " Jo@Example.com ", "extra": true})).unwrap();
//! assert_eq!(value, json!({"email": "jo@example.com", "page": 1}));
//! ```

mod rules;
mod schema;

#[cfg(test)]
mod tests;

use serde_json::Value;

use crate::errors::ValidationFailure;

pub use rules::{codes, BooleanRule, NumberRule, Rule, StringRule};
pub use schema::ObjectSchema;

/// Validate `payload` against `schema`
///
/// Every top-level field is checked before returning, so a failure carries
/// one issue per violated rule in declaration order. On success the payload
/// comes back coerced: defaults applied, transforms run, undeclared keys
/// dropped.
pub fn validate(schema: &ObjectSchema, payload: &Value) -> Result<Value, ValidationFailure> {
    let mut issues = Vec::new();
    match schema.apply(payload, "", &mut issues) {
        Some(value) if issues.is_empty() => Ok(value),
        _ => Err(ValidationFailure::new(issues)),
    }
}
