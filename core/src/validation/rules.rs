//! Per-field rules and the checks they run

use dv_shared::types::ValidationIssue;
use dv_shared::utils::is_valid_email;
use serde_json::{Number, Value};
use validator::ValidateUrl;

use super::schema::ObjectSchema;

/// Machine-readable issue codes
pub mod codes {
    pub const INVALID_TYPE: &str = "invalid_type";
    pub const TOO_SMALL: &str = "too_small";
    pub const TOO_BIG: &str = "too_big";
    pub const INVALID_STRING: &str = "invalid_string";
    pub const INVALID_ENUM_VALUE: &str = "invalid_enum_value";
    pub const NOT_INTEGER: &str = "not_integer";
}

/// A bound plus an optional custom message
#[derive(Debug, Clone, PartialEq)]
struct Check<T> {
    value: T,
    message: Option<String>,
}

impl<T> Check<T> {
    fn new(value: T, message: Option<String>) -> Self {
        Self { value, message }
    }

    fn message_or(&self, default: impl FnOnce() -> String) -> String {
        self.message.clone().unwrap_or_else(default)
    }
}

/// The shape a single field must have
#[derive(Debug, Clone)]
pub enum Rule {
    String(StringRule),
    Number(NumberRule),
    Boolean(BooleanRule),
    Object(ObjectSchema),
}

impl Rule {
    pub fn string() -> StringRule {
        StringRule::default()
    }

    pub fn number() -> NumberRule {
        NumberRule::default()
    }

    pub fn boolean() -> BooleanRule {
        BooleanRule::default()
    }

    pub fn object(schema: ObjectSchema) -> Rule {
        Rule::Object(schema)
    }

    /// Run every check, pushing issues under `path`; returns the coerced value on success
    pub(crate) fn apply(
        &self,
        value: &Value,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Value> {
        match self {
            Rule::String(rule) => rule.apply(value, path, issues),
            Rule::Number(rule) => rule.apply(value, path, issues),
            Rule::Boolean(rule) => rule.apply(value, path, issues),
            Rule::Object(schema) => schema.apply(value, path, issues),
        }
    }
}

impl From<StringRule> for Rule {
    fn from(rule: StringRule) -> Self {
        Rule::String(rule)
    }
}

impl From<NumberRule> for Rule {
    fn from(rule: NumberRule) -> Self {
        Rule::Number(rule)
    }
}

impl From<BooleanRule> for Rule {
    fn from(rule: BooleanRule) -> Self {
        Rule::Boolean(rule)
    }
}

impl From<ObjectSchema> for Rule {
    fn from(schema: ObjectSchema) -> Self {
        Rule::Object(schema)
    }
}

/// String constraints; transforms run before checks
#[derive(Debug, Clone, Default)]
pub struct StringRule {
    min: Option<Check<usize>>,
    max: Option<Check<usize>>,
    email: Option<Check<()>>,
    url: Option<Check<()>>,
    one_of: Option<Check<Vec<String>>>,
    trim: bool,
    lowercase: bool,
}

impl StringRule {
    /// At least `len` characters
    pub fn min(mut self, len: usize, message: impl Into<String>) -> Self {
        self.min = Some(Check::new(len, Some(message.into())));
        self
    }

    /// At most `len` characters
    pub fn max(mut self, len: usize, message: impl Into<String>) -> Self {
        self.max = Some(Check::new(len, Some(message.into())));
        self
    }

    pub fn email(mut self, message: impl Into<String>) -> Self {
        self.email = Some(Check::new((), Some(message.into())));
        self
    }

    pub fn url(mut self, message: impl Into<String>) -> Self {
        self.url = Some(Check::new((), Some(message.into())));
        self
    }

    /// Value must be one of `options`
    pub fn one_of(mut self, options: &[&str]) -> Self {
        let options = options.iter().map(|o| o.to_string()).collect();
        self.one_of = Some(Check::new(options, None));
        self
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }

    fn apply(&self, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Option<Value> {
        let Value::String(raw) = value else {
            issues.push(type_issue(path, "string", value));
            return None;
        };

        let mut text = if self.trim { raw.trim().to_string() } else { raw.clone() };
        if self.lowercase {
            text = text.to_lowercase();
        }

        let before = issues.len();
        let len = text.chars().count();

        if let Some(min) = &self.min {
            if len < min.value {
                let message = min.message_or(|| {
                    format!("String must contain at least {} character(s)", min.value)
                });
                issues.push(issue(path, message, codes::TOO_SMALL));
            }
        }
        if let Some(max) = &self.max {
            if len > max.value {
                let message = max.message_or(|| {
                    format!("String must contain at most {} character(s)", max.value)
                });
                issues.push(issue(path, message, codes::TOO_BIG));
            }
        }
        if let Some(email) = &self.email {
            if !is_valid_email(&text) {
                let message = email.message_or(|| String::from("Invalid email"));
                issues.push(issue(path, message, codes::INVALID_STRING));
            }
        }
        if let Some(url) = &self.url {
            if !text.validate_url() {
                let message = url.message_or(|| String::from("Invalid url"));
                issues.push(issue(path, message, codes::INVALID_STRING));
            }
        }
        if let Some(one_of) = &self.one_of {
            if !one_of.value.iter().any(|o| o == &text) {
                let expected = one_of
                    .value
                    .iter()
                    .map(|o| format!("'{}'", o))
                    .collect::<Vec<_>>()
                    .join(" | ");
                let message = one_of.message_or(|| {
                    format!("Invalid enum value. Expected {}, received '{}'", expected, text)
                });
                issues.push(issue(path, message, codes::INVALID_ENUM_VALUE));
            }
        }

        (issues.len() == before).then(|| Value::String(text))
    }
}

/// 2^63, the first float an i64 cannot hold
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Numeric constraints
#[derive(Debug, Clone, Default)]
pub struct NumberRule {
    min: Option<Check<f64>>,
    max: Option<Check<f64>>,
    integer: bool,
    coerce: bool,
}

impl NumberRule {
    /// Greater than or equal to `bound`
    pub fn min(mut self, bound: f64) -> Self {
        self.min = Some(Check::new(bound, None));
        self
    }

    /// Less than or equal to `bound`
    pub fn max(mut self, bound: f64) -> Self {
        self.max = Some(Check::new(bound, None));
        self
    }

    /// Reject values with a fractional part
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Accept numeric strings such as query and path parameters
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Replace the default message of the most recently set bound
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        if let Some(max) = self.max.as_mut() {
            max.message = message;
        } else if let Some(min) = self.min.as_mut() {
            min.message = message;
        }
        self
    }

    fn apply(&self, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Option<Value> {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if self.coerce => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let Some(number) = number.filter(|n| n.is_finite()) else {
            issues.push(type_issue(path, "number", value));
            return None;
        };

        let before = issues.len();

        if self.integer && number.fract() != 0.0 {
            issues.push(issue(path, "Expected integer, received float", codes::NOT_INTEGER));
        }
        // Integers must fit an i64
        if self.integer && number >= I64_LIMIT {
            let message = format!("Number must be less than or equal to {}", i64::MAX);
            issues.push(issue(path, message, codes::TOO_BIG));
            return None;
        }
        if self.integer && number < -I64_LIMIT {
            let message = format!("Number must be greater than or equal to {}", i64::MIN);
            issues.push(issue(path, message, codes::TOO_SMALL));
            return None;
        }
        if let Some(min) = &self.min {
            if number < min.value {
                let message = min.message_or(|| {
                    format!("Number must be greater than or equal to {}", min.value)
                });
                issues.push(issue(path, message, codes::TOO_SMALL));
            }
        }
        if let Some(max) = &self.max {
            if number > max.value {
                let message = max.message_or(|| {
                    format!("Number must be less than or equal to {}", max.value)
                });
                issues.push(issue(path, message, codes::TOO_BIG));
            }
        }

        if issues.len() != before {
            return None;
        }

        if self.integer {
            Some(Value::from(number as i64))
        } else {
            Number::from_f64(number).map(Value::Number)
        }
    }
}

/// Boolean constraint
#[derive(Debug, Clone, Default)]
pub struct BooleanRule {
    coerce: bool,
}

impl BooleanRule {
    /// Accept the strings `"true"` and `"false"`
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    fn apply(&self, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Option<Value> {
        match value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::String(s) if self.coerce && s == "true" => Some(Value::Bool(true)),
            Value::String(s) if self.coerce && s == "false" => Some(Value::Bool(false)),
            other => {
                issues.push(type_issue(path, "boolean", other));
                None
            }
        }
    }
}

pub(crate) fn issue(path: &str, message: impl Into<String>, code: &str) -> ValidationIssue {
    ValidationIssue::new(path, message).with_code(code)
}

pub(crate) fn type_issue(path: &str, expected: &str, received: &Value) -> ValidationIssue {
    issue(
        path,
        format!("Expected {}, received {}", expected, type_name(received)),
        codes::INVALID_TYPE,
    )
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
