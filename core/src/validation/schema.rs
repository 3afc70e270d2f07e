//! Object schemas: an ordered list of named fields

use dv_shared::types::ValidationIssue;
use serde_json::{Map, Value};

use super::rules::{codes, issue, type_issue, Rule};

/// Whether a field must be present
#[derive(Debug, Clone)]
enum Presence {
    Required,
    Optional,
    Default(Value),
}

#[derive(Debug, Clone)]
struct Field {
    name: String,
    rule: Rule,
    presence: Presence,
}

/// Declared shape of a JSON object
///
/// Fields are checked in declaration order. Keys the schema does not declare
/// are stripped from the validated output.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<Field>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// A required field
    pub fn field(self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.push(name.into(), rule.into(), Presence::Required)
    }

    /// A field that may be absent
    pub fn optional(self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.push(name.into(), rule.into(), Presence::Optional)
    }

    /// A field that takes `default` when absent
    pub fn with_default(
        self,
        name: impl Into<String>,
        rule: impl Into<Rule>,
        default: impl Into<Value>,
    ) -> Self {
        self.push(name.into(), rule.into(), Presence::Default(default.into()))
    }

    fn push(mut self, name: String, rule: Rule, presence: Presence) -> Self {
        self.fields.push(Field {
            name,
            rule,
            presence,
        });
        self
    }

    /// Names of the declared fields, in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validate `value` rooted at `path`; nested issues use dotted paths
    pub(crate) fn apply(
        &self,
        value: &Value,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Value> {
        let Value::Object(input) = value else {
            issues.push(type_issue(path, "object", value));
            return None;
        };

        let before = issues.len();
        let mut output = Map::new();

        for field in &self.fields {
            let field_path = join_path(path, &field.name);
            match (input.get(&field.name), &field.presence) {
                (Some(present), _) => {
                    if let Some(coerced) = field.rule.apply(present, &field_path, issues) {
                        output.insert(field.name.clone(), coerced);
                    }
                }
                (None, Presence::Required) => {
                    issues.push(issue(&field_path, "Required", codes::INVALID_TYPE));
                }
                (None, Presence::Optional) => {}
                (None, Presence::Default(default)) => {
                    output.insert(field.name.clone(), default.clone());
                }
            }
        }

        (issues.len() == before).then_some(Value::Object(output))
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}
