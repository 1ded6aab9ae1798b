//! Declarative field-level schemas for request payloads.
//!
//! A [`Schema`] is a pure check over a JSON value. [`ObjectSchema`] is the built-in
//! implementation; the validation middleware only depends on the trait, so other
//! back-ends can be plugged in.

mod template;

pub use template::{create_template_body, template_id_params, update_template_body};

use serde::Serialize;
use serde_json::{Map, Value};

/// One violated rule. `field` is a dotted path from the validated root (`data.name`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub trait Schema: Send + Sync {
    /// `Ok(())` when valid, otherwise a non-empty list of violations in declaration order.
    fn validate(&self, value: &Value) -> Result<(), Vec<FieldError>>;
}

#[derive(Clone, Debug)]
pub enum FieldKind {
    /// Must be a non-empty string.
    String,
    Object(ObjectSchema),
}

#[derive(Clone, Debug)]
pub struct FieldRule {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// Object with a fixed set of known keys. Unknown keys are rejected.
#[derive(Clone, Debug, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldRule>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, name: &str, kind: FieldKind) -> Self {
        self.field(name, kind, true)
    }

    pub fn optional(self, name: &str, kind: FieldKind) -> Self {
        self.field(name, kind, false)
    }

    fn field(mut self, name: &str, kind: FieldKind, required: bool) -> Self {
        self.fields.push(FieldRule {
            name: name.to_string(),
            kind,
            required,
        });
        self
    }

    fn check(&self, path: &str, value: &Value, errors: &mut Vec<FieldError>) {
        let Value::Object(map) = value else {
            errors.push(FieldError::new(root_label(path), "must be an object"));
            return;
        };
        for rule in &self.fields {
            let field_path = join(path, &rule.name);
            match map.get(&rule.name) {
                None => {
                    if rule.required {
                        errors.push(FieldError::new(field_path, "is required"));
                    }
                }
                Some(v) => check_field(&field_path, v, &rule.kind, errors),
            }
        }
        self.check_unknown(path, map, errors);
    }

    fn check_unknown(&self, path: &str, map: &Map<String, Value>, errors: &mut Vec<FieldError>) {
        for key in map.keys() {
            if !self.fields.iter().any(|r| &r.name == key) {
                errors.push(FieldError::new(join(path, key), "is not allowed"));
            }
        }
    }
}

impl Schema for ObjectSchema {
    fn validate(&self, value: &Value) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        self.check("", value, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_field(path: &str, v: &Value, kind: &FieldKind, errors: &mut Vec<FieldError>) {
    match kind {
        FieldKind::String => match v {
            Value::String(s) if s.is_empty() => {
                errors.push(FieldError::new(path, "must not be empty"));
            }
            Value::String(_) => {}
            _ => errors.push(FieldError::new(path, "must be a string")),
        },
        FieldKind::Object(inner) => inner.check(path, v, errors),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn root_label(path: &str) -> &str {
    if path.is_empty() {
        "value"
    } else {
        path
    }
}
