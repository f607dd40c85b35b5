//! Argument validator

use serde_json::{Map, Value};

use crate::catalog::{ParamKind, ParamSpec};

/// Runtime kind of a supplied JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Whether a value of this kind satisfies the declared kind
    pub fn satisfies(&self, kind: ParamKind) -> bool {
        matches!(
            (self, kind),
            (ValueKind::String, ParamKind::String)
                | (ValueKind::Number, ParamKind::Number)
                | (ValueKind::Boolean, ParamKind::Boolean)
                | (ValueKind::Array, ParamKind::Array)
                | (ValueKind::Object, ParamKind::Object)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A required field was absent or null
    MissingField {
        field: String,
        /// Declared description of the field
        hint: String,
    },
    /// A declared field had the wrong primitive kind
    WrongType {
        field: String,
        expected: ParamKind,
        actual: ValueKind,
    },
    /// The arguments could not be read as the tool's typed input
    Malformed { detail: String },
}

impl Violation {
    /// Field the violation refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Violation::MissingField { field, .. } | Violation::WrongType { field, .. } => Some(field),
            Violation::Malformed { .. } => None,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::MissingField { field, hint } => {
                write!(f, "missing required field `{}` ({})", field, hint)
            }
            Violation::WrongType { field, expected, actual } => {
                write!(f, "field `{}` must be a {}, got {}", field, expected, actual)
            }
            Violation::Malformed { detail } => write!(f, "malformed arguments: {}", detail),
        }
    }
}

/// Outcome of validating one argument set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    /// Non-empty, ordered list of violations
    Invalid(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Violations, empty when valid
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(v) => v,
        }
    }
}

/// Validate `arguments` against the declared parameters of `tool_name`
///
/// Missing required fields are reported first (schema order), then kind
/// mismatches (schema order). An optional field explicitly set to `null` is
/// treated as absent.
pub fn validate(_tool_name: &str, arguments: &Map<String, Value>, schema: &[ParamSpec]) -> ValidationResult {
    let mut violations = Vec::new();

    for param in schema.iter().filter(|p| p.required) {
        match arguments.get(&param.name) {
            None | Some(Value::Null) => violations.push(Violation::MissingField {
                field: param.name.clone(),
                hint: param.description.clone(),
            }),
            Some(_) => {}
        }
    }

    for param in schema {
        let Some(value) = arguments.get(&param.name) else {
            continue;
        };
        let actual = ValueKind::of(value);
        if actual == ValueKind::Null {
            continue;
        }
        if !actual.satisfies(param.kind) {
            violations.push(Violation::WrongType {
                field: param.name.clone(),
                expected: param.kind,
                actual,
            });
        }
    }

    if violations.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(violations)
    }
}
