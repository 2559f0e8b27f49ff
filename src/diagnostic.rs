use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::types::ContainerId;

/// Runtime kind of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Boolean,
    Number,
    Function,
    Array,
    Object,
    Null,
}

impl Kind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
            Value::Null => Self::Null,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Function => "function",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        };

        f.write_str(name)
    }
}

/// Non-fatal problem found while configuring or driving a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("\"{field}\" option is of type {actual}, expected {expected}. Using the default value instead")]
    TypeMismatch {
        field: &'static str,
        actual: Kind,
        expected: Kind,
    },

    #[error(
        "\"{value}\" is not a supported value for \"{field}\" option. Supported values are {}. Using the default value instead",
        quoted(.allowed)
    )]
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("item #{index} of \"{field}\" was skipped: {reason}")]
    InvalidItem {
        field: &'static str,
        index: usize,
        reason: &'static str,
    },

    #[error("\"{method}\" is not a supported method. Supported methods are {}", quoted(.allowed))]
    UnsupportedMethod {
        method: String,
        allowed: &'static [&'static str],
    },

    #[error("container \"{container}\" has no checklist attached")]
    NoInstance { container: ContainerId },
}

fn quoted(values: &[&str]) -> String {
    values
        .iter()
        .map(|value| format!("\"{}\"", value))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Diagnostic {
    pub fn emit(&self, container: &ContainerId, enabled: bool) {
        if enabled {
            tracing::warn!(container = %container, "{}", self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn kinds_of_json_values() {
        assert_eq!(Kind::of(&json!("a")), Kind::String);
        assert_eq!(Kind::of(&json!(true)), Kind::Boolean);
        assert_eq!(Kind::of(&json!(1.5)), Kind::Number);
        assert_eq!(Kind::of(&json!([])), Kind::Array);
        assert_eq!(Kind::of(&json!({})), Kind::Object);
        assert_eq!(Kind::of(&json!(null)), Kind::Null);
    }

    #[test]
    fn messages_name_the_offending_option() {
        let mismatch = Diagnostic::TypeMismatch {
            field: "checkAll",
            actual: Kind::String,
            expected: Kind::Boolean,
        };
        assert_eq!(
            mismatch.to_string(),
            "\"checkAll\" option is of type string, expected boolean. Using the default value instead"
        );

        let invalid = Diagnostic::InvalidValue {
            field: "placement",
            value: "inside".into(),
            allowed: &["replace", "prepend", "append"],
        };
        assert_eq!(
            invalid.to_string(),
            "\"inside\" is not a supported value for \"placement\" option. \
             Supported values are \"replace\", \"prepend\", \"append\". Using the default value instead"
        );
    }
}
