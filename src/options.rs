use indexmap::IndexMap;
use serde_json::Value;
use std::{fmt, rc::Rc};
use wrap_context::liab;

use crate::{
    diagnostic::Kind,
    hooks::{Callback, ChecklistEvent},
};

#[derive(Clone)]
pub enum OptionValue {
    Json(Value),
    Callback(Callback),
}

impl OptionValue {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Json(value) => Kind::of(value),
            Self::Callback(_) => Kind::Function,
        }
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Callback(_) => f.write_str("<function>"),
        }
    }
}

/// User-supplied options, overlaid on the defaults by [`crate::config::resolve`].
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: IndexMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn callback<F>(mut self, name: &str, callback: F) -> Self
    where
        F: Fn(&ChecklistEvent, &Value) + 'static,
    {
        self.values
            .insert(name.to_owned(), OptionValue::Callback(Rc::new(callback)));
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.values
            .insert(name.to_owned(), OptionValue::Json(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl TryFrom<Value> for Options {
    type Error = anyhow::Error;

    fn try_from(value: Value) -> anyhow::Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => liab!("Options must be an object, got {}", Kind::of(&other)),
        };

        let values = map
            .into_iter()
            .map(|(name, value)| (name, OptionValue::Json(value)))
            .collect();

        anyhow::Ok(Self { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_objects_become_options() {
        let options = Options::try_from(json!({"type": "link", "checkAll": true})).unwrap();

        assert_eq!(options.names().collect::<Vec<_>>(), vec!["type", "checkAll"]);
        assert_eq!(options.get("checkAll").map(OptionValue::kind), Some(Kind::Boolean));
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(Options::try_from(json!(["type", "link"])).is_err());
    }

    #[test]
    fn callbacks_have_function_kind() {
        let options = Options::new()
            .with("onChange", "not a function")
            .callback("onShow", |_, _| {});

        assert_eq!(options.get("onShow").map(OptionValue::kind), Some(Kind::Function));
        assert_eq!(options.get("onChange").map(OptionValue::kind), Some(Kind::String));
    }
}
