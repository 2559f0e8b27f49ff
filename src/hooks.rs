use serde::Serialize;
use serde_json::Value;
use std::{fmt, rc::Rc};

use crate::types::ContainerId;

/// Host callback. The second argument is the hook's param bag, passed through untouched.
pub type Callback = Rc<dyn Fn(&ChecklistEvent, &Value)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventKind {
    Show,
    Hide,
    Change { item: String, checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistEvent {
    pub container: String,
    #[serde(flatten)]
    pub kind: EventKind,
    /// Label text after the event.
    pub label: String,
}

impl ChecklistEvent {
    pub fn new(container: &ContainerId, kind: EventKind, label: impl Into<String>) -> Self {
        Self {
            container: container.to_string(),
            kind,
            label: label.into(),
        }
    }
}

#[derive(Clone, Default)]
pub struct Hook {
    callback: Option<Callback>,
    params: Value,
}

impl Hook {
    pub fn new(callback: Option<Callback>, params: Value) -> Self {
        Self { callback, params }
    }

    pub fn params(&self) -> &Value {
        &self.params
    }

    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    pub fn fire(&self, event: &ChecklistEvent) {
        tracing::debug!(event = ?event, "checklist event");

        if let Some(callback) = &self.callback {
            callback(event, &self.params);
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("callback", &self.callback.as_ref().map(|_| "<function>"))
            .field("params", &self.params)
            .finish()
    }
}
