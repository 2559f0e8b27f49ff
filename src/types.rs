use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fmt, sync::OnceLock};

pub static DEBUG_PRINT_LIMIT: OnceLock<usize> = OnceLock::new();

/// A closed set of option values parsed from their option-file spelling.
pub trait Choice: Sized + Copy + DeserializeOwned {
    const ALLOWED: &'static [&'static str];

    fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_owned())).ok()
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Checkbox,
    Link,
    Custom,
}

impl Choice for ItemType {
    const ALLOWED: &'static [&'static str] = &["checkbox", "link", "custom"];
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    #[default]
    Hover,
    Click,
}

impl Choice for Trigger {
    const ALLOWED: &'static [&'static str] = &["hover", "click"];
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Replace,
    Prepend,
    Append,
}

impl Choice for Placement {
    const ALLOWED: &'static [&'static str] = &["replace", "prepend", "append"];
}

/// Methods callable by name on an attached checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    AddItems,
    RemoveItems,
    Reset,
    Destroy,
}

impl Choice for Method {
    const ALLOWED: &'static [&'static str] = &["addItems", "removeItems", "reset", "destroy"];
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Collapsed,
    Expanded,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// Identity of a host container element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn choices_parse_their_lowercase_names() {
        assert_eq!(ItemType::from_name("link"), Some(ItemType::Link));
        assert_eq!(Trigger::from_name("click"), Some(Trigger::Click));
        assert_eq!(Placement::from_name("append"), Some(Placement::Append));
        assert_eq!(Method::from_name("removeItems"), Some(Method::RemoveItems));
    }

    #[test]
    fn choices_reject_unknown_names() {
        assert_eq!(ItemType::from_name("radio"), None);
        assert_eq!(Trigger::from_name("Hover"), None);
        assert_eq!(Method::from_name("remove_items"), None);
    }

    #[test]
    fn allowed_lists_match_parsing() {
        for name in Placement::ALLOWED {
            assert!(Placement::from_name(name).is_some(), "{}", name);
        }
        for name in Method::ALLOWED {
            assert!(Method::from_name(name).is_some(), "{}", name);
        }
    }
}
