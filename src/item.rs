use serde_json::Value;

use crate::{types::ItemType, utils::strip_tags};

/// Placeholder replaced by the item value in the custom item template.
pub const ITEM_PLACEHOLDER: &str = "{{item}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Checkbox { label: String, checked: bool },
    Link { label: String, url: String },
    Custom { value: String },
}

/// Text of a scalar item value. Numbers count as their decimal form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

impl Item {
    pub fn checkbox(label: impl Into<String>, checked: bool) -> Self {
        Self::Checkbox {
            label: label.into(),
            checked,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn custom(value: impl Into<String>) -> Self {
        Self::Custom {
            value: value.into(),
        }
    }

    /// Builds an item from its option form:
    /// checkbox `"A"` or `["A", true]`, link `["Docs", "https://…"]`, custom `"value"`.
    pub fn from_spec(spec: &Value, item_type: ItemType, default_checked: bool) -> Result<Self, &'static str> {
        match item_type {
            ItemType::Checkbox => {
                if let Some(label) = scalar_text(spec) {
                    return Ok(Self::checkbox(label, default_checked));
                }

                match spec.as_array().map(Vec::as_slice) {
                    Some([label]) => scalar_text(label)
                        .map(|label| Self::checkbox(label, default_checked))
                        .ok_or("checkbox label must be a string"),
                    Some([label, Value::Bool(checked)]) => scalar_text(label)
                        .map(|label| Self::checkbox(label, *checked))
                        .ok_or("checkbox label must be a string"),
                    Some([_, _]) => Err("checkbox state must be a boolean"),
                    _ => Err("checkbox items are a label or a [label, checked] pair"),
                }
            }
            ItemType::Link => match spec.as_array().map(Vec::as_slice) {
                Some([label, Value::String(url)]) => scalar_text(label)
                    .map(|label| Self::link(label, url.clone()))
                    .ok_or("link label must be a string"),
                _ => Err("link items are a [label, url] pair"),
            },
            ItemType::Custom => scalar_text(spec)
                .map(Self::custom)
                .ok_or("custom items must be a string"),
        }
    }

    /// Text the item renders as; this is what removal matches against.
    pub fn text(&self, item_html: &str) -> String {
        match self {
            Self::Checkbox { label, .. } | Self::Link { label, .. } => label.clone(),
            Self::Custom { value } => strip_tags(&substitute(item_html, value)),
        }
    }

    pub fn checked(&self) -> Option<bool> {
        match self {
            Self::Checkbox { checked, .. } => Some(*checked),
            _ => None,
        }
    }
}

/// Replaces the first placeholder of `template` with `value`.
pub fn substitute(template: &str, value: &str) -> String {
    template.replacen(ITEM_PLACEHOLDER, value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn checkbox_specs() {
        assert_eq!(
            Item::from_spec(&json!("A"), ItemType::Checkbox, false),
            Ok(Item::checkbox("A", false))
        );
        assert_eq!(
            Item::from_spec(&json!(["B", true]), ItemType::Checkbox, false),
            Ok(Item::checkbox("B", true))
        );
        assert_eq!(
            Item::from_spec(&json!([42]), ItemType::Checkbox, true),
            Ok(Item::checkbox("42", true))
        );
        assert!(Item::from_spec(&json!(["B", "yes"]), ItemType::Checkbox, true).is_err());
        assert!(Item::from_spec(&json!({"label": "B"}), ItemType::Checkbox, true).is_err());
    }

    #[test]
    fn link_specs() {
        assert_eq!(
            Item::from_spec(&json!(["Docs", "https://docs.rs"]), ItemType::Link, true),
            Ok(Item::link("Docs", "https://docs.rs"))
        );
        assert!(Item::from_spec(&json!("Docs"), ItemType::Link, true).is_err());
    }

    #[test]
    fn custom_text_is_the_substituted_template_content() {
        let item = Item::from_spec(&json!("Red"), ItemType::Custom, true).unwrap();

        assert_eq!(item.text("<span class='swatch'>{{item}}</span>"), "Red");
        assert_eq!(item.text("Colour: {{item}}"), "Colour: Red");
        assert_eq!(item.checked(), None);
    }

    #[test]
    fn substitute_replaces_a_single_placeholder() {
        assert_eq!(substitute("{{item}}/{{item}}", "x"), "x/{{item}}");
        assert_eq!(substitute("none", "x"), "none");
    }
}
