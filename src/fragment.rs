//! Builds the checklist's element tree from its configuration.
//!
//! ```text
//! div.checklist[data-checklist=<key>]
//! ├── div.checklist-label       label text, then span.checklist-checkall
//! └── ul.list                   one li per item
//! ```

use itertools::Itertools;

use crate::{
    config::Config,
    dom::{Element, Node, KEY_ATTR},
    item::{substitute, Item},
    label::LabelState,
    types::ItemType,
};

pub const ROOT_CLASS: &str = "checklist";
pub const LABEL_CLASS: &str = "checklist-label";
pub const CHECKALL_CLASS: &str = "checklist-checkall";
pub const LIST_CLASS: &str = "list";

/// Only checkbox items count; inputs inside custom markup are not inspected.
pub fn label_state(config: &Config, items: &[Item]) -> LabelState {
    let checks = items.iter().filter_map(Item::checked).collect_vec();
    let checked = checks.iter().filter(|checked| **checked).count();

    LabelState::of(config.item_type(), checks.len(), checked)
}

pub fn render_item(config: &Config, item: &Item) -> Element {
    let entry = match item {
        Item::Checkbox { label, checked } => {
            let mut input = Element::new("input").attr("type", "checkbox");
            if *checked {
                input.set_attr("checked", "checked");
            }

            Node::Element(
                Element::new("label")
                    .child(Node::Element(input))
                    .text(label),
            )
        }
        Item::Link { label, url } => Node::Element(Element::new("a").attr("href", url).text(label)),
        Item::Custom { value } => Node::Markup(substitute(config.item_html(), value)),
    };

    Element::new("li").child(entry)
}

pub fn render_label(config: &Config, items: &[Item]) -> Element {
    let text = label_state(config, items).text(config.labels()).to_owned();
    let label = Element::new("div").class(LABEL_CLASS).text(&text);

    if config.check_all() && config.item_type() == ItemType::Checkbox {
        label.child(Node::Element(Element::new("span").class(CHECKALL_CLASS)))
    } else {
        label
    }
}

/// Renders the whole checklist, list collapsed.
pub fn render(config: &Config, items: &[Item], key: &str) -> Element {
    let mut list = Element::new("ul")
        .class(LIST_CLASS)
        .css("display", "none");
    if !config.height().is_empty() {
        list.set_css("max-height", config.height());
    }
    for item in items {
        list = list.child(Node::Element(render_item(config, item)));
    }

    let mut root = Element::new("div")
        .class(ROOT_CLASS)
        .attr(KEY_ATTR, key)
        .child(Node::Element(render_label(config, items)))
        .child(Node::Element(list));
    if !config.width().is_empty() {
        root.set_css("width", config.width());
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::resolve, options::Options};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(value: serde_json::Value) -> Config {
        resolve(&Options::try_from(value).unwrap()).config
    }

    #[test]
    fn checkbox_items_render_inputs_reflecting_their_state() {
        let config = config(json!({}));

        assert_eq!(
            render_item(&config, &Item::checkbox("A", true)),
            Element::new("li").child(Node::Element(
                Element::new("label")
                    .child(Node::Element(
                        Element::new("input")
                            .attr("type", "checkbox")
                            .attr("checked", "checked")
                    ))
                    .text("A")
            ))
        );
        assert_eq!(render_item(&config, &Item::checkbox("B", false)).text_content(), "B");
    }

    #[test]
    fn link_and_custom_items() {
        let config = config(json!({"itemHtml": "<em>{{item}}</em>"}));

        assert_eq!(
            render_item(&config, &Item::link("Docs", "https://docs.rs")),
            Element::new("li").child(Node::Element(
                Element::new("a").attr("href", "https://docs.rs").text("Docs")
            ))
        );
        assert_eq!(
            render_item(&config, &Item::custom("Red")),
            Element::new("li").child(Node::Markup("<em>Red</em>".into()))
        );
    }

    #[test]
    fn dimensions_are_applied_only_when_set() {
        let sized = render(&config(json!({"width": "20ch", "height": "5"})), &[], "k");
        assert_eq!(sized.css_value("width"), Some("20ch"));
        assert_eq!(
            sized.child_by_class(LIST_CLASS).and_then(|list| list.css_value("max-height")),
            Some("5")
        );

        let plain = render(&config(json!({})), &[], "k");
        assert_eq!(plain.css_value("width"), None);
        assert_eq!(
            plain.child_by_class(LIST_CLASS).and_then(|list| list.css_value("max-height")),
            None
        );
    }

    #[test]
    fn check_all_icon_only_for_checkboxes() {
        let has_icon = |value| {
            render(&config(value), &[], "k")
                .child_by_class(LABEL_CLASS)
                .and_then(|label| label.child_by_class(CHECKALL_CLASS))
                .is_some()
        };

        assert!(has_icon(json!({"checkAll": true})));
        assert!(!has_icon(json!({"checkAll": true, "type": "link"})));
        assert!(!has_icon(json!({})));
    }

    #[test]
    fn initial_label_and_collapsed_list() {
        let config = config(json!({"checked": false, "items": ["A", ["B", true]]}));
        let root = render(&config, config.items(), "filters");

        assert_eq!(root.attr_value(KEY_ATTR), Some("filters"));
        assert_eq!(
            root.child_by_class(LABEL_CLASS).map(Element::text_content),
            Some("Filtered".to_owned())
        );
        let list = root.child_by_class(LIST_CLASS).unwrap();
        assert_eq!(list.css_value("display"), Some("none"));
        assert_eq!(list.child_elements().count(), 2);
    }

    #[test]
    fn custom_markup_inputs_do_not_drive_the_label() {
        let config = config(json!({
            "type": "custom",
            "itemHtml": "<label><input type=\"checkbox\">{{item}}</label>",
            "items": ["A", "B"]
        }));

        assert_eq!(label_state(&config, config.items()), LabelState::All);
        assert_eq!(
            render(&config, config.items(), "tags")
                .child_by_class(LABEL_CLASS)
                .map(Element::text_content),
            Some("All".to_owned())
        );
    }
}
