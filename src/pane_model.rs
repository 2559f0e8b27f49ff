use impl_helper::ImplHelper;
use ratatui::layout::{Position, Rect};

use checklist::{
    dimension::Dimension,
    dom::{Element, Node, KEY_ATTR},
    fragment::{CHECKALL_CLASS, LABEL_CLASS, LIST_CLASS},
    utils::strip_tags,
    Target,
};

/// Cells taken by the check-all icon at the right end of the label row.
pub const CHECKALL_WIDTH: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Host(String),
    Label {
        text: String,
        check_all: bool,
        expanded: bool,
    },
    Item {
        index: usize,
        text: String,
        checked: Option<bool>,
        link: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, ImplHelper)]
pub struct Row {
    #[helper(get)]
    area: Rect,

    #[helper(get)]
    kind: RowKind,
}

/// One container laid out as terminal rows.
#[derive(Debug, Default, Clone, ImplHelper)]
pub struct PaneModel {
    #[helper(get /* set and upd are custom */)]
    area: Rect,

    #[helper(get, set)]
    title: String,

    #[helper(/* set and upd are custom */)]
    nodes: Vec<Node>,

    #[helper(get)]
    rows: Vec<Row>,

    #[helper(get)]
    widget_area: Option<Rect>,

    #[helper(get, set, upd)]
    is_focused: bool,
}

fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

fn item_kind(index: usize, entry: &Element) -> RowKind {
    let text = entry.text_content();

    match entry.child_elements().next() {
        Some(label) if label.tag() == "label" => RowKind::Item {
            index,
            text,
            checked: label
                .find(&|element| element.tag() == "input")
                .map(|input| input.attr_value("checked").is_some()),
            link: false,
        },
        Some(anchor) if anchor.tag() == "a" => RowKind::Item {
            index,
            text,
            checked: None,
            link: true,
        },
        _ => RowKind::Item {
            index,
            text: strip_tags(&text),
            checked: None,
            link: false,
        },
    }
}

impl PaneModel {
    fn make_rows(&mut self) {
        let inner = inner(self.area);
        let bottom = inner.bottom();
        let mut y = inner.y;

        self.rows = Vec::default();
        self.widget_area = None;

        for node in self.nodes.iter() {
            if y >= bottom {
                break;
            }

            let root = match node {
                Node::Element(element) if element.attr_value(KEY_ATTR).is_some() => element,
                other => {
                    self.rows.push(Row {
                        area: Rect::new(inner.x, y, inner.width, 1),
                        kind: RowKind::Host(other.text_content()),
                    });
                    y += 1;
                    continue;
                }
            };

            let width = root
                .css_value("width")
                .and_then(Dimension::parse)
                .map(|width| width.apply(inner.width))
                .unwrap_or(inner.width);
            let top = y;

            let label = root.child_by_class(LABEL_CLASS);
            let list = root.child_by_class(LIST_CLASS);
            let expanded = list.is_some_and(|list| list.css_value("display") != Some("none"));

            self.rows.push(Row {
                area: Rect::new(inner.x, y, width, 1),
                kind: RowKind::Label {
                    text: label
                        .and_then(|label| label.children().first())
                        .map(Node::text_content)
                        .unwrap_or_default(),
                    check_all: label.is_some_and(|label| label.child_by_class(CHECKALL_CLASS).is_some()),
                    expanded,
                },
            });
            y += 1;

            if let Some(list) = list.filter(|_| expanded) {
                let available = bottom.saturating_sub(y);
                let max_rows = list
                    .css_value("max-height")
                    .and_then(Dimension::parse)
                    .map(|height| height.apply(available))
                    .unwrap_or(available);

                for (index, entry) in list.child_elements().enumerate().take(usize::from(max_rows)) {
                    self.rows.push(Row {
                        area: Rect::new(inner.x, y, width, 1),
                        kind: item_kind(index, entry),
                    });
                    y += 1;
                }
            }

            self.widget_area = Some(Rect::new(inner.x, top, width, y - top));
        }
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn area_set(mut self, value: Rect) -> Self {
        self.area_update(value);
        self
    }

    pub fn area_update(&mut self, value: Rect) -> &mut Self {
        self.area = value;
        self.make_rows();
        self
    }

    pub fn nodes_update(&mut self, value: Vec<Node>) -> &mut Self {
        self.nodes = value;
        self.make_rows();
        self
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.widget_area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Checklist element under the cell, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<Target> {
        if !self.contains(column, row) {
            return None;
        }

        let position = Position::new(column, row);
        let target = self
            .rows
            .iter()
            .find(|candidate| candidate.area.contains(position))
            .and_then(|candidate| match &candidate.kind {
                RowKind::Label { check_all, .. } => {
                    let icon_start = candidate.area.right().saturating_sub(CHECKALL_WIDTH);
                    if *check_all && column >= icon_start {
                        Some(Target::CheckAll)
                    } else {
                        Some(Target::Label)
                    }
                }
                RowKind::Item { index, .. } => Some(Target::Item(*index)),
                RowKind::Host(_) => None,
            });

        Some(target.unwrap_or(Target::Root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist::{fragment, resolve, Options};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pane(value: serde_json::Value, expanded: bool) -> PaneModel {
        let config = resolve(&Options::try_from(value).unwrap()).config;
        let mut root = fragment::render(&config, config.items(), "pane");
        if expanded {
            let list = root.child_elements_mut().find(|element| element.has_class(LIST_CLASS)).unwrap();
            list.set_css("display", "block");
        }

        let mut model = PaneModel::default().area_set(Rect::new(0, 0, 20, 10));
        model.nodes_update(vec![Node::Text("host".into()), Node::Element(root)]);
        model
    }

    #[test]
    fn collapsed_checklists_take_one_row() {
        let model = pane(json!({"items": ["A", "B"]}), false);

        assert_eq!(model.rows().len(), 2);
        assert_eq!(model.widget_area(), &Some(Rect::new(1, 2, 18, 1)));
        assert_eq!(model.hit(3, 2), Some(Target::Label));
        assert_eq!(model.hit(3, 1), None);
    }

    #[test]
    fn expanded_checklists_list_their_items() {
        let model = pane(json!({"items": ["A", ["B", false]], "checkAll": true, "width": "10"}), true);

        assert_eq!(
            model.rows().iter().map(|row| row.kind().clone()).collect::<Vec<_>>(),
            vec![
                RowKind::Host("host".into()),
                RowKind::Label {
                    text: "Filtered".into(),
                    check_all: true,
                    expanded: true
                },
                RowKind::Item {
                    index: 0,
                    text: "A".into(),
                    checked: Some(true),
                    link: false
                },
                RowKind::Item {
                    index: 1,
                    text: "B".into(),
                    checked: Some(false),
                    link: false
                },
            ]
        );
        assert_eq!(model.widget_area(), &Some(Rect::new(1, 2, 10, 3)));
        assert_eq!(model.hit(10, 2), Some(Target::CheckAll));
        assert_eq!(model.hit(2, 4), Some(Target::Item(1)));
        assert_eq!(model.hit(12, 4), None);
    }

    #[test]
    fn max_height_limits_visible_items() {
        let model = pane(json!({"items": ["A", "B", "C"], "height": "2"}), true);

        assert_eq!(model.rows().len(), 4);
    }
}
