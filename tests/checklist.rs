use checklist::{
    fragment::{LABEL_CLASS, LIST_CLASS},
    resolve, ChecklistEvent, Checklists, Container, ContainerId, Diagnostic, Document, Element,
    EventKind, Item, ItemType, Kind, Node, Options, Outcome, Placement, Target, Trigger,
    Visibility,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::{cell::RefCell, rc::Rc};

type Calls = Rc<RefCell<Vec<(ChecklistEvent, Value)>>>;

fn host(ids: &[&str]) -> Document {
    let mut document = Document::new();
    for id in ids {
        document.insert(
            ContainerId::from(*id),
            Container::new(vec![Node::Text(format!("{} host text", id))]),
        );
    }
    document
}

fn recorded(value: Value, calls: &Calls) -> Options {
    let sink = |calls: &Calls| {
        let calls = calls.clone();
        move |event: &ChecklistEvent, params: &Value| {
            calls.borrow_mut().push((event.clone(), params.clone()));
        }
    };

    Options::try_from(value)
        .unwrap()
        .callback("onShow", sink(calls))
        .callback("onHide", sink(calls))
        .callback("onChange", sink(calls))
}

fn fragment<'d>(document: &'d Document, id: &str) -> Option<&'d Element> {
    document
        .container(&id.into())
        .and_then(|container| container.fragment(id))
}

fn label_in_dom(document: &Document, id: &str) -> String {
    fragment(document, id)
        .and_then(|root| root.child_by_class(LABEL_CLASS))
        .map(Element::text_content)
        .unwrap()
}

fn list_texts(document: &Document, id: &str) -> Vec<String> {
    fragment(document, id)
        .and_then(|root| root.child_by_class(LIST_CLASS))
        .map(|list| list.child_elements().map(Element::text_content).collect())
        .unwrap()
}

#[test]
fn checkbox_scenario_walks_filtered_all_none() {
    let id = ContainerId::from("filters");
    let mut document = host(&["filters"]);
    let mut checklists = Checklists::default();
    let calls = Calls::default();

    let options = recorded(
        json!({
            "type": "checkbox",
            "items": ["A", ["B", true]],
            "checked": false,
            "onChangeParams": {"source": "scenario"}
        }),
        &calls,
    );

    let checklist = checklists.attach(&mut document, &id, &options).unwrap();
    assert_eq!(checklist.label_text(), "Filtered");
    assert_eq!(label_in_dom(&document, "filters"), "Filtered");

    let checklist = checklists.get_mut(&id).unwrap();
    checklist.click(&mut document, Target::Item(0)).unwrap();
    assert_eq!(label_in_dom(&document, "filters"), "All");

    let checklist = checklists.get_mut(&id).unwrap();
    checklist.click(&mut document, Target::Item(0)).unwrap();
    checklist.click(&mut document, Target::Item(1)).unwrap();
    assert_eq!(checklist.label_text(), "None");
    assert_eq!(label_in_dom(&document, "filters"), "None");

    let calls = calls.borrow();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[0].0.kind,
        EventKind::Change {
            item: "A".into(),
            checked: true
        }
    );
    assert_eq!(calls[0].0.label, "All");
    assert!(calls.iter().all(|(_, params)| params == &json!({"source": "scenario"})));
}

#[test]
fn bad_options_fall_back_to_defaults() {
    let resolution = resolve(
        &Options::try_from(json!({
            "type": "radio",
            "trigger": 3,
            "checkAll": "yes",
            "placement": "after",
            "labelAll": "Everything",
            "items": ["A", 7, {"label": "C"}, ["B", false]]
        }))
        .unwrap(),
    );
    let config = &resolution.config;

    assert_eq!(config.item_type(), ItemType::Checkbox);
    assert_eq!(config.trigger(), Trigger::Hover);
    assert!(!config.check_all());
    assert_eq!(config.placement(), Placement::Replace);
    assert_eq!(config.labels().all(), "Everything");
    assert_eq!(
        config.items(),
        &vec![
            Item::checkbox("A", true),
            Item::checkbox("7", true),
            Item::checkbox("B", false)
        ]
    );

    assert_eq!(resolution.diagnostics.len(), 5);
    assert!(resolution.diagnostics.contains(&Diagnostic::TypeMismatch {
        field: "trigger",
        actual: Kind::Number,
        expected: Kind::String,
    }));
    assert!(resolution
        .diagnostics
        .iter()
        .any(|diagnostic| matches!(diagnostic, Diagnostic::InvalidItem { index: 2, .. })));
}

#[test]
fn add_then_remove_through_method_names() {
    let id = ContainerId::from("tags");
    let mut document = host(&["tags"]);
    let mut checklists = Checklists::default();

    checklists.attach(&mut document, &id, &Options::new()).unwrap();

    let diagnostics = checklists
        .invoke(&mut document, &id, "addItems", &json!(["A", ["B", false]]))
        .unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(label_in_dom(&document, "tags"), "Filtered");

    checklists
        .invoke(&mut document, &id, "removeItems", &json!(["A"]))
        .unwrap();

    assert_eq!(list_texts(&document, "tags"), vec!["B"]);
    assert_eq!(
        checklists.get(&id).map(|checklist| checklist.items().clone()),
        Some(vec![Item::checkbox("B", false)])
    );
    assert_eq!(label_in_dom(&document, "tags"), "None");
}

#[test]
fn placement_keeps_or_replaces_host_content() {
    let mut document = host(&["first", "last", "only"]);
    let mut checklists = Checklists::default();

    for (id, placement) in [("first", "prepend"), ("last", "append"), ("only", "replace")] {
        checklists
            .attach(&mut document, &id.into(), &Options::new().with("placement", placement))
            .unwrap();
    }

    let shape = |id: &str| {
        document
            .container(&id.into())
            .map(|container| {
                container
                    .children()
                    .iter()
                    .map(|node| matches!(node, Node::Element(_)))
                    .collect::<Vec<_>>()
            })
            .unwrap()
    };

    assert_eq!(shape("first"), vec![true, false]);
    assert_eq!(shape("last"), vec![false, true]);
    assert_eq!(shape("only"), vec![true]);
}

#[test]
fn destroy_restores_the_container_and_allows_a_fresh_attach() {
    let id = ContainerId::from("menu");
    let mut document = host(&["menu"]);
    let before = document.clone();
    let mut checklists = Checklists::default();
    let append = Options::new().with("placement", "append").with("items", json!(["A"]));

    checklists.attach(&mut document, &id, &append).unwrap();
    checklists.invoke(&mut document, &id, "destroy", &Value::Null).unwrap();

    assert_eq!(document, before);
    assert!(!checklists.is_attached(&id));

    let diagnostics = checklists.invoke(&mut document, &id, "reset", &Value::Null).unwrap();
    assert_eq!(diagnostics, vec![Diagnostic::NoInstance { container: id.clone() }]);

    let checklist = checklists
        .attach(&mut document, &id, &append.clone().with("items", json!(["B", "C"])))
        .unwrap();
    assert_eq!(checklist.items().len(), 2);
}

#[test]
fn reset_restores_the_original_checked_states() {
    let id = ContainerId::from("filters");
    let mut document = host(&["filters"]);
    let mut checklists = Checklists::default();
    let options = Options::new()
        .with("trigger", "click")
        .with("checkAll", true)
        .with("items", json!(["A", ["B", false]]));

    checklists.attach(&mut document, &id, &options).unwrap();
    {
        let checklist = checklists.get_mut(&id).unwrap();
        checklist.click(&mut document, Target::Label).unwrap();
        checklist.click(&mut document, Target::CheckAll).unwrap();
        assert_eq!(checklist.checked_labels(), vec!["A", "B"]);
    }
    checklists
        .invoke(&mut document, &id, "addItems", &json!(["C"]))
        .unwrap();

    checklists.invoke(&mut document, &id, "reset", &Value::Null).unwrap();

    let checklist = checklists.get(&id).unwrap();
    assert_eq!(checklist.checked_labels(), vec!["A"]);
    assert_eq!(checklist.visibility(), Visibility::Collapsed);
    assert_eq!(list_texts(&document, "filters"), vec!["A", "B"]);
    assert_eq!(label_in_dom(&document, "filters"), "Filtered");
}

#[test]
fn check_all_icon_never_toggles_the_list() {
    let id = ContainerId::from("filters");
    let mut document = host(&["filters"]);
    let mut checklists = Checklists::default();
    let calls = Calls::default();

    let options = recorded(
        json!({"trigger": "click", "checkAll": true, "items": [["A", false]]}),
        &calls,
    );
    let checklist = checklists.attach(&mut document, &id, &options).unwrap();

    assert_eq!(
        checklist.click(&mut document, Target::CheckAll).unwrap(),
        Outcome::Changed { changed: 1 }
    );
    assert_eq!(checklist.visibility(), Visibility::Collapsed);

    checklist.click(&mut document, Target::Label).unwrap();
    checklist.mouse_up_outside(&mut document).unwrap();
    assert_eq!(checklist.visibility(), Visibility::Collapsed);

    let kinds = calls
        .borrow()
        .iter()
        .map(|(event, _)| event.kind.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            EventKind::Change {
                item: "A".into(),
                checked: true
            },
            EventKind::Show,
            EventKind::Hide,
        ]
    );
}

#[test]
fn custom_items_render_through_the_template() {
    let id = ContainerId::from("colors");
    let mut document = host(&["colors"]);
    let mut checklists = Checklists::default();
    let options = Options::new()
        .with("type", "custom")
        .with("itemHtml", "<b class=\"swatch\">{{item}}</b>")
        .with("items", json!(["Red", "Green"]));

    checklists.attach(&mut document, &id, &options).unwrap();
    checklists
        .invoke(&mut document, &id, "removeItems", &json!("Red"))
        .unwrap();

    assert_eq!(
        checklists.get(&id).map(|checklist| checklist.items().clone()),
        Some(vec![Item::custom("Green")])
    );
    assert_eq!(list_texts(&document, "colors"), vec!["Green"]);

    let entry = fragment(&document, "colors")
        .and_then(|root| root.child_by_class(LIST_CLASS))
        .and_then(|list| list.child_elements().next())
        .map(|entry| entry.children().clone());
    assert_eq!(
        entry,
        Some(vec![Node::Markup("<b class=\"swatch\">Green</b>".into())])
    );
}

#[test]
fn containers_are_independent() {
    let ids = [ContainerId::from("left"), ContainerId::from("right")];
    let mut document = host(&["left", "right"]);
    let mut checklists = Checklists::default();

    checklists
        .attach_all(&mut document, &ids, &Options::new().with("items", json!(["A", "B"])))
        .unwrap();
    checklists
        .invoke(&mut document, &ids[0], "removeItems", &json!(["A", "B"]))
        .unwrap();

    assert_eq!(list_texts(&document, "left"), Vec::<String>::new());
    assert_eq!(list_texts(&document, "right"), vec!["A", "B"]);

    let left = checklists.get_mut(&ids[0]).unwrap();
    assert_eq!(left.enter(&mut document).unwrap(), Outcome::Toggled(Visibility::Expanded));
    assert_eq!(
        checklists.get(&ids[1]).map(|checklist| checklist.visibility()),
        Some(Visibility::Collapsed)
    );
}
