use impl_helper::ImplHelper;
use indexmap::IndexMap;
use wrap_context::liab;

use crate::{
    types::{ContainerId, Placement},
    utils::strip_tags,
};

/// Attribute marking the root element of a placed checklist.
pub const KEY_ATTR: &str = "data-checklist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Markup supplied by the host, kept verbatim.
    Markup(String),
}

impl Node {
    pub fn text_content(&self) -> String {
        match self {
            Self::Element(element) => element.text_content(),
            Self::Text(text) => text.clone(),
            Self::Markup(markup) => strip_tags(markup),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, ImplHelper)]
pub struct Element {
    #[helper(get)]
    tag: String,

    #[helper(get)]
    classes: Vec<String>,

    #[helper(get)]
    attrs: IndexMap<String, String>,

    #[helper(get)]
    style: IndexMap<String, String>,

    #[helper(get, get_mut)]
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn css(mut self, property: &str, value: &str) -> Self {
        self.set_css(property, value);
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn text(self, text: &str) -> Self {
        self.child(Node::Text(text.to_owned()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|name| name == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_owned(), value.to_owned());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.shift_remove(name);
    }

    pub fn css_value(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_css(&mut self, property: &str, value: &str) {
        self.style.insert(property.to_owned(), value.to_owned());
    }

    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .map(Node::text_content)
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// First direct child element carrying `class`.
    pub fn child_by_class(&self, class: &str) -> Option<&Element> {
        self.child_elements().find(|element| element.has_class(class))
    }

    pub fn child_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.child_elements_mut().find(|element| element.has_class(class))
    }

    /// Depth-first search over descendant elements, `self` included.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }

        self.child_elements().find_map(|child| child.find(predicate))
    }
}

/// A host element the checklist can be placed into.
#[derive(Debug, Clone, Default, PartialEq, Eq, ImplHelper)]
pub struct Container {
    #[helper(get, get_mut)]
    children: Vec<Node>,
}

fn is_keyed(node: &Node, key: &str) -> bool {
    node.as_element()
        .and_then(|element| element.attr_value(KEY_ATTR))
        .is_some_and(|value| value == key)
}

impl Container {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn place(&mut self, fragment: Element, placement: Placement) {
        let node = Node::Element(fragment);

        match placement {
            Placement::Replace => self.children = vec![node],
            Placement::Prepend => self.children.insert(0, node),
            Placement::Append => self.children.push(node),
        }
    }

    /// Root element of the fragment placed under `key`.
    pub fn fragment(&self, key: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|node| is_keyed(node, key))
            .and_then(Node::as_element)
    }

    pub fn fragment_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .find(|node| is_keyed(node, key))
            .and_then(Node::as_element_mut)
    }

    pub fn remove_fragment(&mut self, key: &str) -> Option<Element> {
        let index = self.children.iter().position(|node| is_keyed(node, key))?;

        match self.children.remove(index) {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// The host element tree: containers by id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    containers: IndexMap<ContainerId, Container>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ContainerId, container: Container) -> Option<Container> {
        self.containers.insert(id, container)
    }

    pub fn container(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.get(id)
    }

    pub fn container_mut(&mut self, id: &ContainerId) -> anyhow::Result<&mut Container> {
        match self.containers.get_mut(id) {
            Some(container) => anyhow::Ok(container),
            None => liab!("Container {:?} does not exist", id.as_str()),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &ContainerId> {
        self.containers.keys()
    }

    pub fn containers(&self) -> impl Iterator<Item = (&ContainerId, &Container)> {
        self.containers.iter()
    }
}
