use impl_helper::ImplHelper;
use itertools::Itertools;
use wrap_context::{arg_context, liab, raw_context, wohyna};

use crate::{
    config::Config,
    diagnostic::Diagnostic,
    dom::{Document, Element, Node},
    fragment::{self, LABEL_CLASS, LIST_CLASS},
    hooks::{ChecklistEvent, EventKind},
    item::Item,
    label::LabelState,
    types::{ContainerId, ItemType, Trigger, Visibility},
};

/// Element a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Root,
    Label,
    CheckAll,
    List,
    Item(usize),
}

impl Target {
    /// `self` followed by its ancestors up to the checklist root.
    pub fn bubble_path(self) -> Vec<Target> {
        match self {
            Self::Root => vec![Self::Root],
            Self::Label => vec![Self::Label, Self::Root],
            Self::CheckAll => vec![Self::CheckAll, Self::Label, Self::Root],
            Self::List => vec![Self::List, Self::Root],
            Self::Item(index) => vec![Self::Item(index), Self::List, Self::Root],
        }
    }
}

/// What a click did, for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Toggled(Visibility),
    Changed { changed: usize },
    Navigate(String),
}

/// One checklist attached to one container.
#[derive(Debug, ImplHelper)]
pub struct Checklist {
    #[helper(get)]
    container: ContainerId,

    #[helper(get)]
    config: Config,

    #[helper(get)]
    items: Vec<Item>,

    #[helper(get_copy)]
    visibility: Visibility,

    #[helper(get)]
    diagnostics: Vec<Diagnostic>,
}

impl Checklist {
    /// Renders `config`'s items and places the fragment into `container`.
    pub(crate) fn init(
        document: &mut Document,
        container: ContainerId,
        config: Config,
        diagnostics: Vec<Diagnostic>,
    ) -> anyhow::Result<Self> {
        let items = config.items().clone();
        let fragment = fragment::render(&config, &items, container.as_str());

        arg_context!(document.container_mut(&container))?.place(fragment, config.placement());
        tracing::debug!(container = %container, items = items.len(), "checklist attached");

        anyhow::Ok(Self {
            container,
            config,
            items,
            visibility: Visibility::Collapsed,
            diagnostics,
        })
    }

    /// Removes the fragment from the document.
    pub(crate) fn detach(&self, document: &mut Document) -> anyhow::Result<()> {
        let removed = arg_context!(document.container_mut(&self.container))?
            .remove_fragment(self.container.as_str());
        if removed.is_none() {
            liab!("Checklist fragment of {:?} is missing", self.container.as_str());
        }

        tracing::debug!(container = %self.container, "checklist detached");
        anyhow::Ok(())
    }

    pub fn label_state(&self) -> LabelState {
        fragment::label_state(&self.config, &self.items)
    }

    pub fn label_text(&self) -> &str {
        self.label_state().text(self.config.labels())
    }

    pub fn checked_labels(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Item::Checkbox {
                    label,
                    checked: true,
                } => Some(label.as_str()),
                _ => None,
            })
            .collect_vec()
    }

    fn event(&self, kind: EventKind) -> ChecklistEvent {
        ChecklistEvent::new(&self.container, kind, self.label_text())
    }

    fn fragment_mut<'d>(&self, document: &'d mut Document) -> anyhow::Result<&'d mut Element> {
        arg_context!(document.container_mut(&self.container))?
            .fragment_mut(self.container.as_str())
            .ok_or_else(|| wohyna!("Checklist fragment of {:?} is missing", self.container.as_str()))
    }

    fn list_mut<'d>(&self, document: &'d mut Document) -> anyhow::Result<&'d mut Element> {
        raw_context!(self.fragment_mut(document))?
            .child_by_class_mut(LIST_CLASS)
            .ok_or_else(|| wohyna!("Checklist list of {:?} is missing", self.container.as_str()))
    }

    fn sync_label(&self, document: &mut Document) -> anyhow::Result<()> {
        let text = self.label_text().to_owned();
        let label = raw_context!(self.fragment_mut(document))?
            .child_by_class_mut(LABEL_CLASS)
            .ok_or_else(|| wohyna!("Checklist label of {:?} is missing", self.container.as_str()))?;

        match label.children_mut().first_mut() {
            Some(Node::Text(current)) => *current = text,
            _ => label.children_mut().insert(0, Node::Text(text)),
        }

        anyhow::Ok(())
    }

    fn sync_checkbox(&self, document: &mut Document, index: usize) -> anyhow::Result<()> {
        let checked = self.items.get(index).and_then(Item::checked);
        let list = raw_context!(self.list_mut(document))?;

        let input = list
            .child_elements_mut()
            .nth(index)
            .and_then(|entry| entry.child_elements_mut().next())
            .and_then(|label| label.child_elements_mut().find(|element| element.tag() == "input"))
            .ok_or_else(|| wohyna!("Checkbox #{} is missing", index))?;

        match checked {
            Some(true) => input.set_attr("checked", "checked"),
            Some(false) => input.remove_attr("checked"),
            None => liab!("Item #{} is not a checkbox", index),
        }

        anyhow::Ok(())
    }

    fn set_visibility(&mut self, document: &mut Document, visibility: Visibility) -> anyhow::Result<Outcome> {
        if self.visibility == visibility {
            return anyhow::Ok(Outcome::Ignored);
        }

        self.visibility = visibility;
        let display = match visibility {
            Visibility::Expanded => "block",
            Visibility::Collapsed => "none",
        };
        raw_context!(self.list_mut(document))?.set_css("display", display);

        match visibility {
            Visibility::Expanded => self.config.on_show().fire(&self.event(EventKind::Show)),
            Visibility::Collapsed => self.config.on_hide().fire(&self.event(EventKind::Hide)),
        }

        anyhow::Ok(Outcome::Toggled(visibility))
    }

    /// Pointer entered the checklist.
    pub fn enter(&mut self, document: &mut Document) -> anyhow::Result<Outcome> {
        if self.config.trigger() != Trigger::Hover {
            return anyhow::Ok(Outcome::Ignored);
        }

        arg_context!(self.set_visibility(document, Visibility::Expanded))
    }

    /// Pointer left the checklist.
    pub fn leave(&mut self, document: &mut Document) -> anyhow::Result<Outcome> {
        if self.config.trigger() != Trigger::Hover {
            return anyhow::Ok(Outcome::Ignored);
        }

        arg_context!(self.set_visibility(document, Visibility::Collapsed))
    }

    /// A mouse button was released somewhere outside the checklist.
    pub fn mouse_up_outside(&mut self, document: &mut Document) -> anyhow::Result<Outcome> {
        if self.config.trigger() != Trigger::Click {
            return anyhow::Ok(Outcome::Ignored);
        }

        arg_context!(self.set_visibility(document, Visibility::Collapsed))
    }

    /// Dispatches a click on `target`, bubbling towards the root until a handler
    /// stops propagation.
    pub fn click(&mut self, document: &mut Document, target: Target) -> anyhow::Result<Outcome> {
        for current in target.bubble_path() {
            let (outcome, stop) = match current {
                Target::CheckAll => (arg_context!(self.check_all(document))?, true),
                Target::Label if self.config.trigger() == Trigger::Click => {
                    let visibility = self.visibility.toggled();
                    (arg_context!(self.set_visibility(document, visibility))?, true)
                }
                Target::Item(index) => match self.items.get(index) {
                    Some(Item::Checkbox { checked, .. }) => {
                        let checked = !*checked;
                        (arg_context!(self.set_checked(document, index, checked))?, true)
                    }
                    Some(Item::Link { url, .. }) => (Outcome::Navigate(url.clone()), true),
                    _ => (Outcome::Ignored, false),
                },
                _ => (Outcome::Ignored, false),
            };

            if stop {
                return anyhow::Ok(outcome);
            }
        }

        anyhow::Ok(Outcome::Ignored)
    }

    /// Change of one checkbox: notifies `onChange`, then refreshes the label.
    pub fn set_checked(&mut self, document: &mut Document, index: usize, checked: bool) -> anyhow::Result<Outcome> {
        if self.config.item_type() != ItemType::Checkbox {
            return anyhow::Ok(Outcome::Ignored);
        }

        let label = match self.items.get_mut(index) {
            Some(Item::Checkbox { label, checked: current }) if *current != checked => {
                *current = checked;
                label.clone()
            }
            Some(_) => return anyhow::Ok(Outcome::Ignored),
            None => liab!("Item #{} does not exist", index),
        };

        arg_context!(self.sync_checkbox(document, index))?;
        self.config
            .on_change()
            .fire(&self.event(EventKind::Change { item: label, checked }));
        arg_context!(self.sync_label(document))?;

        anyhow::Ok(Outcome::Changed { changed: 1 })
    }

    /// Checks every checkbox if any is unchecked, otherwise unchecks them all.
    /// Each checkbox that changes gets its own `onChange` notification.
    pub fn check_all(&mut self, document: &mut Document) -> anyhow::Result<Outcome> {
        if !self.config.check_all() || self.config.item_type() != ItemType::Checkbox {
            return anyhow::Ok(Outcome::Ignored);
        }

        let target = self.items.iter().any(|item| item.checked() == Some(false));

        let changed = self
            .items
            .iter_mut()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Item::Checkbox { label, checked } if *checked != target => {
                    *checked = target;
                    Some((index, label.clone()))
                }
                _ => None,
            })
            .collect_vec();

        for (index, _) in changed.iter() {
            arg_context!(self.sync_checkbox(document, *index))?;
        }
        for (_, label) in changed.iter() {
            self.config.on_change().fire(&self.event(EventKind::Change {
                item: label.clone(),
                checked: target,
            }));
        }
        arg_context!(self.sync_label(document))?;

        anyhow::Ok(Outcome::Changed {
            changed: changed.len(),
        })
    }

    /// Appends `items`, rendering only the new entries.
    pub fn add_items(&mut self, document: &mut Document, items: Vec<Item>) -> anyhow::Result<()> {
        let entries = items
            .iter()
            .map(|item| Node::Element(fragment::render_item(&self.config, item)))
            .collect_vec();

        raw_context!(self.list_mut(document))?
            .children_mut()
            .extend(entries);
        self.items.extend(items);

        arg_context!(self.sync_label(document))
    }

    /// Removes every item whose rendered text equals one of `labels`.
    /// Returns how many were removed.
    pub fn remove_items(&mut self, document: &mut Document, labels: &[String]) -> anyhow::Result<usize> {
        let item_html = self.config.item_html().clone();
        let keep = self
            .items
            .iter()
            .map(|item| !labels.contains(&item.text(&item_html)))
            .collect_vec();

        let list = raw_context!(self.list_mut(document))?;
        let mut flags = keep.iter();
        list.children_mut().retain(|node| match node {
            Node::Element(_) => flags.next().copied().unwrap_or(true),
            _ => true,
        });

        let mut flags = keep.iter();
        self.items.retain(|_| flags.next().copied().unwrap_or(true));

        let removed = keep.iter().filter(|keep| !**keep).count();
        arg_context!(self.sync_label(document))?;

        anyhow::Ok(removed)
    }
}
