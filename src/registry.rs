use indexmap::IndexMap;
use serde_json::Value;
use wrap_context::{arg_context, liab, raw_context};

use crate::{
    checklist::Checklist,
    config::{parse_items, resolve},
    diagnostic::{Diagnostic, Kind},
    dom::Document,
    item::{scalar_text, Item},
    options::Options,
    types::{Choice, ContainerId, Method},
};

/// Checklists attached to the containers of one document.
#[derive(Debug, Default)]
pub struct Checklists {
    instances: IndexMap<ContainerId, Checklist>,

    /// Log diagnostics even for checklists configured without `debug`.
    force_diagnostics: bool,
}

impl Checklists {
    pub fn new(force_diagnostics: bool) -> Self {
        Self {
            instances: IndexMap::default(),
            force_diagnostics,
        }
    }

    pub fn get(&self, container: &ContainerId) -> Option<&Checklist> {
        self.instances.get(container)
    }

    pub fn get_mut(&mut self, container: &ContainerId) -> Option<&mut Checklist> {
        self.instances.get_mut(container)
    }

    pub fn is_attached(&self, container: &ContainerId) -> bool {
        self.instances.contains_key(container)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ContainerId, &mut Checklist)> {
        self.instances.iter_mut()
    }

    /// Attaches a checklist to `container`, or returns the one already there
    /// untouched (its options are not re-applied).
    pub fn attach(
        &mut self,
        document: &mut Document,
        container: &ContainerId,
        options: &Options,
    ) -> anyhow::Result<&mut Checklist> {
        if !self.instances.contains_key(container) {
            let resolution = resolve(options);
            resolution.emit(container, self.force_diagnostics);

            let checklist = raw_context!(Checklist::init(
                document,
                container.clone(),
                resolution.config,
                resolution.diagnostics
            ))?;
            self.instances.insert(container.clone(), checklist);
        }

        match self.instances.get_mut(container) {
            Some(checklist) => anyhow::Ok(checklist),
            None => liab!("Checklist of {:?} was not registered", container.as_str()),
        }
    }

    /// Attaches the same options to every container in `containers`.
    pub fn attach_all(
        &mut self,
        document: &mut Document,
        containers: &[ContainerId],
        options: &Options,
    ) -> anyhow::Result<()> {
        for container in containers {
            raw_context!(self.attach(document, container, options))?;
        }

        anyhow::Ok(())
    }

    pub fn add_items(
        &mut self,
        document: &mut Document,
        container: &ContainerId,
        items: Vec<Item>,
    ) -> anyhow::Result<()> {
        let checklist = arg_context!(self.instance_mut(container))?;
        raw_context!(checklist.add_items(document, items))
    }

    pub fn remove_items(
        &mut self,
        document: &mut Document,
        container: &ContainerId,
        labels: &[String],
    ) -> anyhow::Result<usize> {
        let checklist = arg_context!(self.instance_mut(container))?;
        arg_context!(checklist.remove_items(document, labels))
    }

    /// Destroys and re-attaches with the original configuration and items.
    /// The instance stays registered when its fragment cannot be removed.
    pub fn reset(&mut self, document: &mut Document, container: &ContainerId) -> anyhow::Result<()> {
        let checklist = arg_context!(self.instance_mut(container))?;
        arg_context!(checklist.detach(document))?;

        let config = checklist.config().clone();
        let diagnostics = checklist.diagnostics().clone();
        let checklist = raw_context!(Checklist::init(document, container.clone(), config, diagnostics))?;
        self.instances.insert(container.clone(), checklist);

        anyhow::Ok(())
    }

    /// Removes the checklist from the document and forgets it, so the next
    /// `attach` starts fresh.
    pub fn destroy(&mut self, document: &mut Document, container: &ContainerId) -> anyhow::Result<()> {
        let checklist = arg_context!(self.instance_mut(container))?;
        arg_context!(checklist.detach(document))?;

        self.instances.shift_remove(container);
        anyhow::Ok(())
    }

    /// Calls a method by name. Problems with the call itself are returned as
    /// diagnostics and leave the checklist untouched.
    pub fn invoke(
        &mut self,
        document: &mut Document,
        container: &ContainerId,
        method: &str,
        params: &Value,
    ) -> anyhow::Result<Vec<Diagnostic>> {
        let Some(checklist) = self.instances.get(container) else {
            let diagnostic = Diagnostic::NoInstance {
                container: container.clone(),
            };
            diagnostic.emit(container, true);
            return anyhow::Ok(vec![diagnostic]);
        };

        let enabled = self.force_diagnostics || checklist.config().debug();
        let item_type = checklist.config().item_type();
        let checked = checklist.config().checked();

        let Some(method) = Method::from_name(method) else {
            let diagnostic = Diagnostic::UnsupportedMethod {
                method: method.to_owned(),
                allowed: Method::ALLOWED,
            };
            diagnostic.emit(container, enabled);
            return anyhow::Ok(vec![diagnostic]);
        };

        let mut diagnostics = Vec::default();

        match method {
            Method::AddItems => match params.as_array() {
                Some(specs) => {
                    let items = parse_items("addItems", specs, item_type, checked, &mut diagnostics);
                    raw_context!(self.add_items(document, container, items))?;
                }
                None => diagnostics.push(Diagnostic::TypeMismatch {
                    field: "addItems",
                    actual: Kind::of(params),
                    expected: Kind::Array,
                }),
            },
            Method::RemoveItems => {
                let labels = match params {
                    Value::Array(values) => values
                        .iter()
                        .enumerate()
                        .filter_map(|(index, value)| {
                            let label = scalar_text(value);
                            if label.is_none() {
                                diagnostics.push(Diagnostic::InvalidItem {
                                    field: "removeItems",
                                    index,
                                    reason: "labels to remove must be strings or numbers",
                                });
                            }
                            label
                        })
                        .collect::<Vec<_>>(),
                    Value::String(_) | Value::Number(_) => scalar_text(params).into_iter().collect(),
                    other => {
                        diagnostics.push(Diagnostic::TypeMismatch {
                            field: "removeItems",
                            actual: Kind::of(other),
                            expected: Kind::Array,
                        });
                        Vec::default()
                    }
                };
                arg_context!(self.remove_items(document, container, &labels))?;
            }
            Method::Reset => arg_context!(self.reset(document, container))?,
            Method::Destroy => arg_context!(self.destroy(document, container))?,
        }

        for diagnostic in &diagnostics {
            diagnostic.emit(container, enabled);
        }

        anyhow::Ok(diagnostics)
    }

    fn instance_mut(&mut self, container: &ContainerId) -> anyhow::Result<&mut Checklist> {
        match self.instances.get_mut(container) {
            Some(checklist) => anyhow::Ok(checklist),
            None => liab!("Container {:?} has no checklist attached", container.as_str()),
        }
    }
}
