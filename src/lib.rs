//! A dropdown checklist: a labelled toggle that expands into a list of
//! checkbox, link or custom items, attached to containers of a host
//! element tree.
//!
//! ```no_run
//! use checklist::{Checklists, Container, ContainerId, Document, Options};
//!
//! # fn main() -> anyhow::Result<()> {
//! let id = ContainerId::from("filters");
//! let mut document = Document::new();
//! document.insert(id.clone(), Container::default());
//!
//! let options = Options::new()
//!     .with("items", serde_json::json!(["Open", ["Closed", false]]))
//!     .callback("onChange", |event, _params| println!("{}", event.label));
//!
//! let mut checklists = Checklists::default();
//! checklists.attach(&mut document, &id, &options)?;
//! checklists.invoke(&mut document, &id, "addItems", &serde_json::json!(["Merged"]))?;
//! # Ok(())
//! # }
//! ```

pub mod checklist;
pub mod config;
pub mod diagnostic;
pub mod dimension;
pub mod dom;
pub mod fragment;
pub mod hooks;
pub mod item;
pub mod label;
pub mod options;
pub mod registry;
pub mod types;
pub mod utils;

pub use checklist::{Checklist, Outcome, Target};
pub use config::{resolve, Config, Labels, Resolution};
pub use diagnostic::{Diagnostic, Kind};
pub use dom::{Container, Document, Element, Node};
pub use hooks::{ChecklistEvent, EventKind};
pub use item::Item;
pub use label::LabelState;
pub use options::Options;
pub use registry::Checklists;
pub use types::{ContainerId, ItemType, Placement, Trigger, Visibility};
