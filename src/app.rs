use indexmap::IndexMap;
use itertools::Itertools;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Rect, Size},
    style::{Color, Style, Stylize},
    widgets::Clear,
    Frame,
};
use serde_json::{json, Value};
use std::{cell::RefCell, rc::Rc};
use wrap_context::{arg_context, raw_context};

use checklist::{
    ChecklistEvent, Checklists, Container, ContainerId, Diagnostic, Document, EventKind,
    ItemType, Node, Options, Outcome,
};

use crate::{
    event::Event,
    handler::{handle_key_events, handle_mouse_events},
    pane_model::PaneModel,
    pane_view::PaneView,
    textline_model::TextLineModel,
    textline_view::TextLineView,
    tui::Tui,
    view_model::{Render, ViewModel},
};

const HINTS: &str =
    "q quit · Tab focus · a attach · d destroy · r reset · n add · x remove checked · c check all";

type Messages = Rc<RefCell<Vec<String>>>;

#[derive(Debug)]
pub struct App<'a> {
    running: bool,
    document: Document,
    checklists: Checklists,
    options: IndexMap<ContainerId, Options>,
    focus: usize,
    hovered: Option<ContainerId>,
    added: usize,
    messages: Messages,

    panes: Vec<ViewModel<PaneView<'a>, PaneModel>>,
    status_textline: ViewModel<TextLineView<'a>, TextLineModel>,
    hints_textline: ViewModel<TextLineView<'a>, TextLineModel>,
}

fn describe_event(event: &ChecklistEvent, params: &Value) -> String {
    let action = match &event.kind {
        EventKind::Show => "shown".to_owned(),
        EventKind::Hide => "hidden".to_owned(),
        EventKind::Change { item, checked } => {
            format!("{:?} {}", item, if *checked { "checked" } else { "unchecked" })
        }
    };

    let mut message = format!("{}: {} → {}", event.container, action, event.label);
    if params.as_object().is_some_and(|params| !params.is_empty()) {
        message.push_str(&format!(" {}", params));
    }

    message
}

/// Routes all three checklist hooks into `messages`.
fn with_hooks(options: Options, messages: &Messages) -> Options {
    let sink = |messages: &Messages| {
        let messages = messages.clone();
        move |event: &ChecklistEvent, params: &Value| {
            messages.borrow_mut().push(describe_event(event, params));
        }
    };

    options
        .callback("onShow", sink(messages))
        .callback("onHide", sink(messages))
        .callback("onChange", sink(messages))
}

fn split_terminal(terminal_size: Size, panes: usize) -> (Vec<Rect>, Rect, Rect) {
    let terminal_area = Rect::new(0, 0, terminal_size.width, terminal_size.height);

    let [panes_area, status_area, hints_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(terminal_area);

    let count = u32::try_from(panes.max(1)).unwrap_or(u32::MAX);
    let pane_areas = Layout::horizontal(vec![Constraint::Ratio(1, count); panes])
        .split(panes_area)
        .to_vec();

    (pane_areas, status_area, hints_area)
}

impl<'a> App<'a> {
    pub fn new(
        terminal_size: Size,
        containers: Vec<(ContainerId, Options)>,
        force_diagnostics: bool,
    ) -> anyhow::Result<Self> {
        let messages = Messages::default();
        let mut document = Document::new();
        let mut checklists = Checklists::new(force_diagnostics);
        let mut options = IndexMap::new();
        let mut diagnostics = 0;

        for (id, container_options) in containers {
            document.insert(
                id.clone(),
                Container::new(vec![Node::Text(format!("{} content", id))]),
            );

            let container_options = with_hooks(container_options, &messages);
            let checklist = raw_context!(checklists.attach(&mut document, &id, &container_options))?;
            diagnostics += checklist.diagnostics().len();

            options.insert(id, container_options);
        }

        let (pane_areas, status_area, hints_area) = split_terminal(terminal_size, options.len());

        let panes = options
            .keys()
            .zip(pane_areas)
            .enumerate()
            .map(|(index, (id, area))| {
                let nodes = document
                    .container(id)
                    .map(|container| container.children().clone())
                    .unwrap_or_default();

                let mut model = PaneModel::default()
                    .title_set(id.to_string())
                    .is_focused_set(index == 0)
                    .area_set(area);
                model.nodes_update(nodes);

                ViewModel::default().model_set(model)
            })
            .collect_vec();

        let status = if diagnostics > 0 {
            format!("{} option problem(s) corrected", diagnostics)
        } else {
            format!("{} checklist(s) attached", options.len())
        };

        let status_textline = ViewModel::default().model_set(
            TextLineModel::default()
                .area_set(status_area)
                .hide_spans_set(vec![(status, Style::default())])
                .style_set(Style::default().white())
                .alignment_set(Alignment::Left)
                .transparent_set(true),
        );

        let hints_textline = ViewModel::default().model_set(
            TextLineModel::default()
                .area_set(hints_area)
                .hide_spans_set(vec![(HINTS.to_owned(), Style::default())])
                .style_set(Style::default().bg(Color::Rgb(80, 73, 69)))
                .alignment_set(Alignment::Center),
        );

        anyhow::Ok(Self {
            running: true,
            document,
            checklists,
            options,
            focus: 0,
            hovered: None,
            added: 0,
            messages,
            panes,
            status_textline,
            hints_textline,
        })
    }

    pub async fn run<B: Backend>(&mut self, tui: &mut Tui<B>) -> anyhow::Result<()> {
        let mut draw = true;

        while self.running {
            if draw {
                arg_context!(tui.draw(self))?;
                draw = false;
            }

            let event = arg_context!(tui.events.next().await)?;

            match event {
                Event::Tick => self.tick(),
                Event::Key(key_event) => {
                    draw = arg_context!(handle_key_events(key_event, self))?;
                }
                Event::Mouse(mouse_event) => {
                    draw = arg_context!(handle_mouse_events(mouse_event, self))?;
                }
                Event::Resize(width, height) => {
                    arg_context!(self.set_terminal_size(Size::new(width, height)))?;
                    draw = true;
                }
            }
        }

        anyhow::Ok(())
    }

    pub fn tick(&self) {}

    pub fn quit(&mut self) {
        self.running = false;
    }

    fn focused(&self) -> Option<ContainerId> {
        self.options.get_index(self.focus).map(|(id, _)| id.clone())
    }

    fn set_status(&mut self, text: String, style: Style) -> anyhow::Result<()> {
        raw_context!(self.status_textline.with_model_mut(|model| {
            model.hide_spans_update(vec![(text, style)]);
            anyhow::Ok(())
        }))
    }

    fn report(&mut self, diagnostics: Vec<Diagnostic>) {
        self.messages
            .borrow_mut()
            .extend(diagnostics.iter().map(|diagnostic| format!("warning: {}", diagnostic)));
    }

    /// Rebuilds every pane from the document and shows the newest message.
    fn refresh(&mut self) -> anyhow::Result<()> {
        for (index, (id, pane)) in self.options.keys().zip(self.panes.iter_mut()).enumerate() {
            let nodes = self
                .document
                .container(id)
                .map(|container| container.children().clone())
                .unwrap_or_default();
            let is_focused = index == self.focus;

            raw_context!(pane.with_model_mut(move |model| {
                model.nodes_update(nodes).is_focused_update(is_focused);
                anyhow::Ok(())
            }))?;
        }

        let messages = self.messages.borrow_mut().drain(..).collect_vec();
        for message in messages.iter() {
            tracing::info!("{}", message);
        }

        if let Some(last) = messages.last() {
            let style = if last.starts_with("warning") {
                Style::default().yellow()
            } else {
                Style::default().white()
            };
            arg_context!(self.set_status(last.clone(), style))?;
        }

        anyhow::Ok(())
    }

    pub fn set_terminal_size(&mut self, terminal_size: Size) -> anyhow::Result<()> {
        let (pane_areas, status_area, hints_area) = split_terminal(terminal_size, self.panes.len());

        for (pane, area) in self.panes.iter_mut().zip(pane_areas) {
            raw_context!(pane.with_model_mut(|model| {
                model.area_update(area);
                anyhow::Ok(())
            }))?;
        }

        raw_context!(self.status_textline.with_model_mut(|model| {
            model.area_update(status_area);
            anyhow::Ok(())
        }))?;

        raw_context!(self.hints_textline.with_model_mut(|model| {
            model.area_update(hints_area);
            anyhow::Ok(())
        }))?;

        anyhow::Ok(())
    }

    pub fn focus_next(&mut self) -> anyhow::Result<()> {
        self.focus = (self.focus + 1) % self.options.len().max(1);
        arg_context!(self.refresh())
    }

    pub fn attach_focused(&mut self) -> anyhow::Result<()> {
        let Some(id) = self.focused() else {
            return anyhow::Ok(());
        };

        if let Some(options) = self.options.get(&id) {
            let checklist = raw_context!(self.checklists.attach(&mut self.document, &id, options))?;
            let diagnostics = checklist.diagnostics().clone();
            self.report(diagnostics);
        }

        arg_context!(self.refresh())
    }

    pub fn invoke_focused(&mut self, method: &str) -> anyhow::Result<()> {
        let Some(id) = self.focused() else {
            return anyhow::Ok(());
        };

        let diagnostics = raw_context!(self.checklists.invoke(&mut self.document, &id, method, &Value::Null))?;
        if !self.checklists.is_attached(&id) && self.hovered.as_ref() == Some(&id) {
            self.hovered = None;
        }
        self.report(diagnostics);

        arg_context!(self.refresh())
    }

    pub fn add_item_to_focused(&mut self) -> anyhow::Result<()> {
        let Some(id) = self.focused() else {
            return anyhow::Ok(());
        };
        let Some(item_type) = self.checklists.get(&id).map(|checklist| checklist.config().item_type()) else {
            return arg_context!(self.invoke_focused("addItems"));
        };

        self.added += 1;
        let label = format!("Item {}", self.added);
        let spec = match item_type {
            ItemType::Link => json!([label, format!("https://example.com/{}", self.added)]),
            ItemType::Checkbox | ItemType::Custom => json!(label),
        };

        let diagnostics = raw_context!(self.checklists.invoke(&mut self.document, &id, "addItems", &json!([spec])))?;
        self.report(diagnostics);

        arg_context!(self.refresh())
    }

    pub fn remove_checked_from_focused(&mut self) -> anyhow::Result<()> {
        let Some(id) = self.focused() else {
            return anyhow::Ok(());
        };
        let labels = match self.checklists.get(&id) {
            Some(checklist) => checklist.checked_labels().into_iter().map(str::to_owned).collect_vec(),
            None => Vec::default(),
        };

        let diagnostics = raw_context!(self.checklists.invoke(&mut self.document, &id, "removeItems", &json!(labels)))?;
        self.report(diagnostics);

        arg_context!(self.refresh())
    }

    pub fn check_all_focused(&mut self) -> anyhow::Result<()> {
        let Some(id) = self.focused() else {
            return anyhow::Ok(());
        };

        if let Some(checklist) = self.checklists.get_mut(&id) {
            raw_context!(checklist.check_all(&mut self.document))?;
        }

        arg_context!(self.refresh())
    }

    /// Pointer moved: leave the previously hovered checklist, enter the new one.
    pub fn pointer_move(&mut self, column: u16, row: u16) -> anyhow::Result<bool> {
        let hovered = self
            .options
            .keys()
            .zip(self.panes.iter())
            .find(|(_, pane)| pane.model().contains(column, row))
            .map(|(id, _)| id.clone());

        if hovered == self.hovered {
            return anyhow::Ok(false);
        }

        if let Some(previous) = self.hovered.take() {
            if let Some(checklist) = self.checklists.get_mut(&previous) {
                raw_context!(checklist.leave(&mut self.document))?;
            }
        }

        if let Some(current) = hovered.as_ref() {
            if let Some(checklist) = self.checklists.get_mut(current) {
                raw_context!(checklist.enter(&mut self.document))?;
            }
        }

        self.hovered = hovered;
        arg_context!(self.refresh())?;

        anyhow::Ok(true)
    }

    /// Left button released: a click for the checklist under the pointer, an
    /// outside release for every other one.
    pub fn pointer_release(&mut self, column: u16, row: u16) -> anyhow::Result<bool> {
        let hits = self
            .panes
            .iter()
            .map(|pane| pane.model().hit(column, row))
            .collect_vec();

        if let Some(index) = self
            .panes
            .iter()
            .position(|pane| pane.model().area().contains((column, row).into()))
        {
            self.focus = index;
        }

        for (id, hit) in self.options.keys().zip(hits) {
            let Some(checklist) = self.checklists.get_mut(id) else {
                continue;
            };

            let outcome = match hit {
                Some(target) => raw_context!(checklist.click(&mut self.document, target))?,
                None => raw_context!(checklist.mouse_up_outside(&mut self.document))?,
            };

            if let Outcome::Navigate(url) = outcome {
                self.messages.borrow_mut().push(format!("{}: open {}", id, url));
            }
        }

        arg_context!(self.refresh())?;

        anyhow::Ok(true)
    }
}

impl<'a> Render for App<'a> {
    fn render(&mut self, frame: &mut Frame) {
        frame.render_widget(Clear, frame.area());

        for pane in self.panes.iter_mut() {
            pane.render(frame);
        }
        self.status_textline.render(frame);
        self.hints_textline.render(frame);
    }
}
