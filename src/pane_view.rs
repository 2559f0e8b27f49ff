use itertools::Itertools;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use checklist::utils::{clip_string, CLIP_ENDING};

use crate::{
    pane_model::{PaneModel, RowKind, CHECKALL_WIDTH},
    view_model::Render,
};

const LABEL_BG: Color = Color::Rgb(80, 73, 69);
const FOCUS_FG: Color = Color::Rgb(214, 94, 14);

#[derive(Debug, Clone, Default)]
pub struct PaneView<'a> {
    area: Rect,
    block: Block<'a>,
    rows: Vec<(Rect, Line<'a>)>,
}

fn row_line<'a>(kind: &RowKind, width: u16) -> Line<'a> {
    let width = usize::from(width);

    match kind {
        RowKind::Host(text) => Line::from(clip_string(text.clone(), CLIP_ENDING, width)).dim(),
        RowKind::Label {
            text,
            check_all,
            expanded,
        } => {
            let arrow = if *expanded { "▾ " } else { "▸ " };
            let icon = if *check_all { "[*]" } else { "" };
            let text_width = width.saturating_sub(arrow.chars().count() + usize::from(CHECKALL_WIDTH));
            let text = clip_string(text.clone(), CLIP_ENDING, text_width);
            let padding = width.saturating_sub(arrow.chars().count() + text.chars().count() + icon.len());

            Line::from(vec![
                Span::raw(arrow),
                Span::raw(text).bold(),
                Span::raw(" ".repeat(padding)),
                Span::raw(icon),
            ])
            .style(Style::default().bg(LABEL_BG))
        }
        RowKind::Item {
            text,
            checked,
            link,
            ..
        } => {
            let marker = match (checked, link) {
                (Some(true), _) => "[x] ",
                (Some(false), _) => "[ ] ",
                (None, true) => "↗ ",
                (None, false) => "  ",
            };
            let text = clip_string(text.clone(), CLIP_ENDING, width.saturating_sub(marker.chars().count()));
            let text = if *link {
                Span::raw(text).underlined()
            } else {
                Span::raw(text)
            };

            Line::from(vec![Span::raw(marker), text])
        }
    }
}

impl<'a> From<&PaneModel> for PaneView<'a> {
    fn from(model: &PaneModel) -> Self {
        let title_style = if *model.is_focused() {
            Style::default().fg(FOCUS_FG).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let block = Block::bordered()
            .title(Span::styled(format!(" {} ", model.title()), title_style))
            .border_style(title_style);

        let rows = model
            .rows()
            .iter()
            .map(|row| (*row.area(), row_line(row.kind(), row.area().width)))
            .collect_vec();

        Self {
            area: *model.area(),
            block,
            rows,
        }
    }
}

impl<'a> Render for PaneView<'a> {
    fn render(&mut self, frame: &mut Frame) {
        frame.render_widget(Clear, self.area);
        frame.render_widget(&self.block, self.area);

        for (area, line) in self.rows.iter() {
            frame.render_widget(Paragraph::new(line.clone()), *area);
        }
    }
}
