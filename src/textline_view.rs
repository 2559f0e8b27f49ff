use itertools::Itertools;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::{textline_model::TextLineModel, view_model::Render};

/// Status or hint line drawn from a [`TextLineModel`].
#[derive(Debug, Default)]
pub struct TextLineView<'a> {
    area: Rect,
    paragraph: Paragraph<'a>,
    clear: bool,
}

impl<'a> From<&TextLineModel> for TextLineView<'a> {
    fn from(model: &TextLineModel) -> Self {
        let spans = model
            .show_spans()
            .iter()
            .map(|(content, style)| Span::styled(content.clone(), *style))
            .collect_vec();

        let paragraph = Paragraph::new(Line::from(spans)).alignment(*model.alignment());

        // Transparent lines paint only their spans over what is already drawn.
        let (paragraph, clear) = if *model.transparent() {
            (paragraph, false)
        } else {
            (paragraph.style(*model.style()), true)
        };

        Self {
            area: *model.area(),
            paragraph,
            clear,
        }
    }
}

impl<'a> Render for TextLineView<'a> {
    fn render(&mut self, frame: &mut Frame) {
        if self.clear {
            frame.render_widget(Clear, self.area);
        }

        frame.render_widget(&self.paragraph, self.area);
    }
}
