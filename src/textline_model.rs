use impl_helper::ImplHelper;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
};

use checklist::utils::{clip_string, CLIP_ENDING};

pub type Span = (String, Style);

/// One line of text; spans are clipped to the area width.
#[derive(Default, Debug, ImplHelper)]
pub struct TextLineModel {
    #[helper(get /* set and upd are custom */)]
    area: Rect,

    #[helper(/* set and upd are custom */)]
    hide_spans: Vec<Span>,

    #[helper(get)]
    show_spans: Vec<Span>,

    #[helper(get, set)]
    style: Style,

    #[helper(get, set)]
    alignment: Alignment,

    #[helper(get, set)]
    transparent: bool,
}

impl TextLineModel {
    fn make_show_spans(&mut self) {
        let mut remaining = usize::from(self.area.width);

        self.show_spans = self
            .hide_spans
            .iter()
            .map(|(content, style)| {
                let content = clip_string(content.clone(), CLIP_ENDING, remaining);
                remaining = remaining.saturating_sub(content.chars().count());
                (content, *style)
            })
            .collect();
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn area_set(mut self, value: Rect) -> Self {
        self.area_update(value);
        self
    }

    pub fn area_update(&mut self, value: Rect) -> &mut Self {
        self.area = value;
        self.make_show_spans();
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn hide_spans_set(mut self, value: Vec<Span>) -> Self {
        self.hide_spans_update(value);
        self
    }

    pub fn hide_spans_update(&mut self, value: Vec<Span>) -> &mut Self {
        self.hide_spans = value;
        self.make_show_spans();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spans_share_the_area_width() {
        let model = TextLineModel::default()
            .area_set(Rect::new(0, 0, 6, 1))
            .hide_spans_set(vec![
                ("abcd".into(), Style::default()),
                ("efgh".into(), Style::default()),
            ]);

        let contents = model
            .show_spans()
            .iter()
            .map(|(content, _)| content.as_str())
            .collect::<Vec<_>>();
        assert_eq!(contents, vec!["abcd", "e…"]);
    }
}
