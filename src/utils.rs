use std::fmt::Debug;

use crate::types::DEBUG_PRINT_LIMIT;

pub const CLIP_ENDING: &str = "…";

pub fn clip_string(mut string: String, ending: &str, length: usize) -> String {
    if length == 0 {
        string = String::default();
    } else if string.chars().count() > length {
        string = format!(
            "{}{}",
            string
                .chars()
                .take(length.saturating_sub(ending.chars().count()))
                .collect::<String>(),
            ending
        );
    }

    string
}

pub fn debug_print_limit() -> usize {
    *DEBUG_PRINT_LIMIT.get().unwrap_or(&32)
}

/// Debug rendering of an argument for error contexts.
pub fn describe_arg<T: Debug + ?Sized>(value: &T) -> String {
    clip_string(format!("{:?}", value), CLIP_ENDING, debug_print_limit())
}

/// Text content of a markup fragment: tags dropped, text kept as written.
pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;

    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clip_string_keeps_short_strings() {
        assert_eq!(clip_string("abc".into(), CLIP_ENDING, 3), "abc");
    }

    #[test]
    fn clip_string_appends_ending() {
        assert_eq!(clip_string("abcdef".into(), CLIP_ENDING, 4), "abc…");
        assert_eq!(clip_string("abcdef".into(), CLIP_ENDING, 0), "");
    }

    #[test]
    fn strip_tags_returns_text_content() {
        assert_eq!(strip_tags("<b>Bold</b>  <i>item</i>"), "Bold  item");
        assert_eq!(strip_tags(" <b> A\tB </b>"), "  A\tB ");
        assert_eq!(strip_tags("plain"), "plain");
        assert_eq!(strip_tags("<img src='x'/>"), "");
    }
}
