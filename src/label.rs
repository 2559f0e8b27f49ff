use crate::{config::Labels, types::ItemType};

/// Summary shown on the checklist toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelState {
    All,
    Filtered,
    None,
    Links,
}

impl LabelState {
    /// `total` checkboxes of which `checked` are checked. Counts are ignored for links.
    ///
    /// Custom items are not checkboxes, even when their markup holds inputs, so a
    /// custom checklist always reads [`LabelState::All`].
    pub fn of(item_type: ItemType, total: usize, checked: usize) -> Self {
        if item_type == ItemType::Link {
            Self::Links
        } else if checked >= total {
            Self::All
        } else if checked > 0 {
            Self::Filtered
        } else {
            Self::None
        }
    }

    pub fn text(self, labels: &Labels) -> &str {
        match self {
            Self::All => labels.all(),
            Self::Filtered => labels.filtered(),
            Self::None => labels.none(),
            Self::Links => labels.links(),
        }
    }
}
