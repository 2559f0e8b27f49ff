/// A `width`/`height` option value as a terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Cells(u16),
    Percent(u16),
}

impl Dimension {
    /// Accepts `"30"`, `"30ch"`, `"30px"` (one cell per unit) and `"50%"`.
    /// Empty or unparseable values mean "no override".
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        if let Some(percent) = value.strip_suffix('%') {
            return percent
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|percent| *percent <= 100)
                .map(Self::Percent);
        }

        let number = ["ch", "px"]
            .iter()
            .find_map(|unit| value.strip_suffix(unit))
            .unwrap_or(value);

        number.trim().parse::<u16>().ok().map(Self::Cells)
    }

    /// Resolves against the available length.
    pub fn apply(self, available: u16) -> u16 {
        match self {
            Self::Cells(cells) => cells.min(available),
            Self::Percent(percent) => {
                let scaled = u32::from(available) * u32::from(percent) / 100;
                u16::try_from(scaled).unwrap_or(available)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_cells_and_percentages() {
        assert_eq!(Dimension::parse("30"), Some(Dimension::Cells(30)));
        assert_eq!(Dimension::parse("30ch"), Some(Dimension::Cells(30)));
        assert_eq!(Dimension::parse(" 12px "), Some(Dimension::Cells(12)));
        assert_eq!(Dimension::parse("50%"), Some(Dimension::Percent(50)));
    }

    #[test]
    fn rejects_empty_and_unknown_values() {
        assert_eq!(Dimension::parse(""), None);
        assert_eq!(Dimension::parse("auto"), None);
        assert_eq!(Dimension::parse("150%"), None);
        assert_eq!(Dimension::parse("3em"), None);
    }

    #[test]
    fn apply_clamps_to_available_space() {
        assert_eq!(Dimension::Cells(40).apply(20), 20);
        assert_eq!(Dimension::Cells(10).apply(20), 10);
        assert_eq!(Dimension::Percent(50).apply(31), 15);
    }
}
