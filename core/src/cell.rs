use serde::{Deserialize, Serialize};

/// Hidden content of a board cell, fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Mine,
    /// Number of mines among the up-to-8 neighbors.
    Count(u8),
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Blank cells have no mine and no adjacent mines.
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Count(0))
    }

    /// Digit shown on a revealed cell, `None` for blanks and mines.
    pub fn label(self) -> Option<char> {
        match self {
            Self::Count(count @ 1..=8) => char::from_digit(count.into(), 10),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Count(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_blank() {
        assert!(Cell::Count(0).is_blank());
        assert_eq!(Cell::Count(0).label(), None);
    }

    #[test]
    fn positive_count_has_digit_label() {
        assert_eq!(Cell::Count(3).label(), Some('3'));
        assert_eq!(Cell::Count(8).label(), Some('8'));
    }

    #[test]
    fn mine_has_no_label() {
        assert!(Cell::Mine.is_mine());
        assert!(!Cell::Mine.is_blank());
        assert_eq!(Cell::Mine.label(), None);
    }
}
