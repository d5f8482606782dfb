use core::fmt;
use serde::{Deserialize, Serialize};

use crate::MarkOutcome;

/// What a cell holds underneath, fixed once the board layout is final.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Number of mines among the surrounding cells.
    Count(u8),
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Closed,
    Opened,
    Flagged,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Closed
    }
}

/// Result of trying to open a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellOpen {
    /// Cell was flagged or already open, nothing changed.
    Refused,
    Safe,
    Detonated,
}

/// Semantic glyph for drawing a cell; styling is left to the frontend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Hidden,
    Flag,
    /// Flag placed on a safe cell, only shown once the game is over.
    WrongFlag,
    Mine,
    Empty,
    Number(u8),
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Glyph::*;
        match self {
            Hidden | Empty => f.write_str(" "),
            Flag => f.write_str("f"),
            WrongFlag => f.write_str("x"),
            Mine => f.write_str("*"),
            Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: CellValue,
    state: CellState,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Cell {
    /// A closed cell; counts start at zero until adjacency is computed.
    pub const fn new(is_mine: bool) -> Self {
        Self {
            value: if is_mine {
                CellValue::Mine
            } else {
                CellValue::Count(0)
            },
            state: CellState::Closed,
        }
    }

    pub const fn value(&self) -> CellValue {
        self.value
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Adjacent mine count, `None` for mines.
    pub const fn count(&self) -> Option<u8> {
        match self.value {
            CellValue::Mine => None,
            CellValue::Count(n) => Some(n),
        }
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.value, CellValue::Mine)
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self.value, CellValue::Count(0))
    }

    pub const fn is_opened(&self) -> bool {
        matches!(self.state, CellState::Opened)
    }

    pub const fn is_closed(&self) -> bool {
        matches!(self.state, CellState::Closed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub(crate) fn set_mine(&mut self, is_mine: bool) {
        self.value = Self::new(is_mine).value;
    }

    pub(crate) fn increment_value(&mut self) {
        if let CellValue::Count(n) = &mut self.value {
            *n += 1;
        }
    }

    pub(crate) fn reset_value(&mut self) {
        if let CellValue::Count(n) = &mut self.value {
            *n = 0;
        }
    }

    pub fn open(&mut self) -> CellOpen {
        if !self.is_closed() {
            return CellOpen::Refused;
        }

        self.state = CellState::Opened;
        if self.is_mine() {
            CellOpen::Detonated
        } else {
            CellOpen::Safe
        }
    }

    pub fn toggle_flag(&mut self) -> MarkOutcome {
        use CellState::*;

        self.state = match self.state {
            Closed => Flagged,
            Flagged => Closed,
            Opened => return MarkOutcome::NoChange,
        };
        MarkOutcome::Changed
    }

    /// Glyph for this cell, `reveal_all` uncovers everything once the game is over.
    pub fn glyph(&self, reveal_all: bool) -> Glyph {
        if self.is_flagged() {
            return if reveal_all && !self.is_mine() {
                Glyph::WrongFlag
            } else {
                Glyph::Flag
            };
        }

        if self.is_closed() && !reveal_all {
            return Glyph::Hidden;
        }

        match self.value {
            CellValue::Mine => Glyph::Mine,
            CellValue::Count(0) => Glyph::Empty,
            CellValue::Count(n) => Glyph::Number(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn open_closed_cell_reports_detonation_for_mines() {
        let mut safe = Cell::new(false);
        let mut mine = Cell::new(true);

        assert_eq!(safe.open(), CellOpen::Safe);
        assert_eq!(mine.open(), CellOpen::Detonated);
        assert!(safe.is_opened() && mine.is_opened());
    }

    #[test]
    fn open_refuses_flagged_and_opened_cells() {
        let mut cell = Cell::new(false);
        cell.toggle_flag();
        assert_eq!(cell.open(), CellOpen::Refused);
        assert!(cell.is_flagged());

        cell.toggle_flag();
        assert_eq!(cell.open(), CellOpen::Safe);
        assert_eq!(cell.open(), CellOpen::Refused);
    }

    #[test]
    fn flag_toggle_ignores_opened_cells() {
        let mut cell = Cell::new(false);
        assert_eq!(cell.toggle_flag(), MarkOutcome::Changed);
        assert_eq!(cell.toggle_flag(), MarkOutcome::Changed);
        assert!(cell.is_closed());

        cell.open();
        assert_eq!(cell.toggle_flag(), MarkOutcome::NoChange);
        assert!(cell.is_opened());
    }

    #[test]
    fn mines_never_count_neighbors() {
        let mut cell = Cell::new(true);
        cell.increment_value();
        assert!(cell.is_mine());
        assert!(!cell.is_empty());
        assert_eq!(cell.count(), None);
    }

    #[test]
    fn glyphs_follow_state_and_reveal() {
        let mut numbered = Cell::new(false);
        numbered.increment_value();
        numbered.increment_value();
        assert_eq!(numbered.glyph(false), Glyph::Hidden);
        assert_eq!(numbered.glyph(true), Glyph::Number(2));
        numbered.open();
        assert_eq!(numbered.glyph(false), Glyph::Number(2));

        let mut empty = Cell::new(false);
        empty.open();
        assert_eq!(empty.glyph(false), Glyph::Empty);

        let mine = Cell::new(true);
        assert_eq!(mine.glyph(false), Glyph::Hidden);
        assert_eq!(mine.glyph(true), Glyph::Mine);
    }

    #[test]
    fn wrong_flags_only_show_when_revealed() {
        let mut wrong = Cell::new(false);
        wrong.toggle_flag();
        assert_eq!(wrong.glyph(false), Glyph::Flag);
        assert_eq!(wrong.glyph(true), Glyph::WrongFlag);

        let mut right = Cell::new(true);
        right.toggle_flag();
        assert_eq!(right.glyph(true), Glyph::Flag);
    }

    #[test]
    fn glyph_text() {
        assert_eq!(Glyph::Number(3).to_string(), "3");
        assert_eq!(Glyph::WrongFlag.to_string(), "x");
        assert_eq!(Glyph::Hidden.to_string(), " ");
    }
}
