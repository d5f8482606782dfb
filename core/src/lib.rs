#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::Serialize;

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Board dimensions and mine count, checked so that at least one cell is safe.
///
/// Only built through [`GameConfig::new`] or from an existing [`Board`], so it is not
/// deserializable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, columns): Coord2, mines: CellCount) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(ConfigError::EmptyBoard { rows, columns }.into());
        }

        let cells = mult(rows, columns);
        if mines >= cells {
            return Err(ConfigError::TooManyMines { mines, cells }.into());
        }

        Ok(Self::new_unchecked((rows, columns), mines))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn columns(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    /// 10x10 with 8 mines.
    fn default() -> Self {
        Self::new_unchecked((10, 10), 8)
    }
}

/// Result of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Result of an open or chord, ordered from least to most significant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Won,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    const fn rank(self) -> u8 {
        match self {
            Self::NoChange => 0,
            Self::Revealed => 1,
            Self::Won => 2,
            Self::HitMine => 3,
        }
    }
}

/// Keeps the more significant outcome when a chord opens several cells.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        if rhs.rank() > self.rank() { rhs } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_boards() {
        assert_eq!(
            GameConfig::new((0, 5), 0),
            Err(GameError::InvalidConfiguration(ConfigError::EmptyBoard {
                rows: 0,
                columns: 5
            }))
        );
    }

    #[test]
    fn config_requires_a_safe_cell() {
        assert_eq!(
            GameConfig::new((2, 2), 4),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines {
                mines: 4,
                cells: 4
            }))
        );
        assert!(GameConfig::new((2, 2), 3).is_ok());
        assert!(GameConfig::new((1, 1), 0).is_ok());
    }

    #[test]
    fn largest_board_fits_cell_count() {
        let config = GameConfig::new((Coord::MAX, Coord::MAX), 0).unwrap();
        assert_eq!(config.total_cells(), 65025);
    }

    #[test]
    fn outcomes_merge_by_priority() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!(HitMine | Won, HitMine);
    }

    #[test]
    fn only_no_change_skips_update() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Revealed.has_update());
        assert!(!MarkOutcome::NoChange.has_update());
        assert!(ActionOutcome::Mark(MarkOutcome::Changed).has_update());
        assert!(!ActionOutcome::Reveal(RevealOutcome::NoChange).has_update());
    }
}
