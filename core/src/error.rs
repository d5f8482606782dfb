use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Invalid coordinates")]
    InvalidCoords,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must have at least one row and one column, got {rows}x{columns}")]
    EmptyBoard { rows: Coord, columns: Coord },
    #[error("{mines} mines do not fit on a board of {cells} cells, at least one cell must be safe")]
    TooManyMines { mines: CellCount, cells: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
