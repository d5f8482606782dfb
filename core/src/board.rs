use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::prelude::*;
use serde::Serialize;

use crate::*;

/// Grid of cells with a fixed number of mines.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Places `config.mines` mines uniformly at random.
    pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let mines = config.mines();
        let columns = usize::from(config.columns());
        let mut mine_mask: Array2<bool> =
            Array2::from_shape_fn(nd_index(config.size()), |(row, column)| {
                row * columns + column < usize::from(mines)
            });
        mine_mask
            .as_slice_mut()
            .expect("layout should be standard")
            .shuffle(rng);

        log::debug!(
            "Generated {}x{} board with {} mines",
            config.rows(),
            config.columns(),
            mines
        );
        Self::from_mine_mask(mine_mask, mines)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(nd_index(size));

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[nd_index(coords)] = true;
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        GameConfig::new(size, mine_count)?;

        Ok(Self::from_mine_mask(mine_mask, mine_count))
    }

    fn from_mine_mask(mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        Self {
            cells: mine_mask.mapv(Cell::new),
            mine_count,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(nd_index(coords))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_flagged())
            .count() as u8
    }

    pub fn count_flags(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// Moves a mine away from `coords`, if there is one, so the first opened cell is safe.
    ///
    /// The mine is swapped with the k-th safe cell found scanning row-major from the cell
    /// after `coords`, wrapping around the board once, for a uniformly chosen k.
    pub fn relocate_mine_if_present<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R) {
        if !self[coords].is_mine() {
            return;
        }

        let safe_cells = self.safe_cell_count();
        if safe_cells == 0 {
            log::warn!("No safe cell to move the mine at {:?} to", coords);
            return;
        }

        let total = u32::from(self.total_cells());
        let columns = self.columns();
        let start = u32::from(linear_from_coords(coords, columns));
        let mut remaining: CellCount = rng.random_range(1..=safe_cells);

        // start + offset can exceed CellCount on the largest boards
        for offset in 1..=total {
            let target = coords_from_linear(((start + offset) % total) as CellCount, columns);
            if self[target].is_mine() {
                continue;
            }

            remaining -= 1;
            if remaining == 0 {
                self[target].set_mine(true);
                self[coords].set_mine(false);
                log::debug!("Relocated mine from {:?} to {:?}", coords, target);
                return;
            }
        }
    }

    /// Stores the number of adjacent mines in every safe cell.
    pub fn compute_adjacency(&mut self) {
        let (rows, columns) = self.size();
        for row in 0..rows {
            for column in 0..columns {
                let coords = (row, column);
                if self[coords].is_mine() {
                    continue;
                }

                self[coords].reset_value();
                for neighbor in self.iter_neighbors(coords) {
                    if self[neighbor].is_mine() {
                        self[coords].increment_value();
                    }
                }
            }
        }
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(nd_index(coords))
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[nd_index(coords)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[nd_index(coords)]
    }
}
