use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Index into an `Array2` laid out as rows by columns.
pub(crate) fn nd_index((row, column): Coord2) -> [usize; 2] {
    [row.into(), column.into()]
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Maps a row-major linear index back to coordinates on a board with `columns` columns.
pub(crate) fn coords_from_linear(index: CellCount, columns: Coord) -> Coord2 {
    let columns = CellCount::from(columns);
    ((index / columns) as Coord, (index % columns) as Coord)
}

pub(crate) fn linear_from_coords((row, column): Coord2, columns: Coord) -> CellCount {
    CellCount::from(row) * CellCount::from(columns) + CellCount::from(column)
}

/// One step of cursor movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Moves `coords` one step, staying inside `bounds`.
    pub fn step(self, (row, column): Coord2, (rows, columns): Coord2) -> Coord2 {
        use Direction::*;
        match self {
            Up => (row.saturating_sub(1), column),
            Down if row + 1 < rows => (row + 1, column),
            Left => (row, column.saturating_sub(1)),
            Right if column + 1 < columns => (row, column + 1),
            Down | Right => (row, column),
        }
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, column) = coords;
    let (d_row, d_column) = delta;
    let (rows, columns) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_column = column.checked_add_signed(d_column.try_into().ok()?)?;
    if next_column >= columns {
        return None;
    }

    Some((next_row, next_column))
}

/// In-bounds Moore neighborhood of a cell, at most 8 coordinates.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn center_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn cursor_steps_clamp_at_edges() {
        let bounds = (2, 3);
        assert_eq!(Direction::Up.step((0, 1), bounds), (0, 1));
        assert_eq!(Direction::Left.step((1, 0), bounds), (1, 0));
        assert_eq!(Direction::Down.step((1, 2), bounds), (1, 2));
        assert_eq!(Direction::Right.step((1, 2), bounds), (1, 2));
        assert_eq!(Direction::Down.step((0, 2), bounds), (1, 2));
        assert_eq!(Direction::Left.step((1, 2), bounds), (1, 1));
    }

    #[test]
    fn linear_index_round_trips_through_coords() {
        assert_eq!(coords_from_linear(7, 3), (2, 1));
        assert_eq!(linear_from_coords((2, 1), 3), 7);
    }
}
