use alloc::vec;
use core::ops::BitOr;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Outcome of an input action that may either mark or reveal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Mark(MarkOutcome),
    Reveal(RevealOutcome),
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Mark(outcome) => outcome.has_update(),
            Self::Reveal(outcome) => outcome.has_update(),
        }
    }
}

/// One game from the first keypress to a win or a loss.
///
/// Mines are laid out when the engine is built, but the layout is only final after the first
/// open: a mine under the cursor is moved elsewhere and adjacency counts are computed then.
/// Until that point every cell reads as a zero count.
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    cursor: Coord2,
    safe_remaining: CellCount,
    flag_count: CellCount,
    started: bool,
    lost: bool,
    won: bool,
    rng: SmallRng,
}

impl GameEngine {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_board(RandomBoardGenerator::new(seed).generate(config), seed)
    }

    pub fn new_game(rows: Coord, columns: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new((rows, columns), mines)?;
        Ok(Self::new(config, seed))
    }

    pub fn with_board(board: Board, seed: u64) -> Self {
        let safe_remaining = board.safe_cell_count();
        let flag_count = board.count_flags();
        Self {
            board,
            cursor: (0, 0),
            safe_remaining,
            flag_count,
            started: false,
            lost: false,
            won: false,
            // keep relocation independent from the generator stream for the same seed
            rng: SmallRng::seed_from_u64(!seed),
        }
    }

    pub fn state(&self) -> EngineState {
        match (self.started, self.won, self.lost) {
            (_, _, true) => EngineState::Lost,
            (_, true, _) => EngineState::Won,
            (true, _, _) => EngineState::InProgress,
            (false, _, _) => EngineState::NotStarted,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_finished(&self) -> bool {
        self.won || self.lost
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn safe_remaining(&self) -> CellCount {
        self.safe_remaining
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Mines minus placed flags, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flag_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords]
    }

    pub fn cursor_cell(&self) -> Cell {
        self.board[self.cursor]
    }

    /// Glyph to draw at `coords`; the whole board is uncovered once the game is over.
    pub fn glyph_at(&self, coords: Coord2) -> Glyph {
        self.board[coords].glyph(self.is_finished())
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor = direction.step(self.cursor, self.size());
    }

    pub fn set_cursor(&mut self, coords: Coord2) -> Result<()> {
        self.cursor = self.board.validate_coords(coords)?;
        Ok(())
    }

    /// Whether acting on the cursor cell should chord instead of opening or flagging.
    pub fn can_chord(&self) -> bool {
        let cell = self.cursor_cell();
        !self.is_finished() && cell.is_opened() && !cell.is_empty() && !cell.is_mine()
    }

    pub fn can_flag(&self) -> bool {
        !self.is_finished() && !self.cursor_cell().is_opened()
    }

    /// Dig key: chord on an opened cell, open otherwise.
    pub fn dig_or_chord(&mut self) -> RevealOutcome {
        if self.cursor_cell().is_opened() {
            self.chord()
        } else {
            self.open()
        }
    }

    /// Flag key: chord on an opened cell, toggle the flag otherwise.
    pub fn toggle_flag_or_chord(&mut self) -> ActionOutcome {
        if self.cursor_cell().is_opened() {
            ActionOutcome::Reveal(self.chord())
        } else {
            ActionOutcome::Mark(self.flag())
        }
    }

    pub fn flag(&mut self) -> MarkOutcome {
        if !self.can_flag() {
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.board[self.cursor];
        let outcome = cell.toggle_flag();
        if cell.is_flagged() {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        outcome
    }

    pub fn open(&mut self) -> RevealOutcome {
        if self.is_finished() {
            return RevealOutcome::NoChange;
        }

        if !self.started {
            self.start();
        }

        // flagged cells wait for an explicit unflag
        if !self.cursor_cell().is_closed() {
            return RevealOutcome::NoChange;
        }

        self.open_all(self.cursor)
    }

    /// Opens every neighbor of the cursor cell when its flagged neighbors match its count.
    ///
    /// A misplaced flag makes this detonate a mine; the other neighbors are still opened.
    pub fn chord(&mut self) -> RevealOutcome {
        if !self.can_chord() {
            return RevealOutcome::NoChange;
        }

        let flagged = self.board.count_flagged_neighbors(self.cursor);
        if self.cursor_cell().count() != Some(flagged) {
            log::trace!(
                "Chord at {:?} skipped, {} flags for count {:?}",
                self.cursor,
                flagged,
                self.cursor_cell().count()
            );
            return RevealOutcome::NoChange;
        }

        self.board
            .iter_neighbors(self.cursor)
            .map(|neighbor| self.open_all(neighbor))
            .fold(RevealOutcome::NoChange, BitOr::bitor)
    }

    fn start(&mut self) {
        self.board
            .relocate_mine_if_present(self.cursor, &mut self.rng);
        self.board.compute_adjacency();
        self.started = true;
        log::debug!("Game started at {:?}", self.cursor);
    }

    /// Flood fill from `coords`: open it, and keep going through neighbors of empty cells.
    ///
    /// Flagged cells stay flagged, but an empty one still passes the fill on to its neighbors.
    fn open_all(&mut self, coords: Coord2) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut visited: Array2<bool> = Array2::default(nd_index(self.size()));
        let mut pending = vec![coords];

        while let Some(coords) = pending.pop() {
            let Some(cell) = self.board.cell_mut(coords) else {
                continue;
            };
            if cell.is_opened() || visited[nd_index(coords)] {
                continue;
            }
            visited[nd_index(coords)] = true;

            match cell.open() {
                CellOpen::Refused => log::trace!("Fill passing flagged {:?}", coords),
                CellOpen::Detonated => {
                    self.lost = true;
                    log::debug!("Mine detonated at {:?}", coords);
                    outcome = outcome | RevealOutcome::HitMine;
                }
                CellOpen::Safe => {
                    self.safe_remaining -= 1;
                    outcome = outcome | RevealOutcome::Revealed;
                    log::trace!("Opened {:?}, {} safe cells left", coords, self.safe_remaining);

                    if self.safe_remaining == 0 && !self.lost {
                        self.won = true;
                        log::debug!("All safe cells opened");
                        outcome = outcome | RevealOutcome::Won;
                    }
                }
            }

            if self.board[coords].is_empty() {
                pending.extend(self.board.iter_neighbors(coords));
            }
        }

        debug_assert!(!(self.won && self.lost));
        outcome
    }
}
