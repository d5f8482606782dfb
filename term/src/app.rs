use kaboom_core::GameEngine;

use crate::input::Command;
use crate::view::{self, Line};

/// What the run loop should do after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Redraw,
    Unchanged,
    Quit,
}

/// A running game plus the frontend-only bits of state.
pub struct App {
    engine: GameEngine,
    show_full_help: bool,
}

impl App {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            show_full_help: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Applies one command and reports whether the screen is stale.
    pub fn handle(&mut self, command: Command) -> Step {
        let changed = match command {
            Command::Move(direction) => {
                let before = self.engine.cursor();
                self.engine.move_cursor(direction);
                self.engine.cursor() != before
            }
            Command::Dig => {
                let outcome = self.engine.dig_or_chord();
                log::debug!("Dig at {:?}: {:?}", self.engine.cursor(), outcome);
                outcome.has_update()
            }
            Command::Flag => {
                let outcome = self.engine.toggle_flag_or_chord();
                log::debug!("Flag at {:?}: {:?}", self.engine.cursor(), outcome);
                outcome.has_update()
            }
            Command::ToggleHelp => {
                self.show_full_help = !self.show_full_help;
                true
            }
            Command::Quit => return Step::Quit,
        };

        if changed {
            Step::Redraw
        } else {
            Step::Unchanged
        }
    }

    pub fn lines(&self) -> Vec<Line> {
        let mut lines = view::board_lines(&self.engine);
        lines.push(view::status_line(&self.engine));
        lines.extend(view::help_lines(self.show_full_help));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaboom_core::{Board, Direction, EngineState};

    fn app() -> App {
        let board = Board::from_mine_coords((3, 3), &[(0, 1), (2, 1)]).unwrap();
        App::new(GameEngine::with_board(board, 0))
    }

    #[test]
    fn commands_drive_the_engine() {
        let mut app = app();
        assert_eq!(app.handle(Command::Move(Direction::Down)), Step::Redraw);
        assert_eq!(app.handle(Command::Move(Direction::Right)), Step::Redraw);
        assert_eq!(app.handle(Command::Dig), Step::Redraw);
        assert_eq!(app.engine().state(), EngineState::InProgress);

        for command in [
            Command::Move(Direction::Up),
            Command::Flag,
            Command::Move(Direction::Down),
            Command::Move(Direction::Down),
            Command::Flag,
            Command::Move(Direction::Up),
            Command::Dig,
        ] {
            assert_eq!(app.handle(command), Step::Redraw);
        }

        assert_eq!(app.engine().cursor(), (1, 1));
        assert_eq!(app.engine().state(), EngineState::Won);
    }

    #[test]
    fn help_toggle_changes_layout() {
        let mut app = app();
        let short = app.lines().len();
        app.handle(Command::ToggleHelp);
        assert_eq!(app.lines().len(), short + 2);
    }

    #[test]
    fn idle_commands_skip_the_redraw() {
        let mut app = app();
        assert_eq!(app.handle(Command::Move(Direction::Up)), Step::Unchanged);
        assert_eq!(app.handle(Command::Move(Direction::Left)), Step::Unchanged);

        assert_eq!(app.handle(Command::Flag), Step::Redraw);
        assert_eq!(app.handle(Command::Dig), Step::Unchanged);
        assert!(app.engine().cell_at((0, 0)).is_flagged());

        assert_eq!(app.handle(Command::Flag), Step::Redraw);
        assert_eq!(app.handle(Command::Dig), Step::Redraw);
        assert_eq!(app.handle(Command::Dig), Step::Unchanged);
    }

    #[test]
    fn quit_stops_the_loop() {
        assert_eq!(app().handle(Command::Quit), Step::Quit);
    }
}
