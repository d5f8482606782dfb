//! Text layout of the board: a box-drawing grid split into toned spans.
//!
//! Nothing here touches the terminal, the renderer maps tones to colors.

use kaboom_core::{Coord, Coord2, GameEngine};

use crate::input::{ACTION_BINDINGS, APP_BINDINGS, Binding, MOVE_BINDINGS};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Unopened,
    Selected,
    Flagged,
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        let mut line = Self::default();
        line.push(text, Tone::Plain);
        line
    }

    /// Appends text, merging it into the last span when the tone matches.
    pub fn push(&mut self, text: impl Into<String>, tone: Tone) {
        let text = text.into();
        match self.spans.last_mut() {
            Some(last) if last.tone == tone => last.text.push_str(&text),
            _ => self.spans.push(Span { text, tone }),
        }
    }

    /// Width in terminal columns, every glyph used here is single-width.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|span| span.text.chars().count()).sum()
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

const SEGMENT: &str = "───";

struct Edges {
    left: &'static str,
    middle: &'static str,
    right: &'static str,
}

const TOP: Edges = Edges { left: "┌", middle: "┬", right: "┐" };
const MIDDLE: Edges = Edges { left: "├", middle: "┼", right: "┤" };
const BOTTOM: Edges = Edges { left: "└", middle: "┴", right: "┘" };
const ITEMS: Edges = Edges { left: "│", middle: "│", right: "│" };

struct GridBuilder<'a> {
    engine: &'a GameEngine,
    lines: Vec<Line>,
}

impl<'a> GridBuilder<'a> {
    /// Tone of a grid segment from the cells it touches.
    fn tone(&self, cells: &[Coord2]) -> Tone {
        if self.engine.is_lost() {
            return Tone::Lost;
        }
        if self.engine.is_won() {
            return Tone::Won;
        }
        if cells.contains(&self.engine.cursor()) {
            return Tone::Selected;
        }
        if cells.iter().any(|&coords| self.engine.cell_at(coords).is_closed()) {
            return Tone::Unopened;
        }
        if cells.iter().any(|&coords| self.engine.cell_at(coords).is_flagged()) {
            return Tone::Flagged;
        }
        Tone::Plain
    }

    /// Draws one text row of the grid for board `row`.
    ///
    /// Border rows between two board rows (`below`) are toned by the cells on both sides.
    fn draw_row(
        &mut self,
        row: Coord,
        below: bool,
        edges: &Edges,
        spacing: impl Fn(Coord) -> String,
    ) {
        let columns = self.engine.size().1;
        let touching = |column: Coord| {
            let mut cells = vec![(row, column)];
            if below {
                cells.push((row + 1, column));
            }
            cells
        };

        let mut line = Line::default();
        line.push(edges.left, self.tone(&touching(0)));

        for column in 0..columns - 1 {
            line.push(spacing(column), self.tone(&touching(column)));

            let mut corner = touching(column);
            corner.extend(touching(column + 1));
            line.push(edges.middle, self.tone(&corner));
        }

        let last = columns - 1;
        line.push(spacing(last) + edges.right, self.tone(&touching(last)));
        self.lines.push(line);
    }

    fn build(mut self) -> Vec<Line> {
        let rows = self.engine.size().0;
        let segment = |_: Coord| SEGMENT.to_string();

        self.draw_row(0, false, &TOP, segment);
        for row in 0..rows {
            let engine = self.engine;
            self.draw_row(row, false, &ITEMS, |column| {
                format!(" {} ", engine.glyph_at((row, column)))
            });

            if row + 1 < rows {
                self.draw_row(row, true, &MIDDLE, segment);
            }
        }
        self.draw_row(rows - 1, false, &BOTTOM, segment);

        self.lines
    }
}

/// The board grid, one line per text row.
pub fn board_lines(engine: &GameEngine) -> Vec<Line> {
    GridBuilder {
        engine,
        lines: Vec::new(),
    }
    .build()
}

pub fn status_line(engine: &GameEngine) -> Line {
    let mut line = Line::default();
    if engine.is_lost() {
        line.push("Boom! You lost.", Tone::Lost);
    } else if engine.is_won() {
        line.push("All clear, you won!", Tone::Won);
    } else {
        line.push(format!("Mines left: {}", engine.mines_left()), Tone::Plain);
    }
    line
}

fn join(bindings: &[&Binding]) -> Line {
    let text = bindings
        .iter()
        .map(|binding| format!("{} {}", binding.keys, binding.help))
        .collect::<Vec<_>>()
        .join(" • ");
    Line::plain(text)
}

pub fn help_lines(full: bool) -> Vec<Line> {
    if full {
        [&MOVE_BINDINGS[..], &ACTION_BINDINGS[..], &APP_BINDINGS[..]]
            .iter()
            .map(|group| join(&group.iter().collect::<Vec<_>>()))
            .collect()
    } else {
        let short: Vec<&Binding> = ACTION_BINDINGS.iter().chain(APP_BINDINGS.iter()).collect();
        vec![join(&short)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaboom_core::Board;

    fn engine(size: Coord2, mines: &[Coord2]) -> GameEngine {
        GameEngine::with_board(Board::from_mine_coords(size, mines).unwrap(), 0)
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::text).collect()
    }

    #[test]
    fn draws_closed_grid() {
        let engine = engine((2, 3), &[(0, 0)]);
        assert_eq!(
            texts(&board_lines(&engine)),
            [
                "┌───┬───┬───┐",
                "│   │   │   │",
                "├───┼───┼───┤",
                "│   │   │   │",
                "└───┴───┴───┘",
            ]
        );
    }

    #[test]
    fn draws_counts_and_reveals_on_loss() {
        let mut engine = engine((2, 2), &[(0, 0)]);
        engine.set_cursor((1, 1)).unwrap();
        engine.dig_or_chord();
        assert_eq!(texts(&board_lines(&engine))[3], "│   │ 1 │");

        engine.set_cursor((0, 0)).unwrap();
        engine.dig_or_chord();
        let lines = board_lines(&engine);
        assert_eq!(texts(&lines)[1], "│ * │ 1 │");
        assert!(lines.iter().flat_map(|line| &line.spans).all(|span| span.tone == Tone::Lost));
    }

    #[test]
    fn single_cell_board() {
        let engine = engine((1, 1), &[]);
        assert_eq!(texts(&board_lines(&engine)), ["┌───┐", "│   │", "└───┘"]);
    }

    #[test]
    fn cursor_segments_are_selected() {
        let engine = engine((2, 2), &[(1, 1)]);
        let lines = board_lines(&engine);

        // top-left corner and the cell under the cursor
        assert_eq!(lines[0].spans[0].tone, Tone::Selected);
        assert_eq!(lines[1].spans[0].tone, Tone::Selected);
        // the right-hand cell only touches closed cells
        assert_eq!(lines[1].spans.last().unwrap().tone, Tone::Unopened);
    }

    #[test]
    fn open_and_flagged_cells_have_their_own_tones() {
        let mut engine = engine((1, 3), &[(0, 2)]);
        engine.set_cursor((0, 1)).unwrap();
        engine.flag();
        engine.set_cursor((0, 0)).unwrap();
        engine.dig_or_chord();
        engine.set_cursor((0, 2)).unwrap();

        let row = &board_lines(&engine)[1];
        assert_eq!(row.text(), "│   │ f │   │");
        let tones: Vec<Tone> = row.spans.iter().map(|span| span.tone).collect();
        assert_eq!(tones, [Tone::Plain, Tone::Flagged, Tone::Selected]);
    }

    #[test]
    fn status_reports_mines_left() {
        let mut engine = engine((2, 2), &[(0, 0)]);
        assert_eq!(status_line(&engine).text(), "Mines left: 1");
        engine.flag();
        engine.set_cursor((0, 1)).unwrap();
        engine.flag();
        assert_eq!(status_line(&engine).text(), "Mines left: -1");
    }

    #[test]
    fn help_expands_when_toggled() {
        assert_eq!(help_lines(false).len(), 1);
        assert_eq!(help_lines(true).len(), 3);
        assert!(help_lines(false)[0].text().contains("z/j dig"));
    }
}
