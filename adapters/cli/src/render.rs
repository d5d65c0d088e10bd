use std::fmt::Write as _;

use ant_trail_core::{Board, Cell, Facing, TraceEntry};

const EMPTY: char = '.';
const WALL: char = '#';
const START: char = 'S';
const GOAL: char = 'G';

/// Draws the board as text, one row per line, with row `y = 1` at the top.
///
/// The ant, when present, is drawn over whatever occupies its cell.
pub(crate) fn board(board: &Board, ant: Option<TraceEntry>) -> String {
    let width = usize::try_from(board.width()).unwrap_or(usize::MAX);
    let height = usize::try_from(board.height()).unwrap_or(usize::MAX);
    let mut rows = vec![vec![EMPTY; width]; height];

    let mut paint = |cell: Cell, glyph: char| {
        let column = cell.x().checked_sub(1).and_then(|x| usize::try_from(x).ok());
        let row = cell.y().checked_sub(1).and_then(|y| usize::try_from(y).ok());
        if let Some(slot) = row
            .zip(column)
            .and_then(|(row, column)| rows.get_mut(row)?.get_mut(column))
        {
            *slot = glyph;
        }
    };
    paint(board.start(), START);
    paint(board.goal(), GOAL);
    for wall in board.walls() {
        paint(wall, WALL);
    }
    if let Some(entry) = ant {
        paint(entry.position, facing_glyph(entry.facing));
    }

    let mut output = String::with_capacity(height * (width + 1));
    for row in rows {
        output.extend(row);
        output.push('\n');
    }
    output
}

/// Formats a trace as `(x, y) facing` lines prefixed with their index.
pub(crate) fn trace(entries: &[TraceEntry]) -> String {
    let mut output = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let _ = writeln!(output, "{index:>3}: {} {}", entry.position, entry.facing);
    }
    output
}

fn facing_glyph(facing: Facing) -> char {
    match facing {
        Facing::Right => '>',
        Facing::Left => '<',
        Facing::Up => '^',
        Facing::Down => 'v',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> Board {
        Board::new(3, 3, [Cell::new(2, 2)], Cell::new(1, 1), Cell::new(3, 1)).expect("valid board")
    }

    #[test]
    fn empty_board_shows_landmarks() {
        assert_eq!(board(&sample_board(), None), "S.G\n.#.\n...\n");
    }

    #[test]
    fn ant_is_drawn_over_its_cell() {
        let ant = TraceEntry::new(Cell::new(1, 1), Facing::Right);
        assert_eq!(board(&sample_board(), Some(ant)), ">.G\n.#.\n...\n");

        let ant = TraceEntry::new(Cell::new(3, 3), Facing::Down);
        assert_eq!(board(&sample_board(), Some(ant)), "S.G\n.#.\n..v\n");
    }

    #[test]
    fn every_wall_is_drawn() {
        let layout = Board::new(
            4,
            2,
            [Cell::new(2, 1), Cell::new(3, 1), Cell::new(4, 2)],
            Cell::new(1, 1),
            Cell::new(4, 1),
        )
        .expect("valid board");
        assert_eq!(board(&layout, None), "S##G\n...#\n");
    }

    #[test]
    fn trace_lines_are_numbered() {
        let entries = [
            TraceEntry::new(Cell::new(1, 1), Facing::Right),
            TraceEntry::new(Cell::new(1, 2), Facing::Down),
        ];
        assert_eq!(trace(&entries), "  0: (1, 1) right\n  1: (1, 2) down\n");
    }
}
