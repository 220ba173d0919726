//! Run detection around a freshly placed mark.
//!
//! Only the four lines through the placed cell can have changed, so each check walks
//! outward from that cell in both directions of every axis and stops as soon as the
//! run is long enough. The cost depends on the win length, never on the board size.

use crate::core::{board::Board, player::Symbol, position::Move};
use std::fmt;
use tracing::instrument;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// East/west.
    Horizontal,
    /// North/south.
    Vertical,
    /// Southeast/northwest.
    Diagonal,
    /// Southwest/northeast.
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// One step toward the axis's positive end, as `(d_row, d_col)`.
    pub fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Horizontal => "row",
            Axis::Vertical => "column",
            Axis::Diagonal => "diagonal",
            Axis::AntiDiagonal => "anti-diagonal",
        };
        f.write_str(name)
    }
}

/// True when `last_move` completes a run of at least `win_length`.
///
/// A missing move means nothing has been played yet and is never a win.
#[instrument(level = "trace", skip(board))]
pub fn check_win(board: &Board, last_move: Option<&Move>, win_length: usize) -> bool {
    let Some(last_move) = last_move else {
        return false;
    };
    winning_axis(board, last_move, win_length).is_some()
}

pub fn winning_axis(board: &Board, mv: &Move, win_length: usize) -> Option<Axis> {
    Axis::ALL
        .into_iter()
        .find(|axis| run_length(board, mv, *axis, win_length) >= win_length)
}

/// Length of the run through `mv` along `axis`, counting the move's own cell.
///
/// The walk gives up once `win_length` is reached, so longer runs report `win_length`.
pub fn run_length(board: &Board, mv: &Move, axis: Axis, win_length: usize) -> usize {
    let needed = win_length.saturating_sub(1);
    let (d_row, d_col) = axis.step();
    let forward = count_direction(board, mv, d_row, d_col, needed);
    let backward = count_direction(board, mv, -d_row, -d_col, needed - forward);
    1 + forward + backward
}

fn count_direction(board: &Board, mv: &Move, d_row: isize, d_col: isize, limit: usize) -> usize {
    let mut count = 0;
    let mut pos = mv.pos;

    while count < limit {
        match pos.step(d_row, d_col, board.size()) {
            Some(next) if board.get(next) == Some(mv.symbol) => {
                pos = next;
                count += 1;
            }
            _ => break,
        }
    }

    count
}

/// Finds any completed run on the board without knowing which mark was placed last.
///
/// Used when a game is restored: the page may have closed after a mark was drawn but
/// before it was evaluated. Cells of `preferred` are tried first so the restored
/// current player is credited when both symbols somehow hold a run.
#[instrument(level = "debug", skip(board))]
pub fn scan_for_win(board: &Board, win_length: usize, preferred: Symbol) -> Option<Move> {
    [preferred, preferred.other()]
        .into_iter()
        .flat_map(|symbol| {
            board
                .occupied()
                .filter(move |(_, owner)| *owner == symbol)
                .map(|(pos, owner)| Move::new(pos, owner))
        })
        .find(|mv| winning_axis(board, mv, win_length).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::CellPos;

    fn board_with(size: usize, marks: &[(usize, usize, Symbol)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for (row, col, symbol) in marks {
            board.place(CellPos::new(*row, *col), *symbol).unwrap();
        }
        board
    }

    fn mv(row: usize, col: usize, symbol: Symbol) -> Move {
        Move::new(CellPos::new(row, col), symbol)
    }

    #[test]
    fn top_row_wins_on_third_mark() {
        let mut board = Board::new(3).unwrap();
        let moves = [mv(0, 0, Symbol::X), mv(0, 1, Symbol::X), mv(0, 2, Symbol::X)];

        for (idx, m) in moves.iter().enumerate() {
            board.place(m.pos, m.symbol).unwrap();
            let is_last = idx == moves.len() - 1;
            assert_eq!(check_win(&board, Some(m), 3), is_last);
        }
        assert_eq!(winning_axis(&board, &moves[2], 3), Some(Axis::Horizontal));
    }

    #[test]
    fn missing_move_is_never_a_win() {
        let board = board_with(3, &[(0, 0, Symbol::X), (0, 1, Symbol::X), (0, 2, Symbol::X)]);
        assert!(!check_win(&board, None, 3));
    }

    #[test]
    fn isolated_mark_is_not_a_win() {
        let board = board_with(5, &[(2, 2, Symbol::O), (0, 0, Symbol::O), (4, 4, Symbol::X)]);
        assert!(!check_win(&board, Some(&mv(2, 2, Symbol::O)), 3));
        for axis in Axis::ALL {
            assert_eq!(run_length(&board, &mv(2, 2, Symbol::O), axis, 3), 1);
        }
    }

    #[test]
    fn exact_length_wins_and_one_short_does_not() {
        let board = board_with(
            7,
            &[(3, 1, Symbol::X), (3, 2, Symbol::X), (3, 3, Symbol::X), (3, 4, Symbol::X)],
        );
        let last = mv(3, 4, Symbol::X);

        assert!(check_win(&board, Some(&last), 4));
        assert!(!check_win(&board, Some(&last), 5));
    }

    #[test]
    fn each_axis_is_detected() {
        let cases = [
            (Axis::Vertical, [(0, 1), (1, 1), (2, 1)]),
            (Axis::Diagonal, [(0, 0), (1, 1), (2, 2)]),
            (Axis::AntiDiagonal, [(0, 2), (1, 1), (2, 0)]),
        ];

        for (axis, cells) in cases {
            let marks = cells.map(|(row, col)| (row, col, Symbol::O));
            let board = board_with(3, &marks);
            let last = mv(cells[1].0, cells[1].1, Symbol::O);
            assert_eq!(winning_axis(&board, &last, 3), Some(axis));
        }
    }

    #[test]
    fn run_counts_both_sides_of_the_move() {
        let board = board_with(
            5,
            &[(0, 4, Symbol::X), (1, 3, Symbol::X), (2, 2, Symbol::X), (3, 1, Symbol::X)],
        );

        assert_eq!(run_length(&board, &mv(1, 3, Symbol::X), Axis::AntiDiagonal, 5), 4);
        assert_eq!(run_length(&board, &mv(2, 2, Symbol::X), Axis::AntiDiagonal, 5), 4);
    }

    #[test]
    fn mirrored_runs_count_the_same() {
        let east = board_with(5, &[(2, 2, Symbol::X), (2, 3, Symbol::X), (2, 4, Symbol::X)]);
        let west = board_with(5, &[(2, 2, Symbol::X), (2, 1, Symbol::X), (2, 0, Symbol::X)]);
        let mover = mv(2, 2, Symbol::X);

        assert_eq!(
            run_length(&east, &mover, Axis::Horizontal, 5),
            run_length(&west, &mover, Axis::Horizontal, 5)
        );
        assert_eq!(run_length(&east, &mover, Axis::Horizontal, 5), 3);
    }

    #[test]
    fn opponent_marks_break_the_run() {
        let board = board_with(
            5,
            &[(0, 0, Symbol::X), (0, 1, Symbol::X), (0, 2, Symbol::O), (0, 3, Symbol::X)],
        );
        assert!(!check_win(&board, Some(&mv(0, 1, Symbol::X)), 3));
        assert_eq!(run_length(&board, &mv(0, 1, Symbol::X), Axis::Horizontal, 3), 2);
    }

    #[test]
    fn walk_stops_once_win_length_is_reached() {
        let marks = (0..10).map(|col| (0, col, Symbol::X)).collect::<Vec<_>>();
        let board = board_with(10, &marks);

        assert_eq!(run_length(&board, &mv(0, 5, Symbol::X), Axis::Horizontal, 4), 4);
    }

    #[test]
    fn scan_finds_completed_run_and_prefers_given_symbol() {
        let board = board_with(
            4,
            &[
                (0, 0, Symbol::X),
                (0, 1, Symbol::X),
                (0, 2, Symbol::X),
                (3, 1, Symbol::O),
                (3, 2, Symbol::O),
                (3, 3, Symbol::O),
            ],
        );

        let found = scan_for_win(&board, 3, Symbol::O).unwrap();
        assert_eq!(found.symbol, Symbol::O);
        let found = scan_for_win(&board, 3, Symbol::X).unwrap();
        assert_eq!(found.symbol, Symbol::X);
    }

    #[test]
    fn scan_on_board_without_runs_finds_nothing() {
        let board = board_with(3, &[(0, 0, Symbol::X), (1, 1, Symbol::O), (0, 1, Symbol::X)]);
        assert_eq!(scan_for_win(&board, 3, Symbol::X), None);
    }

    #[test]
    fn axis_names_read_like_board_lines() {
        let names = Axis::ALL.map(|axis| axis.to_string());
        assert_eq!(names, ["row", "column", "diagonal", "anti-diagonal"]);
    }
}
