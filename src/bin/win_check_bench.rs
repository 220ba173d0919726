use n_in_a_row::core::{
    board::Board,
    player::Symbol,
    position::{CellPos, Move},
    win_detector,
};
use std::time::Instant;

const WIN_LENGTH: usize = 5;
const ROUNDS: usize = 2_000;

/// Checks every cell of one fully marked row; the cost per check should not grow
/// with the board.
fn bench(board_size: usize) {
    let mut board = Board::new(board_size).expect("bench board size should be valid");
    let row = board_size / 2;
    for col in 0..board_size {
        board
            .place(CellPos::new(row, col), Symbol::X)
            .expect("bench row starts empty");
    }

    let moves = (0..board_size)
        .map(|col| Move::new(CellPos::new(row, col), Symbol::X))
        .collect::<Vec<_>>();

    let mut num_checks = 0usize;
    let mut num_wins = 0usize;
    let started = Instant::now();
    for _ in 0..ROUNDS {
        for mv in &moves {
            num_checks += 1;
            if win_detector::check_win(&board, Some(mv), WIN_LENGTH) {
                num_wins += 1;
            }
        }
    }
    let elapsed = started.elapsed();

    println!(
        "boardSize={:<4} winLength={} checks={} wins={} timeSec={:.4} nsPerCheck={:.1}",
        board_size,
        WIN_LENGTH,
        num_checks,
        num_wins,
        elapsed.as_secs_f64(),
        elapsed.as_nanos() as f64 / num_checks as f64
    );
}

fn main() {
    for board_size in [10, 100] {
        bench(board_size);
    }
}
