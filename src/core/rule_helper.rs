use crate::core::player::Symbol;

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 100;
pub const MIN_WIN_LENGTH: usize = 3;

/// Prefilled answer for both setup prompts.
pub const DEFAULT_SETUP_ANSWER: &str = "3";

pub const BOARD_SIZE_PROMPT: &str = "Game board size, please: ";
pub const WIN_LENGTH_PROMPT: &str = "How many cells to win?";

pub const FIRST_SYMBOL: Symbol = Symbol::O;

pub fn is_valid_board_size(board_size: usize) -> bool {
    (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size)
}

pub fn is_valid_win_length(win_length: usize, board_size: usize) -> bool {
    (MIN_WIN_LENGTH..=board_size).contains(&win_length)
}

/// Parses a prompt answer the way a player would expect: surrounding whitespace is
/// ignored, anything that is not a whole non-negative number is rejected.
pub fn parse_setup_answer(answer: &str) -> Option<usize> {
    answer.trim().parse::<usize>().ok()
}

pub fn win_announcement(winner: Symbol) -> String {
    format!("Player {winner} wins!")
}

pub const DRAW_ANNOUNCEMENT: &str = "It's a draw!";
