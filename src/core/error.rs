use crate::core::rule_helper::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, MIN_WIN_LENGTH};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cell ({row}, {col}) is outside the {size}x{size} board")]
    CellOutOfBounds { row: usize, col: usize, size: usize },
    #[error("cell ({row}, {col}) is occupied")]
    CellOccupied { row: usize, col: usize },
    #[error("can't place a mark while no game is in progress")]
    GameNotInProgress,
    #[error("previous mark at ({row}, {col}) has not been resolved yet")]
    MoveNotResolved { row: usize, col: usize },
    #[error("board size must be between {} and {}, found {found}", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    InvalidBoardSize { found: usize },
    #[error("cells to win must be between {} and {board_size}, found {found}", MIN_WIN_LENGTH)]
    InvalidWinLength { found: usize, board_size: usize },
    #[error("board of size {size} needs {expected} cells, found {found}")]
    CellCountMismatch {
        size: usize,
        expected: usize,
        found: usize,
    },
}

impl GameError {
    pub fn cell_out_of_bounds(row: usize, col: usize, size: usize) -> Self {
        Self::CellOutOfBounds { row, col, size }
    }

    pub fn cell_occupied(row: usize, col: usize) -> Self {
        Self::CellOccupied { row, col }
    }

    pub fn invalid_win_length(found: usize, board_size: usize) -> Self {
        Self::InvalidWinLength { found, board_size }
    }
}

pub type GameResult<T> = Result<T, GameError>;
