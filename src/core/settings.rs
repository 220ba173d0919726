use crate::core::{
    error::{GameError, GameResult},
    rule_helper,
};
use std::fmt;

/// Board size and run length, fixed for the lifetime of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[readonly::make]
pub struct GameSettings {
    pub board_size: usize,
    pub win_length: usize,
}

impl GameSettings {
    pub fn new(board_size: usize, win_length: usize) -> GameResult<Self> {
        if !rule_helper::is_valid_board_size(board_size) {
            return Err(GameError::InvalidBoardSize { found: board_size });
        }
        if !rule_helper::is_valid_win_length(win_length, board_size) {
            return Err(GameError::invalid_win_length(win_length, board_size));
        }

        Ok(Self {
            board_size,
            win_length,
        })
    }

    pub fn num_cells(&self) -> usize {
        self.board_size * self.board_size
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: rule_helper::MIN_BOARD_SIZE,
            win_length: rule_helper::MIN_WIN_LENGTH,
        }
    }
}

impl fmt::Display for GameSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{size}x{size}, {win} to win",
            size = self.board_size,
            win = self.win_length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_combination_inside_bounds() {
        for board_size in [3, 10, 100] {
            for win_length in 3..=board_size {
                assert!(GameSettings::new(board_size, win_length).is_ok());
            }
        }
    }

    #[test]
    fn rejects_board_size_before_win_length() {
        assert_eq!(
            GameSettings::new(101, 200),
            Err(GameError::InvalidBoardSize { found: 101 })
        );
        assert_eq!(
            GameSettings::new(0, 0),
            Err(GameError::InvalidBoardSize { found: 0 })
        );
    }

    #[test]
    fn rejects_win_length_longer_than_board() {
        assert_eq!(
            GameSettings::new(4, 5),
            Err(GameError::invalid_win_length(5, 4))
        );
        assert_eq!(
            GameSettings::new(4, 2),
            Err(GameError::invalid_win_length(2, 4))
        );
    }

    #[test]
    fn default_is_classic_tic_tac_toe() {
        let settings = GameSettings::default();
        assert_eq!(settings.to_string(), "3x3, 3 to win");
        assert_eq!(settings.num_cells(), 9);
    }
}
