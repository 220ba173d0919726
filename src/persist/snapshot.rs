use crate::core::{
    error::GameError,
    game_session::GameSession,
    player::{Scoreboard, Symbol},
    rule_helper,
    settings::GameSettings,
};
use crate::persist::{KeyValueStore, StoreError};
use std::str::FromStr;
use tracing::{debug, instrument};

pub const CELLS_KEY: &str = "cells";
pub const WIN_LENGTH_KEY: &str = "occurrencesNum";
pub const BOARD_SIZE_KEY: &str = "boardSize";
pub const CURRENT_PLAYER_KEY: &str = "currentPlayer";
pub const X_WINS_KEY: &str = "XWins";
pub const O_WINS_KEY: &str = "OWins";

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("saved cells are not a JSON array of strings: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("saved {key} is missing")]
    MissingKey { key: &'static str },
    #[error("saved {key} '{value}' is not a whole number")]
    InvalidNumber { key: &'static str, value: String },
    #[error("saved {key} holds unknown symbol '{value}'")]
    UnknownSymbol { key: &'static str, value: String },
    #[error("saved game is inconsistent: {0}")]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything needed to put a game back on screen after a reload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[readonly::make]
pub struct Snapshot {
    pub settings: GameSettings,
    pub current_player: Symbol,
    pub cells: Vec<Option<Symbol>>,
    pub x_wins: u32,
    pub o_wins: u32,
}

impl Snapshot {
    /// An unresolved mark has already used its mover's turn, so the saved player is
    /// the one who moves next. A run or full board it made is found again on resume.
    pub fn from_session(session: &GameSession) -> Self {
        let current_player = match session.pending_move {
            Some(pending) => pending.symbol.other(),
            None => session.current_player,
        };

        Self {
            settings: session.settings,
            current_player,
            cells: session.board.cells().to_vec(),
            x_wins: session.scoreboard.wins(Symbol::X),
            o_wins: session.scoreboard.wins(Symbol::O),
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::new(self.x_wins, self.o_wins)
    }

    pub fn into_session(self) -> Result<GameSession, SnapshotError> {
        let scoreboard = self.scoreboard();
        let session =
            GameSession::restored(self.settings, self.cells, self.current_player, scoreboard)?;
        Ok(session)
    }

    pub fn is_resumable(store: &impl KeyValueStore) -> bool {
        store.contains(CELLS_KEY)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        let cell_texts = self
            .cells
            .iter()
            .map(|cell| cell.map(Symbol::as_str).unwrap_or(""))
            .collect::<Vec<_>>();

        store.set(CELLS_KEY, &serde_json::to_string(&cell_texts)?)?;
        store.set(WIN_LENGTH_KEY, &self.settings.win_length.to_string())?;
        store.set(BOARD_SIZE_KEY, &self.settings.board_size.to_string())?;
        store.set(CURRENT_PLAYER_KEY, self.current_player.as_str())?;
        store.set(X_WINS_KEY, &self.x_wins.to_string())?;
        store.set(O_WINS_KEY, &self.o_wins.to_string())?;
        debug!(settings = %self.settings, "snapshot written");
        Ok(())
    }

    /// `Ok(None)` when no game was saved; errors describe a save that cannot be trusted.
    #[instrument(level = "debug", skip_all)]
    pub fn load(store: &impl KeyValueStore) -> Result<Option<Self>, SnapshotError> {
        let Some(cells_json) = store.get(CELLS_KEY) else {
            return Ok(None);
        };

        let cell_texts = serde_json::from_str::<Vec<String>>(&cells_json)?;
        let cells = cell_texts
            .iter()
            .map(|text| parse_cell(text))
            .collect::<Result<Vec<_>, _>>()?;

        let board_size = required_number::<usize>(store, BOARD_SIZE_KEY)?;
        let win_length = required_number::<usize>(store, WIN_LENGTH_KEY)?;
        let settings = GameSettings::new(board_size, win_length)?;

        if cells.len() != settings.num_cells() {
            return Err(GameError::CellCountMismatch {
                size: board_size,
                expected: settings.num_cells(),
                found: cells.len(),
            }
            .into());
        }

        let current_player = match store.get(CURRENT_PLAYER_KEY) {
            Some(text) => Symbol::parse(&text).ok_or(SnapshotError::UnknownSymbol {
                key: CURRENT_PLAYER_KEY,
                value: text,
            })?,
            None => rule_helper::FIRST_SYMBOL,
        };

        Ok(Some(Self {
            settings,
            current_player,
            cells,
            x_wins: optional_number(store, X_WINS_KEY)?.unwrap_or(0),
            o_wins: optional_number(store, O_WINS_KEY)?.unwrap_or(0),
        }))
    }

    /// Drops the resume marker once a saved game has been picked up.
    pub fn discard_board(store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.remove(CELLS_KEY)
    }
}

fn parse_cell(text: &str) -> Result<Option<Symbol>, SnapshotError> {
    if text.is_empty() {
        return Ok(None);
    }

    Symbol::parse(text)
        .map(Some)
        .ok_or_else(|| SnapshotError::UnknownSymbol {
            key: CELLS_KEY,
            value: text.to_string(),
        })
}

fn optional_number<T: FromStr>(
    store: &impl KeyValueStore,
    key: &'static str,
) -> Result<Option<T>, SnapshotError> {
    store
        .get(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| SnapshotError::InvalidNumber { key, value })
        })
        .transpose()
}

fn required_number<T: FromStr>(
    store: &impl KeyValueStore,
    key: &'static str,
) -> Result<T, SnapshotError> {
    optional_number(store, key)?.ok_or(SnapshotError::MissingKey { key })
}
