use serde::Serialize;
use std::fmt;
use tsify::Tsify;
use wasm_bindgen::prelude::*;

pub mod core;
pub mod persist;
pub mod presenter;
pub mod session_manager;

use crate::core::{
    game_session::{GameSession, Phase},
    player::{Scoreboard, Symbol},
    position::CellPos,
};
use crate::persist::{KeyValueStore, StoreError};
use crate::presenter::Presenter;
use crate::session_manager::SessionManager;

#[wasm_bindgen]
extern "C" {
    fn alert(s: &str);

    fn prompt(message: &str, default: &str) -> Option<String>;
}

/// `window.localStorage`, the store the page resumes from.
pub struct BrowserStore {
    storage: web_sys::Storage,
}

impl BrowserStore {
    pub fn local() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(unavailable)?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(unavailable)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(unavailable)
    }
}

fn unavailable(err: JsValue) -> StoreError {
    StoreError::Unavailable(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Drawing instructions queued for the page, drained with `takeEvents`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tsify)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UiEvent {
    CreateGrid { size: usize },
    MarkCell { row: usize, col: usize, symbol: String },
    ShowTurn { text: String },
    ShowScore { text: String },
}

/// Queues grid updates for the page and uses blocking browser dialogs for
/// announcements and setup questions.
#[derive(Debug, Default)]
pub struct BrowserPresenter {
    events: Vec<UiEvent>,
}

impl BrowserPresenter {
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Presenter for BrowserPresenter {
    fn create_grid(&mut self, size: usize) {
        // anything queued for the old grid is moot
        self.events.clear();
        self.events.push(UiEvent::CreateGrid { size });
    }

    fn mark_cell(&mut self, pos: CellPos, symbol: Symbol) {
        self.events.push(UiEvent::MarkCell {
            row: pos.row,
            col: pos.col,
            symbol: symbol.to_string(),
        });
    }

    fn announce(&mut self, message: &str) {
        alert(message);
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        prompt(message, default)
    }

    fn show_turn(&mut self, current_player: Symbol) {
        self.events.push(UiEvent::ShowTurn {
            text: format!("Turn: {current_player}"),
        });
    }

    fn show_score(&mut self, scoreboard: &Scoreboard) {
        self.events.push(UiEvent::ShowScore {
            text: scoreboard.to_string(),
        });
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Setup,
    InProgress,
    Won,
    Drawn,
}

/// Whole-game view for a full redraw, e.g. after the page regains focus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub board_size: usize,
    pub win_length: usize,
    pub current_player: String,
    pub cells: Vec<String>,
    pub x_wins: u32,
    pub o_wins: u32,
    pub status: GameStatus,
    pub winner: Option<String>,
    /// e.g. `"X@(0, 2)"`
    pub last_move: Option<String>,
}

impl GameView {
    pub fn from_session(session: &GameSession) -> Self {
        let status = match session.phase {
            Phase::Setup => GameStatus::Setup,
            Phase::InProgress => GameStatus::InProgress,
            Phase::Won(_) => GameStatus::Won,
            Phase::Drawn => GameStatus::Drawn,
        };

        Self {
            board_size: session.settings.board_size,
            win_length: session.settings.win_length,
            current_player: session.current_player.to_string(),
            cells: session
                .board
                .cells()
                .iter()
                .map(|cell| cell.map(Symbol::as_str).unwrap_or("").to_string())
                .collect::<Vec<_>>(),
            x_wins: session.scoreboard.wins(Symbol::X),
            o_wins: session.scoreboard.wins(Symbol::O),
            status,
            winner: session.winner().map(|winner| winner.to_string()),
            last_move: session.last_move.map(|mv| mv.to_string()),
        }
    }
}

fn to_js_error(err: impl fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[wasm_bindgen]
pub struct GameHandle {
    manager: SessionManager<BrowserStore, BrowserPresenter>,
}

#[wasm_bindgen]
impl GameHandle {
    pub fn summary(&self, indentation_level: usize) -> String {
        self.manager.session().summary(indentation_level)
    }

    /// Marks the cell for the current player. Call `resolveMove` once the mark
    /// has been drawn.
    #[wasm_bindgen(js_name = "placeMark")]
    pub fn place_mark(&mut self, row: usize, col: usize) -> Result<(), JsValue> {
        self.manager.place_mark(row, col).map_err(to_js_error)?;
        Ok(())
    }

    /// Returns false when no mark was waiting.
    #[wasm_bindgen(js_name = "resolveMove")]
    pub fn resolve_move(&mut self) -> bool {
        self.manager.resolve_move().is_some()
    }

    #[wasm_bindgen(js_name = "newGame")]
    pub fn new_game(&mut self) {
        self.manager.new_game();
    }

    /// Meant for `beforeunload`.
    #[wasm_bindgen(js_name = "saveSnapshot")]
    pub fn save_snapshot(&mut self) -> Result<(), JsValue> {
        self.manager.save_snapshot().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "takeEvents")]
    pub fn take_events(&mut self) -> Result<JsValue, JsValue> {
        let events = self.manager.presenter_mut().take_events();
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        let view = GameView::from_session(self.manager.session());
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }

    #[wasm_bindgen(js_name = "boardSize")]
    pub fn board_size(&self) -> usize {
        self.manager.session().settings.board_size
    }

    #[wasm_bindgen(js_name = "winLength")]
    pub fn win_length(&self) -> usize {
        self.manager.session().settings.win_length
    }

    #[wasm_bindgen(js_name = "currentPlayer")]
    pub fn current_player(&self) -> String {
        self.manager.session().current_player.to_string()
    }

    #[wasm_bindgen(js_name = "isInProgress")]
    pub fn is_in_progress(&self) -> bool {
        self.manager.session().is_in_progress()
    }
}

/// Resumes the game saved in localStorage, or prompts for a new one.
#[wasm_bindgen(js_name = "startGame")]
pub fn start_game() -> Result<GameHandle, JsValue> {
    let store = BrowserStore::local().map_err(to_js_error)?;
    let manager = SessionManager::start(store, BrowserPresenter::default());
    Ok(GameHandle { manager })
}
