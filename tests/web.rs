#![cfg(target_arch = "wasm32")]

use n_in_a_row::core::{
    game_session::GameSession,
    player::{Scoreboard, Symbol},
    position::CellPos,
    settings::GameSettings,
};
use n_in_a_row::persist::{snapshot::Snapshot, KeyValueStore};
use n_in_a_row::session_manager::SessionManager;
use n_in_a_row::{BrowserPresenter, BrowserStore, UiEvent};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_sets_and_removes() {
    let mut store = BrowserStore::local().unwrap();
    store.set("boardSize", "4").unwrap();
    assert_eq!(store.get("boardSize").as_deref(), Some("4"));

    store.remove("boardSize").unwrap();
    assert_eq!(store.get("boardSize"), None);
}

#[wasm_bindgen_test]
fn page_load_resumes_from_local_storage() {
    let mut session = GameSession::at_start(GameSettings::new(3, 3).unwrap(), Scoreboard::new(1, 0));
    session.apply_move(CellPos::new(1, 1)).unwrap();
    session.evaluate();

    let mut store = BrowserStore::local().unwrap();
    Snapshot::from_session(&session).save(&mut store).unwrap();

    let mut manager = SessionManager::start(store, BrowserPresenter::default());

    assert_eq!(
        manager.presenter_mut().take_events(),
        vec![
            UiEvent::CreateGrid { size: 3 },
            UiEvent::MarkCell {
                row: 1,
                col: 1,
                symbol: "O".to_string()
            },
            UiEvent::ShowTurn {
                text: "Turn: X".to_string()
            },
            UiEvent::ShowScore {
                text: "Player X: 1, Player O: 0".to_string()
            },
        ]
    );
    assert_eq!(manager.session().current_player, Symbol::X);
    assert!(!Snapshot::is_resumable(manager.store()));
}
