pub mod board;
pub mod error;
pub mod game_session;
pub mod player;
pub mod position;
pub mod rule_helper;
pub mod settings;
pub mod win_detector;
