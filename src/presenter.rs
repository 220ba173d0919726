use crate::core::{
    player::{Scoreboard, Symbol},
    position::CellPos,
};

/// The rendering and input surface a game is played through.
///
/// The session manager decides what happens; implementors only draw it and collect
/// answers. Nothing here reads the board back, the manager owns it.
pub trait Presenter {
    /// Replaces whatever was shown with an empty `size` x `size` grid.
    fn create_grid(&mut self, size: usize);

    fn mark_cell(&mut self, pos: CellPos, symbol: Symbol);

    /// Win and draw messages.
    fn announce(&mut self, message: &str);

    /// Asks for a value with `default` prefilled. `None` means the question was
    /// dismissed; the caller asks again.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;

    fn show_turn(&mut self, current_player: Symbol);

    fn show_score(&mut self, scoreboard: &Scoreboard);
}
