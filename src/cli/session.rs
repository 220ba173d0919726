use crate::file_store::FileStore;
use crossterm::style::Stylize;
use n_in_a_row::core::{
    game_session::{MoveOutcome, Phase},
    player::{Scoreboard, Symbol},
    position::CellPos,
};
use n_in_a_row::presenter::Presenter;
use n_in_a_row::session_manager::SessionManager;
use std::io::{self, BufRead, Write};

/// Terminal rendering. The board itself is printed by [`Session`] from the game
/// state; this only echoes what changed.
pub struct TerminalPresenter<R> {
    input: R,
}

impl<R: BufRead> TerminalPresenter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

fn styled_symbol(symbol: Symbol) -> String {
    match symbol {
        Symbol::X => symbol.as_str().red().bold().to_string(),
        Symbol::O => symbol.as_str().blue().bold().to_string(),
    }
}

impl<R: BufRead> Presenter for TerminalPresenter<R> {
    fn create_grid(&mut self, size: usize) {
        println!("(NEW {size}x{size} BOARD)");
    }

    fn mark_cell(&mut self, pos: CellPos, symbol: Symbol) {
        println!("  {} at {pos}", styled_symbol(symbol));
    }

    fn announce(&mut self, message: &str) {
        println!("*** {} ***", message.to_string().bold());
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        print!("{message}[{default}] ");
        let _ = io::stdout().flush();

        // a closed stdin would otherwise re-ask forever
        let answer = self.read_line().unwrap_or_default();
        if answer.trim().is_empty() {
            Some(default.to_string())
        } else {
            Some(answer)
        }
    }

    fn show_turn(&mut self, current_player: Symbol) {
        println!("  Turn: {}", styled_symbol(current_player));
    }

    fn show_score(&mut self, scoreboard: &Scoreboard) {
        println!("  {scoreboard}");
    }
}

pub struct Session<R: BufRead> {
    manager: SessionManager<FileStore, TerminalPresenter<R>>,
    should_quit: bool,
}

impl Session<io::StdinLock<'static>> {
    pub fn start(store: FileStore) -> Self {
        Self::with_input(store, io::stdin().lock())
    }
}

impl<R: BufRead> Session<R> {
    pub fn with_input(store: FileStore, input: R) -> Self {
        let manager = SessionManager::start(store, TerminalPresenter::new(input));
        let session = Self {
            manager,
            should_quit: false,
        };
        session.print_board();
        session
    }

    pub fn interpretation_loop(&mut self) {
        loop {
            print!("{}", self.user_prompt_text());
            let _ = io::stdout().flush();

            let Some(line) = self.manager.presenter_mut().read_line() else {
                self.interpret_directive("q");
                return;
            };

            for subline in line.split(';') {
                self.interpret_directive(subline);
                if self.should_quit {
                    return;
                }
            }
        }
    }

    fn user_prompt_text(&self) -> String {
        let game = self.manager.session();
        match game.phase {
            Phase::InProgress => format!("{}> ", game.current_player),
            _ => "(n for new game)> ".to_string(),
        }
    }

    fn interpret_directive(&mut self, directive: &str) {
        const TAG_QUIT: &str = "q";
        const TAG_DISPLAY: &str = "d";
        const TAG_NEW_GAME: &str = "n";
        const TAG_SAVE: &str = "s";

        let tokens = directive.split_whitespace().collect::<Vec<_>>();
        let Some(directive_tag) = tokens.first().map(|token| token.to_lowercase()) else {
            return;
        };

        if directive_tag == TAG_QUIT {
            self.save();
            self.should_quit = true;
        } else if directive_tag == TAG_DISPLAY {
            println!("{}", self.manager.session().summary(1));
        } else if directive_tag == TAG_NEW_GAME {
            println!("(NEW GAME)");
            self.manager.new_game();
            self.print_board();
        } else if directive_tag == TAG_SAVE {
            self.save();
        } else if directive_tag.starts_with(|ch: char| ch.is_ascii_digit()) {
            self.do_move_tokens(&tokens);
        } else {
            let mut explanations = vec![
                "d       | display game state",
                "n       | abandon this board and set up a new game",
                "q       | save and quit",
                "s       | save game",
                "[row] [col] | mark that cell for the current player (0-based)",
            ];
            explanations.sort();
            println!("  unrecognized directive '{}'", directive.trim());
            for explanation in explanations {
                println!("  {explanation}");
            }
        }
    }

    fn do_move_tokens(&mut self, tokens: &[&str]) {
        let coords = tokens
            .iter()
            .map(|token| token.parse::<usize>())
            .collect::<Result<Vec<_>, _>>();
        let (row, col) = match coords.as_deref() {
            Ok([row, col]) => (*row, *col),
            _ => {
                println!("  a move needs two whole numbers: row col");
                return;
            }
        };

        if let Err(err) = self.manager.place_mark(row, col) {
            println!("  {err}");
            return;
        }

        if let Some(MoveOutcome::Drawn) = self.manager.resolve_move() {
            println!("  board is finished; n starts a new game");
        }
        self.print_board();
    }

    fn save(&mut self) {
        match self.manager.save_snapshot() {
            Ok(()) => println!("  saved to {}", self.manager.store().path().display()),
            Err(err) => println!("  could not save: {err}"),
        }
    }

    fn print_board(&self) {
        println!("{}", self.manager.session().board.summary(1));
    }
}
