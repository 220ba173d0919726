use crate::core::{
    board::Board,
    error::{GameError, GameResult},
    player::{Scoreboard, Symbol},
    position::{CellPos, Move},
    rule_helper,
    settings::GameSettings,
    win_detector::{self, Axis},
};
use std::fmt;
use tracing::{debug, info, instrument};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    InProgress,
    Won(Symbol),
    Drawn,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Won { winner: Symbol, axis: Option<Axis> },
    Drawn,
    Continue { next: Symbol },
}

/// One game: its board, whose turn it is, and the running tallies it will hand on.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub settings: GameSettings,
    pub board: Board,
    pub current_player: Symbol,
    pub scoreboard: Scoreboard,
    pub phase: Phase,
    pub last_move: Option<Move>,
    pub pending_move: Option<Move>,
}

impl GameSession {
    pub fn at_start(settings: GameSettings, scoreboard: Scoreboard) -> Self {
        GameSession {
            settings,
            board: Board::for_settings(&settings),
            current_player: rule_helper::FIRST_SYMBOL,
            scoreboard,
            phase: Phase::InProgress,
            last_move: None,
            pending_move: None,
        }
    }

    /// Rebuilds a game from saved parts. The result still has to be checked with
    /// [`GameSession::resolve_restored`] before play continues.
    pub fn restored(
        settings: GameSettings,
        cells: Vec<Option<Symbol>>,
        current_player: Symbol,
        scoreboard: Scoreboard,
    ) -> GameResult<Self> {
        let board = Board::from_cells(settings.board_size, cells)?;

        Ok(GameSession {
            settings,
            board,
            current_player,
            scoreboard,
            phase: Phase::InProgress,
            last_move: None,
            pending_move: None,
        })
    }

    /// Freezes the board while the next game's settings are collected.
    pub fn begin_setup(&mut self) {
        self.phase = Phase::Setup;
        self.pending_move = None;
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase == Phase::InProgress
    }

    pub fn winner(&self) -> Option<Symbol> {
        match self.phase {
            Phase::Won(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Marks `pos` for the current player. Result evaluation is a separate step so
    /// the mark can be shown first.
    #[instrument(level = "debug", skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, pos: CellPos) -> GameResult<Move> {
        if !self.is_in_progress() {
            return Err(GameError::GameNotInProgress);
        }
        if let Some(pending) = self.pending_move {
            return Err(GameError::MoveNotResolved {
                row: pending.pos.row,
                col: pending.pos.col,
            });
        }

        self.board.place(pos, self.current_player)?;
        let mv = Move::new(pos, self.current_player);
        self.last_move = Some(mv);
        self.pending_move = Some(mv);
        Ok(mv)
    }

    /// Evaluates the pending move: win, draw, or hand the turn over.
    ///
    /// Without a pending move the game is simply re-checked for a full board.
    #[instrument(level = "debug", skip(self))]
    pub fn evaluate(&mut self) -> MoveOutcome {
        let pending = self.pending_move.take();
        let axis = pending.and_then(|mv| {
            win_detector::winning_axis(&self.board, &mv, self.settings.win_length)
        });

        if let (Some(mv), Some(axis)) = (pending, axis) {
            return self.declare_win(mv.symbol, Some(axis));
        }

        if self.board.is_full() {
            return self.declare_draw();
        }

        if pending.is_some() {
            self.current_player = self.current_player.other();
        }
        MoveOutcome::Continue {
            next: self.current_player,
        }
    }

    /// Post-restore check covering a page closed between a mark and its evaluation.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_restored(&mut self) -> MoveOutcome {
        if let Some(mv) = win_detector::scan_for_win(
            &self.board,
            self.settings.win_length,
            self.current_player,
        ) {
            let axis = win_detector::winning_axis(&self.board, &mv, self.settings.win_length);
            self.last_move = Some(mv);
            return self.declare_win(mv.symbol, axis);
        }

        if self.board.is_full() {
            return self.declare_draw();
        }

        MoveOutcome::Continue {
            next: self.current_player,
        }
    }

    fn declare_win(&mut self, winner: Symbol, axis: Option<Axis>) -> MoveOutcome {
        let wins = self.scoreboard.record_win(winner);
        self.phase = Phase::Won(winner);
        match axis {
            Some(axis) => info!(%winner, wins, %axis, "game won"),
            None => info!(%winner, wins, "game won"),
        }
        MoveOutcome::Won { winner, axis }
    }

    fn declare_draw(&mut self) -> MoveOutcome {
        self.phase = Phase::Drawn;
        debug!(marks = self.board.num_marked(), "board full without a winner");
        MoveOutcome::Drawn
    }

    pub fn turn_text(&self) -> String {
        format!("Turn: {}", self.current_player)
    }

    pub fn summary(&self, indentation_level: usize) -> String {
        let indentation = "  ".repeat(indentation_level);
        let status = match self.phase {
            Phase::Setup => "setting up".to_string(),
            Phase::InProgress => self.turn_text(),
            Phase::Won(winner) => rule_helper::win_announcement(winner),
            Phase::Drawn => rule_helper::DRAW_ANNOUNCEMENT.to_string(),
        };

        format!(
            "{indentation}{}\n{indentation}{}\n{indentation}{}\n{}",
            self.settings,
            status,
            self.scoreboard,
            self.board.summary(indentation_level)
        )
    }
}

impl fmt::Display for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary(0))
    }
}
