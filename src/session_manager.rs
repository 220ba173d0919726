use crate::core::{
    error::GameResult,
    game_session::{GameSession, MoveOutcome},
    player::Scoreboard,
    position::{CellPos, Move},
    rule_helper,
    settings::GameSettings,
};
use crate::persist::{
    snapshot::{Snapshot, SnapshotError},
    KeyValueStore, StoreError,
};
use crate::presenter::Presenter;
use tracing::{debug, info, instrument, warn};

/// Runs games back to back: setup, marks, results, and the save/resume cycle.
pub struct SessionManager<S: KeyValueStore, P: Presenter> {
    store: S,
    presenter: P,
    session: GameSession,
}

impl<S: KeyValueStore, P: Presenter> SessionManager<S, P> {
    /// Picks up a saved game when the store has one, otherwise asks for new settings.
    #[instrument(level = "info", skip_all)]
    pub fn start(mut store: S, mut presenter: P) -> Self {
        match take_saved_game(&mut store) {
            Some(session) => {
                let mut manager = Self {
                    store,
                    presenter,
                    session,
                };
                manager.resume();
                manager
            }
            None => {
                let settings = prompt_settings(&mut presenter);
                info!(%settings, "starting fresh game");
                let mut manager = Self {
                    store,
                    presenter,
                    session: GameSession::at_start(settings, Scoreboard::default()),
                };
                manager.presenter.create_grid(settings.board_size);
                manager.refresh_banners();
                manager
            }
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// First half of a move: the mark is placed and drawn, nothing is decided yet.
    pub fn place_mark(&mut self, row: usize, col: usize) -> GameResult<Move> {
        let mv = self.session.apply_move(CellPos::new(row, col))?;
        self.presenter.mark_cell(mv.pos, mv.symbol);
        Ok(mv)
    }

    /// Second half of a move. Returns `None` when there was no mark to resolve.
    ///
    /// A win is announced and immediately followed by setup of the next game. A draw
    /// is announced and the finished board stays up until [`Self::new_game`].
    pub fn resolve_move(&mut self) -> Option<MoveOutcome> {
        if self.session.pending_move.is_none() {
            return None;
        }
        let outcome = self.session.evaluate();
        self.react(outcome);
        Some(outcome)
    }

    /// Abandons the current board and sets up another; tallies carry over.
    #[instrument(level = "info", skip_all)]
    pub fn new_game(&mut self) {
        self.session.begin_setup();
        let settings = prompt_settings(&mut self.presenter);
        self.session = GameSession::at_start(settings, self.session.scoreboard);
        info!(%settings, score = %self.session.scoreboard, "new game");

        self.presenter.create_grid(settings.board_size);
        self.refresh_banners();
    }

    /// Teardown hook: writes the whole session so the next start can resume it.
    pub fn save_snapshot(&mut self) -> Result<(), StoreError> {
        Snapshot::from_session(&self.session).save(&mut self.store)
    }

    fn resume(&mut self) {
        info!(settings = %self.session.settings, "resuming saved game");
        self.presenter.create_grid(self.session.settings.board_size);
        for (pos, symbol) in self.session.board.occupied() {
            self.presenter.mark_cell(pos, symbol);
        }

        let outcome = self.session.resolve_restored();
        self.react(outcome);
    }

    fn react(&mut self, outcome: MoveOutcome) {
        debug!(?outcome, "move resolved");
        match outcome {
            MoveOutcome::Won { winner, .. } => {
                self.presenter.announce(&rule_helper::win_announcement(winner));
                self.new_game();
            }
            MoveOutcome::Drawn => {
                self.presenter.announce(rule_helper::DRAW_ANNOUNCEMENT);
                self.presenter.show_score(&self.session.scoreboard);
            }
            MoveOutcome::Continue { .. } => self.refresh_banners(),
        }
    }

    fn refresh_banners(&mut self) {
        self.presenter.show_turn(self.session.current_player);
        self.presenter.show_score(&self.session.scoreboard);
    }
}

/// Loads the saved game, if any, and removes the resume marker so it is used once.
/// A save that cannot be trusted is dropped and reported as missing.
fn take_saved_game(store: &mut impl KeyValueStore) -> Option<GameSession> {
    if !Snapshot::is_resumable(&*store) {
        return None;
    }

    let loaded: Result<_, SnapshotError> =
        Snapshot::load(&*store).and_then(|snapshot| match snapshot {
            Some(snapshot) => snapshot.into_session().map(Some),
            None => Ok(None),
        });

    if let Err(err) = Snapshot::discard_board(store) {
        warn!(%err, "could not clear consumed saved game");
    }

    match loaded {
        Ok(session) => session,
        Err(err) => {
            warn!(%err, "saved game is unreadable, starting fresh");
            None
        }
    }
}

/// Asks for board size, then cells to win, re-asking each until it is acceptable.
fn prompt_settings(presenter: &mut impl Presenter) -> GameSettings {
    loop {
        let board_size = prompt_until(
            presenter,
            rule_helper::BOARD_SIZE_PROMPT,
            rule_helper::is_valid_board_size,
        );
        let win_length = prompt_until(presenter, rule_helper::WIN_LENGTH_PROMPT, |win_length| {
            rule_helper::is_valid_win_length(win_length, board_size)
        });

        match GameSettings::new(board_size, win_length) {
            Ok(settings) => return settings,
            Err(err) => warn!(%err, "setup answers rejected"),
        }
    }
}

fn prompt_until(
    presenter: &mut impl Presenter,
    message: &str,
    is_valid: impl Fn(usize) -> bool,
) -> usize {
    loop {
        let answer = presenter.prompt(message, rule_helper::DEFAULT_SETUP_ANSWER);
        match answer.as_deref().and_then(rule_helper::parse_setup_answer) {
            Some(value) if is_valid(value) => return value,
            _ => debug!(?answer, prompt = message, "setup answer out of range, asking again"),
        }
    }
}
