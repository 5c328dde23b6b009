//! Game session: state machine, step scheduler, and best-score write-through

use crate::highscores::ScoreStore;
use crate::platform::ticker::Ticker;
use crate::settings::Settings;
use crate::sim::{
    Command, CommandOutcome, GamePhase, GameState, Key, TickOutcome, apply, command_for_key, tick,
};

/// One embedded game, driven by frame time and input
pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
    ticker: Ticker,
}

impl<S: ScoreStore> Session<S> {
    /// Read the stored best score once and set up a fresh board
    pub fn new(settings: &Settings, store: S, seed: u64, retryable: bool) -> Self {
        let high_score = store.read();
        log::info!(
            "Session created (seed {}, high score {}, retryable {})",
            seed,
            high_score,
            retryable
        );
        Self {
            state: GameState::new(seed, high_score, retryable),
            store,
            ticker: Ticker::new(settings.tick_interval_ms, settings.max_substeps),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Route a key press through the input controller
    pub fn key(&mut self, key: Key) -> CommandOutcome {
        match command_for_key(key, self.state.phase) {
            Some(command) => self.command(command),
            None => CommandOutcome::Ignored,
        }
    }

    pub fn command(&mut self, command: Command) -> CommandOutcome {
        if self.ticker.is_cancelled() {
            return CommandOutcome::Ignored;
        }
        apply(&mut self.state, command)
    }

    /// Feed frame time; runs every step that is due and returns the last outcome
    pub fn advance(&mut self, elapsed_ms: f64) -> TickOutcome {
        let active = self.state.phase == GamePhase::Running;
        let steps = self.ticker.advance(elapsed_ms, active);
        let mut last = TickOutcome::Idle;
        for _ in 0..steps {
            last = self.step();
            if last.is_terminal() {
                break;
            }
        }
        last
    }

    /// Run exactly one tick, persisting a new best score if the session ended with one
    pub fn step(&mut self) -> TickOutcome {
        if self.ticker.is_cancelled() {
            return TickOutcome::Idle;
        }
        let outcome = tick(&mut self.state);
        if let Some(score) = outcome.new_high_score() {
            log::info!("New high score: {}", score);
            self.store.write(score);
        }
        outcome
    }

    /// Stop ticking for good
    pub fn teardown(&mut self) {
        self.ticker.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.ticker.is_cancelled()
    }
}
