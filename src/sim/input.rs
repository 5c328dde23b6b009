//! Input controller
//!
//! Keys are mapped to [`Command`]s against the current phase, and
//! [`apply`] is the only place commands touch the game state.

use super::state::{Direction, GamePhase, GameState};

/// A keyboard signal the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Arrow(Direction),
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name
    pub fn from_key_name(name: &str) -> Option<Key> {
        match name {
            "ArrowUp" => Some(Key::Arrow(Direction::Up)),
            "ArrowDown" => Some(Key::Arrow(Direction::Down)),
            "ArrowLeft" => Some(Key::Arrow(Direction::Left)),
            "ArrowRight" => Some(Key::Arrow(Direction::Right)),
            " " | "Spacebar" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Commands accepted by the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// NotStarted -> Running (start button)
    Start,
    /// Request a turn before the next tick
    Turn(Direction),
    /// Running <-> Paused
    TogglePause,
    /// GameOver -> NotStarted with a fresh board (retryable sessions only)
    Restart,
}

/// Whether a command changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Ignored,
}

/// Translate a key press into a command for the given phase.
///
/// Arrows only steer a running game; the pause key only works once started
/// and before game over.
pub fn command_for_key(key: Key, phase: GamePhase) -> Option<Command> {
    match (key, phase) {
        (Key::Arrow(dir), GamePhase::Running) => Some(Command::Turn(dir)),
        (Key::Pause, GamePhase::Running | GamePhase::Paused) => Some(Command::TogglePause),
        _ => None,
    }
}

/// Apply a command to the game state
pub fn apply(state: &mut GameState, command: Command) -> CommandOutcome {
    use CommandOutcome::*;

    match command {
        Command::Start => {
            if state.phase != GamePhase::NotStarted {
                return Ignored;
            }
            state.phase = GamePhase::Running;
            log::info!("Game started");
            Applied
        }
        Command::Turn(dir) => {
            // Checked against the committed direction; a pending turn does not count
            if state.phase != GamePhase::Running || dir == state.direction.opposite() {
                return Ignored;
            }
            state.pending_direction = Some(dir);
            Applied
        }
        Command::TogglePause => match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Game paused");
                Applied
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Game resumed");
                Applied
            }
            _ => Ignored,
        },
        Command::Restart => {
            if state.phase != GamePhase::GameOver || !state.retryable {
                return Ignored;
            }
            state.reset();
            log::info!("Game restarted");
            Applied
        }
    }
}
