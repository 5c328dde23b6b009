//! Snake Overlay - a grid snake game in a draggable floating window
//!
//! Core modules:
//! - `sim`: Deterministic game engine (movement, collision, scoring, input)
//! - `platform`: Window dragging, tick scheduling, listener lifetimes, DOM glue
//! - `persistence`: Key-value storage backends
//! - `highscores`: Best-score store
//! - `session` / `overlay`: Wiring and the host-facing window
//! - `snapshot`: Immutable view state for the renderer

pub mod error;
pub mod highscores;
pub mod overlay;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::{SettingsError, StorageError};
pub use highscores::{HighScoreStore, ScoreStore};
pub use overlay::Overlay;
pub use session::Session;
pub use settings::Settings;
pub use snapshot::RenderSnapshot;

/// Game configuration constants
pub mod consts {
    /// Board is BOARD_SIZE x BOARD_SIZE cells regardless of pixel size
    pub const BOARD_SIZE: i32 = 20;
    /// Total cells on the board
    pub const BOARD_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

    /// Simulated time per tick
    pub const TICK_INTERVAL_MS: u32 = 110;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Minimum gap between the floating window and the viewport edges
    pub const WINDOW_MARGIN: f32 = 8.0;
    /// Window opens at viewport center minus this on both axes
    pub const WINDOW_OPEN_OFFSET: f32 = 180.0;
}
