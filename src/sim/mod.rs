//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One grid step per tick, no clock access
//! - Seeded RNG only
//! - No rendering, storage, or platform dependencies

pub mod food;
pub mod input;
pub mod state;
pub mod tick;

pub use food::{MAX_FOOD_ATTEMPTS, place_food};
pub use input::{Command, CommandOutcome, Key, apply, command_for_key};
pub use state::{Cell, Direction, GamePhase, GameState, INITIAL_DIRECTION, INITIAL_SNAKE};
pub use tick::{Collision, TickOutcome, tick};
