//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Pointer/touch input and window dragging
//! - Frame time to fixed ticks
//! - Listener registration with guaranteed release
//! - DOM wiring (wasm32 only)

pub mod drag;
pub mod listeners;
pub mod pointer;
pub mod ticker;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use drag::{DragController, DragState, DragUpdate};
pub use listeners::{Subscription, Subscriptions};
pub use pointer::{PointerEvent, PointerPhase, PointerSample, PointerSource};
pub use ticker::Ticker;
