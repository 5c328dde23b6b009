//! Pointer normalization
//!
//! Mouse and touch events are reduced to one [`PointerSample`] (client
//! coordinates) before any drag math runs.

use glam::Vec2;

/// Gesture stage of a raw pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// mousedown / touchstart on the drag handle
    Start,
    /// mousemove / touchmove anywhere in the window
    Move,
    /// mouseup / touchend anywhere in the window
    End,
}

/// Where a pointer event came from, with its raw coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSource {
    Mouse { client: Vec2 },
    /// Active touch points in client coordinates (may be empty)
    Touch { touches: Vec<Vec2> },
}

/// A raw pointer event from the host
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse {
                client: Vec2::new(x, y),
            },
        }
    }

    pub fn touch(phase: PointerPhase, touches: Vec<Vec2>) -> Self {
        Self {
            phase,
            source: PointerSource::Touch { touches },
        }
    }
}

/// One normalized pointer position in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample(pub Vec2);

impl PointerSample {
    /// Single reading for any source; first touch wins, no touches gives `None`
    pub fn normalize(source: &PointerSource) -> Option<PointerSample> {
        match source {
            PointerSource::Mouse { client } => Some(PointerSample(*client)),
            PointerSource::Touch { touches } => touches.first().copied().map(PointerSample),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.0
    }
}
