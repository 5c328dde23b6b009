//! Render snapshot handed to the presentation layer
//!
//! Everything a view needs to redraw, copied out so it never touches live state.

use glam::Vec2;
use serde::Serialize;

use crate::platform::drag::DragController;
use crate::sim::{Cell, GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    /// Snake cells, head first
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
    /// Window top-left in viewport pixels, serialized as `[x, y]`
    pub window: Vec2,
    pub dragging: bool,
    /// Slide duration the view should use when moving the window and cells
    pub transition_ms: u32,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, drag: &DragController, transition_ms: u32) -> Self {
        Self {
            snake: state.snake.iter().copied().collect(),
            food: state.food,
            score: state.score,
            high_score: state.high_score,
            phase: state.phase,
            window: drag.position(),
            dragging: drag.is_dragging(),
            transition_ms,
        }
    }

    pub fn to_json(&self) -> String {
        // Only plain data and finite floats; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_shape() {
        let state = GameState::new(3, 2, true);
        let viewport = Vec2::new(800.0, 600.0);
        let drag = DragController::new(viewport, Vec2::new(320.0, 360.0), 8.0, 180.0);
        let snapshot = RenderSnapshot::capture(&state, &drag, 90);
        assert_eq!(snapshot.snake.len(), 3);
        assert_eq!(snapshot.high_score, 2);

        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json()).unwrap();
        assert_eq!(json["phase"], "NotStarted");
        assert_eq!(json["snake"][0]["x"], 10);
        assert_eq!(json["window"][0], 220.0);
        assert_eq!(json["dragging"], false);
        assert_eq!(json["transition_ms"], 90);
    }
}
