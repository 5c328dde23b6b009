//! Window drag controller
//!
//! Two states, Idle and Dragging. While dragging, every move places the
//! window's top-left at `pointer - offset`, clamped per axis to
//! `[margin, viewport - window - margin]`.
//!
//! The controller owns the window position outright; nothing in the game
//! state machine reads or writes it.

use glam::Vec2;

use super::pointer::{PointerEvent, PointerPhase, PointerSample};

/// Transient drag state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Pointer offset from the window's top-left at drag start
    Dragging { offset: Vec2 },
}

/// What a drag input did; the host toggles text selection on Started/Ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Nothing changed
    Ignored,
    /// Drag began; disable text selection
    Started,
    /// Window moved to the new (clamped) position
    Moved(Vec2),
    /// Drag finished; restore text selection
    Ended,
}

/// Floating window position and drag gesture tracking
#[derive(Debug, Clone)]
pub struct DragController {
    position: Vec2,
    window_size: Vec2,
    viewport: Vec2,
    margin: f32,
    state: DragState,
}

impl DragController {
    /// Open a window of `window_size` at `viewport / 2 - open_offset`
    pub fn new(viewport: Vec2, window_size: Vec2, margin: f32, open_offset: f32) -> Self {
        let mut controller = Self {
            position: viewport * 0.5 - Vec2::splat(open_offset),
            window_size,
            viewport,
            margin,
            state: DragState::Idle,
        };
        controller.position = controller.clamp(controller.position);
        controller
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Clamp a candidate top-left into the allowed region.
    ///
    /// If the window is too large for the viewport the lower bound wins.
    pub fn clamp(&self, candidate: Vec2) -> Vec2 {
        let min = Vec2::splat(self.margin);
        let max = self.viewport - self.window_size - Vec2::splat(self.margin);
        candidate.min(max).max(min)
    }

    /// Dispatch a raw pointer event
    pub fn handle(&mut self, event: &PointerEvent) -> DragUpdate {
        match event.phase {
            PointerPhase::End => self.end(),
            PointerPhase::Start | PointerPhase::Move => {
                let Some(sample) = PointerSample::normalize(&event.source) else {
                    return DragUpdate::Ignored;
                };
                if event.phase == PointerPhase::Start {
                    self.begin(sample)
                } else {
                    self.drag_to(sample)
                }
            }
        }
    }

    /// Start a drag at `sample`, capturing its offset from the top-left
    pub fn begin(&mut self, sample: PointerSample) -> DragUpdate {
        let offset = sample.position() - self.position;
        let was_dragging = self.is_dragging();
        self.state = DragState::Dragging { offset };
        if was_dragging {
            DragUpdate::Ignored
        } else {
            log::debug!("Window drag started (offset {:?})", offset);
            DragUpdate::Started
        }
    }

    /// Follow the pointer while dragging
    pub fn drag_to(&mut self, sample: PointerSample) -> DragUpdate {
        let DragState::Dragging { offset } = self.state else {
            return DragUpdate::Ignored;
        };
        self.position = self.clamp(sample.position() - offset);
        DragUpdate::Moved(self.position)
    }

    /// Finish the current drag, if any
    pub fn end(&mut self) -> DragUpdate {
        if !self.is_dragging() {
            return DragUpdate::Ignored;
        }
        self.state = DragState::Idle;
        log::debug!("Window drag ended at {:?}", self.position);
        DragUpdate::Ended
    }

    /// New viewport size; keeps the window inside it
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.position = self.clamp(self.position);
    }

    /// Measured window size; keeps the window inside the viewport
    pub fn set_window_size(&mut self, window_size: Vec2) {
        self.window_size = window_size;
        self.position = self.clamp(self.position);
    }

    /// Drop any drag in progress (host teardown)
    pub fn teardown(&mut self) -> DragUpdate {
        self.end()
    }
}
