//! Floating game window
//!
//! Holds the game session and the drag controller side by side. They share no
//! state; the only place both are read together is [`Overlay::snapshot`].
//!
//! Teardown (explicit [`Overlay::close`] or drop) cancels ticking, ends any
//! drag, and releases every registered listener before the close callback runs.

use std::cell::RefCell;

use glam::Vec2;

use crate::highscores::ScoreStore;
use crate::platform::drag::{DragController, DragUpdate};
use crate::platform::listeners::{Subscription, Subscriptions};
use crate::platform::pointer::PointerEvent;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{Command, CommandOutcome, Key, TickOutcome};
use crate::snapshot::RenderSnapshot;

pub type CloseCallback = Box<dyn FnMut()>;
type SelectionHook = Box<dyn FnMut(bool)>;

pub struct Overlay<S: ScoreStore> {
    session: Session<S>,
    drag: DragController,
    subscriptions: Subscriptions,
    on_close: Option<CloseCallback>,
    /// Called with `false` when a drag starts and `true` when it ends
    selection_hook: Option<SelectionHook>,
    transition_ms: u32,
    closed: bool,
}

impl<S: ScoreStore> Overlay<S> {
    pub fn new(
        settings: &Settings,
        store: S,
        seed: u64,
        retryable: bool,
        viewport: Vec2,
        window_size: Vec2,
        on_close: impl FnMut() + 'static,
    ) -> Self {
        Self {
            session: Session::new(settings, store, seed, retryable),
            drag: DragController::new(
                viewport,
                window_size,
                settings.window_margin,
                settings.open_offset,
            ),
            subscriptions: Subscriptions::new(),
            on_close: Some(Box::new(on_close)),
            selection_hook: None,
            transition_ms: settings.transition_ms,
            closed: false,
        }
    }

    /// Install the text-selection toggle used during drags
    pub fn set_selection_hook(&mut self, hook: impl FnMut(bool) + 'static) {
        self.selection_hook = Some(Box::new(hook));
    }

    /// Keep a listener alive until teardown
    pub fn hold(&mut self, subscription: Subscription) {
        if self.closed {
            subscription.release();
            return;
        }
        self.subscriptions.push(subscription);
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn key(&mut self, key: Key) -> CommandOutcome {
        self.session.key(key)
    }

    /// Start button
    pub fn start(&mut self) -> CommandOutcome {
        self.session.command(Command::Start)
    }

    /// Restart button (shown only for retryable sessions)
    pub fn restart(&mut self) -> CommandOutcome {
        self.session.command(Command::Restart)
    }

    /// Feed frame time to the game
    pub fn frame(&mut self, elapsed_ms: f64) -> TickOutcome {
        self.session.advance(elapsed_ms)
    }

    pub fn pointer(&mut self, event: &PointerEvent) -> DragUpdate {
        if self.closed {
            return DragUpdate::Ignored;
        }
        let update = self.drag.handle(event);
        self.apply_selection(update);
        update
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.drag.resize(viewport);
    }

    pub fn set_window_size(&mut self, window_size: Vec2) {
        self.drag.set_window_size(window_size);
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self.session.state(), &self.drag, self.transition_ms)
    }

    /// Dismiss the window: tear down, then notify the host
    pub fn close(&mut self) {
        if let Some(mut on_close) = self.dismiss() {
            on_close();
        }
    }

    /// Tear down and hand back the close callback without calling it.
    ///
    /// Returns `None` if the overlay was already closed.
    pub fn dismiss(&mut self) -> Option<CloseCallback> {
        if self.closed {
            return None;
        }
        self.teardown();
        self.on_close.take()
    }

    fn teardown(&mut self) {
        self.closed = true;
        self.session.teardown();
        let update = self.drag.teardown();
        self.apply_selection(update);
        self.subscriptions.release_all();
        log::info!("Overlay torn down");
    }

    fn apply_selection(&mut self, update: DragUpdate) {
        let enabled = match update {
            DragUpdate::Started => false,
            DragUpdate::Ended => true,
            _ => return,
        };
        if let Some(hook) = self.selection_hook.as_mut() {
            hook(enabled);
        }
    }
}

/// Close an overlay that its own callbacks can reach.
///
/// The borrow is released before the host is notified, so the callback may
/// read the overlay again. Does nothing if the overlay is already borrowed.
pub fn close_shared<S: ScoreStore>(shared: &RefCell<Overlay<S>>) {
    let on_close = match shared.try_borrow_mut() {
        Ok(mut overlay) => overlay.dismiss(),
        Err(_) => return,
    };
    if let Some(mut on_close) = on_close {
        on_close();
    }
}

impl<S: ScoreStore> Drop for Overlay<S> {
    fn drop(&mut self) {
        if !self.closed {
            self.teardown();
        }
    }
}
