//! Browser host
//!
//! Binds DOM events to the [`Overlay`], drives it from `requestAnimationFrame`,
//! and pushes a JSON [`RenderSnapshot`](crate::snapshot::RenderSnapshot) to the
//! page after every change. Every listener and the frame loop are registered as
//! [`Subscription`]s owned by the overlay, so closing it detaches all of them.
//!
//! Expected element ids: `snake-window`, `snake-handle`, `snake-start`,
//! `snake-restart`, `snake-close`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent,
};

use super::listeners::Subscription;
use super::pointer::{PointerEvent, PointerPhase};
use crate::highscores::{HighScoreStore, ScoreStore};
use crate::overlay::{Overlay, close_shared};
use crate::persistence::{LocalStorage, MemoryStorage};
use crate::settings::Settings;
use crate::sim::{CommandOutcome, Key};

#[wasm_bindgen(inline_js = "
    export function render_snapshot(json) {
        const render = window.__snakeRender;
        if (typeof render === 'function') {
            render(JSON.parse(json));
        }
    }
")]
extern "C" {
    fn render_snapshot(json: &str);
}

type WebOverlay = Overlay<Box<dyn ScoreStore>>;
type Shared = Rc<RefCell<WebOverlay>>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Handle returned to the embedding page
#[wasm_bindgen]
pub struct SnakeOverlay {
    inner: Shared,
}

#[wasm_bindgen]
impl SnakeOverlay {
    /// Dismiss the window (same as the close button)
    pub fn close(&self) {
        close_shared(&self.inner);
    }

    /// Current render snapshot as JSON; `undefined` while an event is being handled
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Option<String> {
        let overlay = self.inner.try_borrow().ok()?;
        Some(overlay.snapshot().to_json())
    }
}

/// Open the snake window inside the current page
#[wasm_bindgen]
pub fn open_snake(
    on_close: js_sys::Function,
    retryable: bool,
    config_json: Option<String>,
) -> Result<SnakeOverlay, JsValue> {
    let settings = Settings::from_json_or_default(config_json.as_deref());
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let element: HtmlElement = document
        .get_element_by_id("snake-window")
        .ok_or_else(|| JsValue::from_str("missing #snake-window"))?
        .dyn_into()?;
    let handle = document
        .get_element_by_id("snake-handle")
        .ok_or_else(|| JsValue::from_str("missing #snake-handle"))?;

    let store: Box<dyn ScoreStore> = match LocalStorage::open() {
        Some(storage) => Box::new(HighScoreStore::with_key(storage, &settings.storage_key)),
        None => {
            log::warn!("LocalStorage unavailable, high score will not survive reload");
            Box::new(HighScoreStore::with_key(MemoryStorage::new(), &settings.storage_key))
        }
    };

    let rect = element.get_bounding_client_rect();
    let overlay = Overlay::new(
        &settings,
        store,
        js_sys::Date::now() as u64,
        retryable,
        viewport_size(&window),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        move || {
            let _ = on_close.call0(&JsValue::NULL);
        },
    );
    let shared: Shared = Rc::new(RefCell::new(overlay));

    {
        let body = document.body();
        shared.borrow_mut().set_selection_hook(move |enabled| {
            if let Some(body) = body.as_ref() {
                let _ = body
                    .style()
                    .set_property("user-select", if enabled { "" } else { "none" });
            }
        });
    }

    let mut subscriptions = Vec::new();

    // Drag start only on the handle
    for (kind, touch) in [("mousedown", false), ("touchstart", true)] {
        let (shared, element) = (shared.clone(), element.clone());
        subscriptions.push(listen(&handle, kind, None, move |event| {
            if let Some(pointer) = pointer_event(&event, PointerPhase::Start, touch) {
                shared.borrow_mut().pointer(&pointer);
                present(&shared.borrow(), &element);
            }
        })?);
    }

    // Move/end observed window-wide
    for (kind, phase, touch) in [
        ("mousemove", PointerPhase::Move, false),
        ("touchmove", PointerPhase::Move, true),
        ("mouseup", PointerPhase::End, false),
        ("touchend", PointerPhase::End, true),
    ] {
        let (shared, element) = (shared.clone(), element.clone());
        let passive = (kind == "touchmove").then_some(false);
        subscriptions.push(listen(&window, kind, passive, move |event| {
            let Some(pointer) = pointer_event(&event, phase, touch) else {
                return;
            };
            if shared.borrow().drag().is_dragging() && kind == "touchmove" {
                event.prevent_default();
            }
            if shared.borrow_mut().pointer(&pointer) != super::drag::DragUpdate::Ignored {
                present(&shared.borrow(), &element);
            }
        })?);
    }

    {
        let (shared, element) = (shared.clone(), element.clone());
        subscriptions.push(listen(&window, "keydown", None, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(key) = Key::from_key_name(&event.key()) else {
                return;
            };
            if key == Key::Pause {
                event.prevent_default();
            }
            if shared.borrow_mut().key(key) == CommandOutcome::Applied {
                present(&shared.borrow(), &element);
            }
        })?);
    }

    {
        let (shared, element) = (shared.clone(), element.clone());
        let window_clone = window.clone();
        subscriptions.push(listen(&window, "resize", None, move |_event| {
            let rect = element.get_bounding_client_rect();
            let mut overlay = shared.borrow_mut();
            overlay.set_window_size(Vec2::new(rect.width() as f32, rect.height() as f32));
            overlay.resize(viewport_size(&window_clone));
            drop(overlay);
            present(&shared.borrow(), &element);
        })?);
    }

    for (id, action) in [
        ("snake-start", ButtonAction::Start),
        ("snake-restart", ButtonAction::Restart),
        ("snake-close", ButtonAction::Close),
    ] {
        let Some(button) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            continue;
        };
        let (shared, element) = (shared.clone(), element.clone());
        subscriptions.push(listen(&button, "click", None, move |_event| {
            match action {
                ButtonAction::Start => {
                    shared.borrow_mut().start();
                }
                ButtonAction::Restart => {
                    shared.borrow_mut().restart();
                }
                ButtonAction::Close => {
                    close_shared(&shared);
                    return;
                }
            }
            present(&shared.borrow(), &element);
        })?);
    }

    subscriptions.push(start_frame_loop(&window, shared.clone(), element.clone())?);

    {
        let mut overlay = shared.borrow_mut();
        for subscription in subscriptions {
            overlay.hold(subscription);
        }
        log::info!("Snake window opened ({} listeners)", overlay.listener_count());
    }
    present(&shared.borrow(), &element);

    Ok(SnakeOverlay { inner: shared })
}

#[derive(Clone, Copy)]
enum ButtonAction {
    Start,
    Restart,
    Close,
}

/// Register a DOM listener; the returned guard removes it
fn listen(
    target: &EventTarget,
    kind: &'static str,
    passive: Option<bool>,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<Subscription, JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    match passive {
        Some(passive) => {
            let options = AddEventListenerOptions::new();
            options.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
        }
        None => {
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        }
    }
    let target = target.clone();
    Ok(Subscription::new(kind, move || {
        let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        drop(closure);
    }))
}

/// Drive the overlay from animation frames until released
fn start_frame_loop(
    window: &web_sys::Window,
    shared: Shared,
    element: HtmlElement,
) -> Result<Subscription, JsValue> {
    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let frame_id = Rc::new(Cell::new(None::<i32>));
    let last_time = Rc::new(Cell::new(None::<f64>));

    {
        let (next, frame_id, window) = (callback.clone(), frame_id.clone(), window.clone());
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            let dt = last_time.get().map(|last| time - last).unwrap_or(0.0);
            last_time.set(Some(time));

            let outcome = shared.borrow_mut().frame(dt);
            if outcome != crate::sim::TickOutcome::Idle {
                present(&shared.borrow(), &element);
            }

            if let Some(next) = next.borrow().as_ref() {
                frame_id.set(window.request_animation_frame(next.as_ref().unchecked_ref()).ok());
            }
        }));
    }

    if let Some(first) = callback.borrow().as_ref() {
        frame_id.set(Some(window.request_animation_frame(first.as_ref().unchecked_ref())?));
    }

    let window = window.clone();
    Ok(Subscription::new("animationframe", move || {
        if let Some(id) = frame_id.take() {
            let _ = window.cancel_animation_frame(id);
        }
        // Breaks the closure's self-reference
        callback.borrow_mut().take();
    }))
}

/// Position the window element and hand the snapshot to the page renderer
fn present(overlay: &WebOverlay, element: &HtmlElement) {
    let snapshot = overlay.snapshot();
    let style = element.style();
    let _ = style.set_property("left", &format!("{}px", snapshot.window.x));
    let _ = style.set_property("top", &format!("{}px", snapshot.window.y));
    let _ = style.set_property(
        "transition",
        &format!(
            "left {ms}ms linear, top {ms}ms linear",
            ms = snapshot.transition_ms
        ),
    );
    render_snapshot(&snapshot.to_json());
}

fn viewport_size(window: &web_sys::Window) -> Vec2 {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(width as f32, height as f32)
}

/// Normalize a DOM mouse/touch event into a [`PointerEvent`]
fn pointer_event(event: &web_sys::Event, phase: PointerPhase, touch: bool) -> Option<PointerEvent> {
    if touch {
        let event = event.dyn_ref::<TouchEvent>()?;
        let list = event.touches();
        let touches = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
            .collect();
        Some(PointerEvent::touch(phase, touches))
    } else {
        let event = event.dyn_ref::<MouseEvent>()?;
        Some(PointerEvent::mouse(
            phase,
            event.client_x() as f32,
            event.client_y() as f32,
        ))
    }
}
