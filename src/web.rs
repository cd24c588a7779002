//! Browser host
//!
//! Wires a session to the page: `setTimeout` for delayed transitions, the
//! window `resize` event as viewport provider and `window.confetti` (if the
//! page loaded it) for celebrations. Drawing is left to JavaScript, which
//! reads the layout as JSON.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::celebration::{Celebration, ConfettiBurst};
use crate::fraction::FractionSpec;
use crate::session::{GuessField, Scheduler, SessionController, TimerId};
use crate::settings::Settings;
use crate::viewport::{DEFAULT_VIEWPORT_WIDTH, Subscription, ViewportSizeProvider};

#[wasm_bindgen(inline_js = "
    export function fire_confetti(particle_count, spread, origin_x, origin_y) {
        if (typeof window.confetti === 'function') {
            window.confetti({
                particleCount: particle_count,
                spread: spread,
                origin: { x: origin_x, y: origin_y },
            });
        }
    }
")]
extern "C" {
    fn fire_confetti(particle_count: u32, spread: f32, origin_x: f32, origin_y: f32);
}

/// Celebration through the page's canvas-confetti global
pub struct ConfettiCannon;

impl Celebration for ConfettiCannon {
    fn celebrate(&mut self, burst: &ConfettiBurst) {
        fire_confetti(burst.particle_count, burst.spread, burst.origin.0, burst.origin.1);
    }
}

/// Window width and `resize` events
pub struct WindowViewport;

fn window_width() -> f32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w as f32)
        .unwrap_or(DEFAULT_VIEWPORT_WIDTH)
}

impl ViewportSizeProvider for WindowViewport {
    fn current_width(&self) -> f32 {
        window_width()
    }

    fn subscribe(&self, mut listener: Box<dyn FnMut(f32)>) -> Subscription {
        let Some(window) = web_sys::window() else {
            log::warn!("No window; viewport width will not update");
            return Subscription::detached();
        };
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            listener(window_width());
        });
        if let Err(e) = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref()) {
            log::warn!("Cannot listen for resize: {:?}", e);
            return Subscription::detached();
        }
        Subscription::new(move || {
            let _ = window.remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        })
    }
}

type WebController = SessionController<WebScheduler, ConfettiCannon>;

struct Host {
    controller: WebController,
    /// JavaScript callback run after timer-driven changes
    on_change: Option<js_sys::Function>,
}

/// Delayed transitions on `window.setTimeout`
pub struct WebScheduler {
    host: Weak<RefCell<Host>>,
    handles: HashMap<TimerId, i32>,
}

impl WebScheduler {
    fn new(host: Weak<RefCell<Host>>) -> Self {
        Self {
            host,
            handles: HashMap::new(),
        }
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, id: TimerId, delay_ms: u32) {
        let Some(window) = web_sys::window() else {
            log::warn!("No window; timer {:?} dropped", id);
            return;
        };
        // Older handles were either fired or cancelled before a new schedule
        self.handles.clear();

        let host = self.host.clone();
        let callback = Closure::once_into_js(move || {
            let Some(host) = host.upgrade() else {
                return;
            };
            let on_change = match host.try_borrow_mut() {
                Ok(mut host) => {
                    host.controller.fire(id);
                    host.on_change.clone()
                }
                Err(_) => {
                    log::debug!("Timer {:?} landed mid-dispatch, ignored", id);
                    None
                }
            };
            if let Some(f) = on_change {
                let _ = f.call0(&JsValue::NULL);
            }
        });

        let delay = delay_ms.min(i32::MAX as u32) as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay) {
            Ok(handle) => {
                self.handles.insert(id, handle);
            }
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let (Some(handle), Some(window)) = (self.handles.remove(&id), web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// Session handle exported to JavaScript
#[wasm_bindgen]
pub struct FractionFoods {
    host: Rc<RefCell<Host>>,
}

#[wasm_bindgen]
impl FractionFoods {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FractionFoods {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let host = Rc::new_cyclic(|weak| {
            RefCell::new(Host {
                controller: SessionController::new(settings, WebScheduler::new(weak.clone()), ConfettiCannon, seed),
                on_change: None,
            })
        });
        host.borrow_mut().controller.attach_viewport(&WindowViewport);
        log::info!("Session initialized with seed: {}", seed);
        FractionFoods { host }
    }

    /// Register a callback run whenever a timer changes the session
    pub fn set_on_change(&self, callback: js_sys::Function) {
        self.host.borrow_mut().on_change = Some(callback);
    }

    pub fn submit(&self, numerator: f64, denominator: f64) {
        let guess = FractionSpec::coerce(numerator, denominator);
        self.host.borrow_mut().controller.submit(guess);
    }

    pub fn submit_current_guess(&self) {
        self.host.borrow_mut().controller.submit_current_guess();
    }

    pub fn adjust_numerator(&self, delta: i32) {
        self.host.borrow_mut().controller.adjust_guess(GuessField::Numerator, delta);
    }

    pub fn adjust_denominator(&self, delta: i32) {
        self.host.borrow_mut().controller.adjust_guess(GuessField::Denominator, delta);
    }

    pub fn phase(&self) -> String {
        self.host.borrow().controller.phase().as_str().to_string()
    }

    pub fn prompt(&self) -> String {
        self.host.borrow().controller.prompt()
    }

    pub fn guess_numerator(&self) -> u32 {
        self.host.borrow().controller.user_guess().numerator
    }

    pub fn guess_denominator(&self) -> u32 {
        self.host.borrow().controller.user_guess().denominator
    }

    /// Layout of the current shape as JSON
    pub fn layout_json(&self) -> Result<String, JsValue> {
        self.host
            .borrow()
            .controller
            .layout()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Show or hide slice lines and remember the choice
    pub fn set_show_slice_lines(&self, show: bool) {
        let mut host = self.host.borrow_mut();
        host.controller.set_show_slice_lines(show);
        host.controller.settings().save();
    }

    /// Persist the current settings to LocalStorage
    pub fn save_settings(&self) {
        self.host.borrow().controller.settings().save();
    }

    /// Cancel timers and stop listening for resizes
    pub fn teardown(&self) {
        self.host.borrow_mut().controller.teardown();
    }
}

impl Default for FractionFoods {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Fraction Foods starting...");
}
