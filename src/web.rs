//! Browser bindings
//!
//! JavaScript owns the canvas, the DOM, fetch and the key/touch handlers. It
//! forwards input to a `WebSession`, calls `tick` from `requestAnimationFrame`
//! and paints whatever `snapshot_json` describes.

use wasm_bindgen::prelude::*;

use crate::error::DataLoadError;
use crate::settings::Settings;
use crate::sim::{GamePhase, SessionController, TickInput, Viewport};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Rocket Quiz starting...");
}

/// One quiz session driven from JavaScript
#[wasm_bindgen]
pub struct WebSession {
    inner: SessionController,
}

#[wasm_bindgen]
impl WebSession {
    /// `settings_json` may be empty for defaults. Without a `seed` the clock
    /// picks one.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, settings_json: &str) -> Result<WebSession, JsError> {
        let mut settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).unwrap_or_else(|e| {
                log::warn!("Bad settings, using defaults: {}", e);
                Settings::default()
            })
        };
        let seed = *settings.seed.get_or_insert_with(|| js_sys::Date::now() as u64);
        log::info!("Session seed: {}", seed);
        let inner = SessionController::new(settings, Viewport::new(width, height))
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WebSession { inner })
    }

    /// Hand over the fetched question document. Returns false on failure;
    /// the error is then part of the snapshot.
    pub fn load_questions(&mut self, json: &str) -> bool {
        self.inner.load_questions(json).is_ok()
    }

    /// The fetch itself failed
    pub fn load_failed(&mut self, reason: String) {
        self.inner.fail_load(DataLoadError::Unavailable(reason));
    }

    pub fn move_selection(&mut self, direction: i32) {
        self.inner.move_selection(direction);
    }

    pub fn launch(&mut self) {
        self.inner.launch();
    }

    pub fn advance_after_feedback(&mut self) {
        self.inner.advance_after_feedback();
    }

    /// Space bar: continue on the feedback screen, launch otherwise
    pub fn primary_action(&mut self) {
        match self.inner.phase() {
            GamePhase::Feedback => self.inner.advance_after_feedback(),
            _ => self.inner.launch(),
        }
    }

    /// Once per animation frame
    pub fn tick(&mut self) {
        self.inner.tick(&TickInput::default(), js_sys::Date::now());
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.inner.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::from("null")
        })
    }

    /// Queued session events as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.inner.drain_events()).unwrap_or_else(|_| String::from("[]"))
    }

    /// Final report as JSON, `undefined` until the session is finished
    pub fn report_json(&self) -> Option<String> {
        self.inner
            .report()
            .and_then(|r| serde_json::to_string(&r).ok())
    }
}
