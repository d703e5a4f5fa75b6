//! Pop Rise core crate.
//!
//! Circles float up from below the canvas; click them to pop them. Targets arrive
//! in waves, and every wave cleared off the screen raises the level (and with it
//! the rising speed) until the whole batch has been popped or lost off the top.
//!
//! The simulation (`game`, `target`, `input`, `hud`, `audio`, `config`) is plain
//! Rust and tests on the host. `web` wires it to a canvas, the DOM and WebAudio.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod config;
pub mod game;
pub mod hud;
pub mod input;
pub mod target;
mod web;

pub use audio::{AudioNotifier, MusicSequencer, NullAudio};
pub use config::{GameConfig, GroupSize};
pub use game::{GameState, TickOutcome};
pub use hud::HudSnapshot;
pub use input::{CanvasMapping, Point};
pub use target::Target;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) fails harmlessly.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Start with the built-in tuning.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Start with a JSON tuning override; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    web::start(config)
}
