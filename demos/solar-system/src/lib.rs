use wasm_bindgen::prelude::*;
use orrery_engine::InputEvent;

pub mod bodies;
pub mod config;
pub mod game;
pub mod kinematics;
pub mod overlay;
pub mod scene;
pub mod selection;
pub mod starfield;

pub use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

// ── Game-specific exports ────────────────────────────────────────────

/// Info card text revealed so far (typewriter state).
#[wasm_bindgen]
pub fn get_info_text() -> String {
    with_runner(|r| r.game().info_text().to_owned())
}

#[wasm_bindgen]
pub fn is_info_visible() -> bool {
    with_runner(|r| r.game().is_info_visible())
}

/// Current GUI settings as JSON (`{"showOrbits":true,"orbitSpeedMultiplier":1.0}`).
#[wasm_bindgen]
pub fn get_scene_config() -> String {
    with_runner(|r| r.game().scene_config().to_json().unwrap_or_default())
}
