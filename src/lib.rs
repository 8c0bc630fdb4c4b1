//! Hex board core crate.
//!
//! Draws a rhombus of hexagonal cells on a canvas, turns clicks into cell
//! coordinates and drives a remote game engine (exposed by the host page as
//! `window.hexEngine`) from the pointer and a poll timer. Geometry and
//! rendering are plain Rust and run natively; only `bridge`, `logging` and the
//! session glue in `board` touch the browser.

use wasm_bindgen::prelude::*;

pub mod board;
pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod notify;
pub mod settings;

use bridge::JsEngine;
use notify::{AlertNotifier, Notice, Notifier};

pub use board::controller::{ClickOutcome, ClickPosition, InteractionController, Phase, TickOutcome};
pub use board::geometry::{CellRef, GridSpec, HexLayout, Point};
pub use board::render::BoardRenderer;
pub use config::{BoardConfig, Palette};
pub use engine::{BoardState, CellValue, GameEngine, Player};
pub use error::{BoardError, ConfigError, EngineError, GeometryError, HexError};
pub use settings::{ConfigOutcome, GameSettings};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start the board. `config_json` is an optional [`BoardConfig`] document;
/// missing fields take their defaults.
#[wasm_bindgen]
pub async fn start_game(config_json: Option<String>) -> Result<(), JsValue> {
    let config = BoardConfig::from_json_or_default(config_json.as_deref()).map_err(HexError::from)?;
    logging::set_level(config.log_level);
    board::start_board_session(config).await?;
    Ok(())
}

#[wasm_bindgen]
pub fn stop_game() {
    board::stop_board_session();
}

/// Cell under a canvas-local point of the running board as `[row, col]`,
/// `[-1, -1]` when there is no cell (or no board).
#[wasm_bindgen]
pub fn cell_at(x: f64, y: f64) -> Vec<i32> {
    let cell = board::current_session()
        .and_then(|ctl| ctl.renderer().layout().cell_at(Point::new(x, y)));
    let (row, col) = CellRef::to_wire(cell);
    vec![row, col]
}

/// Cells adjacent to `(row, col)` on the running board, flattened as
/// `[row0, col0, row1, col1, ...]`. Empty when there is no board or the cell
/// is off it.
#[wasm_bindgen]
pub fn cell_neighbors(row: u32, col: u32) -> Vec<u32> {
    let Some(ctl) = board::current_session() else {
        return Vec::new();
    };
    let spec = ctl.renderer().layout().spec();
    let cell = CellRef::new(row as usize, col as usize);
    if !spec.contains(cell) {
        return Vec::new();
    }
    board::geometry::neighbors(cell, spec)
        .into_iter()
        .flat_map(|n| [n.row as u32, n.col as u32])
        .collect()
}

/// Ask the engine to load settings from `file_name`. Returns true only when
/// the engine loaded the file.
#[wasm_bindgen]
pub async fn load_config_from_file(file_name: String) -> bool {
    let outcome = settings::load_config_from_file(&JsEngine, &AlertNotifier, &file_name).await;
    outcome == ConfigOutcome::Done
}

/// Ask the engine to save `settings_json` under `file_name`. A `None` file
/// name means the player dismissed the prompt.
#[wasm_bindgen]
pub async fn save_config(settings_json: String, file_name: Option<String>) -> bool {
    let game_settings = match GameSettings::from_json(&settings_json) {
        Ok(s) => s,
        Err(err) => {
            log::error!("bad settings document: {err}");
            AlertNotifier.notify(Notice::error("Error!", settings::SAVE_FAILURE));
            return false;
        }
    };
    let outcome = settings::save_config(
        &JsEngine,
        &AlertNotifier,
        &game_settings,
        file_name.as_deref(),
    )
    .await;
    outcome == ConfigOutcome::Done
}
