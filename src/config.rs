//! Board presentation settings, passed in from the host page as JSON.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CANVAS_ID: &str = "hexagon_canvas";
pub const DEFAULT_RADIUS: f64 = 30.0;
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 500;

/// Colors and fonts used by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub outline: String,
    pub line_width: f64,
    /// Top and bottom board sides.
    pub primary_side: String,
    /// Left and right board sides.
    pub secondary_side: String,
    pub player_one: String,
    pub player_two: String,
    pub label: String,
    pub label_font: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            outline: "white".into(),
            line_width: 3.0,
            primary_side: "red".into(),
            secondary_side: "blue".into(),
            player_one: "red".into(),
            player_two: "blue".into(),
            label: "#d0d0d0".into(),
            label_font: "12px 'Fira Code', monospace".into(),
        }
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Id of the `<canvas>` to draw on; created when missing.
    pub canvas_id: String,
    pub radius: f64,
    /// Period of the engine poll while the game is running.
    pub poll_interval_ms: u32,
    pub palette: Palette,
    /// Console log level, e.g. `"debug"` to see every move.
    pub log_level: LevelFilter,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            canvas_id: DEFAULT_CANVAS_ID.into(),
            radius: DEFAULT_RADIUS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            palette: Palette::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `json` if given, otherwise use defaults.
    pub fn from_json_or_default(json: Option<&str>) -> Result<Self, ConfigError> {
        match json {
            Some(s) if !s.trim().is_empty() => Self::from_json(s),
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_id.trim().is_empty() {
            return Err(ConfigError::Validation("canvas_id must not be empty".into()));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Validation("radius must be > 0".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be > 0".into(),
            ));
        }
        if !(self.palette.line_width.is_finite() && self.palette.line_width > 0.0) {
            return Err(ConfigError::Validation(
                "palette.line_width must be > 0".into(),
            ));
        }
        Ok(())
    }
}
