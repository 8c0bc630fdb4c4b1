//! Structured error types for the board engine.

use wasm_bindgen::JsValue;

/// Invalid grid dimensions. Geometry is undefined for these, so nothing is drawn.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("hexagon radius must be a positive finite number (got {0})")]
    InvalidRadius(f64),
}

/// A board snapshot that does not describe a rectangular table of {0, 1, 2}.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("board cell ({row}, {col}) holds {value}, expected 0, 1 or 2")]
    InvalidCell { row: usize, col: usize, value: i64 },
}

/// Failures talking to the remote game engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine rejected {operation}: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    #[error("engine returned an unexpected value for {operation} (expected {expected})")]
    UnexpectedValue {
        operation: &'static str,
        expected: &'static str,
    },

    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        source: serde_json::Error,
    },

    #[error("unknown player id {0}")]
    UnknownPlayer(i64),

    #[error("invalid board snapshot: {0}")]
    Board(#[from] BoardError),

    #[error("invalid settings: {0}")]
    Settings(#[from] ConfigError),
}

impl EngineError {
    /// Wrap a rejected promise value from the JS host.
    pub fn rejected(operation: &'static str, value: &JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        EngineError::Rejected { operation, message }
    }
}

/// Errors that can occur when loading board or game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Umbrella error for the browser entry points.
#[derive(Debug, thiserror::Error)]
pub enum HexError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl HexError {
    pub fn dom(what: impl Into<String>) -> Self {
        HexError::Dom(what.into())
    }
}

impl From<JsValue> for HexError {
    fn from(value: JsValue) -> Self {
        HexError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<HexError> for JsValue {
    fn from(err: HexError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::EmptyGrid { rows: 0, cols: 4 };
        assert_eq!(
            err.to_string(),
            "grid must have at least one row and one column (got 0x4)"
        );
    }

    #[test]
    fn test_board_error_display() {
        let err = BoardError::InvalidCell {
            row: 2,
            col: 3,
            value: 7,
        };
        assert_eq!(
            err.to_string(),
            "board cell (2, 3) holds 7, expected 0, 1 or 2"
        );
    }

    #[test]
    fn test_engine_error_wraps_board_error() {
        let err: EngineError = BoardError::Ragged {
            row: 1,
            expected: 3,
            found: 2,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid board snapshot: board row 1 has 2 cells, expected 3"
        );
    }

    #[test]
    fn test_engine_error_wraps_settings_error() {
        let err: EngineError = ConfigError::Validation("board size must be positive".into()).into();
        assert!(matches!(err, EngineError::Settings(_)));
        assert_eq!(
            err.to_string(),
            "invalid settings: config validation error: board size must be positive"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("radius must be > 0".to_string());
        assert_eq!(err.to_string(), "config validation error: radius must be > 0");
    }
}
