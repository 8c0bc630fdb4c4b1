//! Contract of the remote game engine and the board snapshots it hands out.
//!
//! The engine owns the rules, turn order and AI players. This crate only reads
//! snapshots from it and forwards moves; see [`crate::bridge::JsEngine`] for the
//! browser implementation.

use std::fmt;

use serde::Deserialize;

use crate::board::geometry::CellRef;
use crate::error::{BoardError, EngineError};
use crate::settings::GameSettings;

/// One of the two players. The numeric id is what the engine speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for Player {
    type Error = EngineError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(EngineError::UnknownPlayer(other)),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// Occupancy of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellValue {
    #[default]
    Empty,
    Taken(Player),
}

impl CellValue {
    pub fn player(self) -> Option<Player> {
        match self {
            CellValue::Empty => None,
            CellValue::Taken(p) => Some(p),
        }
    }
}

/// Read-only, row-major snapshot of the engine's board.
///
/// Snapshots are fetched on demand and thrown away after each render; nothing
/// in this crate mutates one after decoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>")]
pub struct BoardState {
    rows: usize,
    cols: usize,
    cells: Vec<CellValue>,
}

impl BoardState {
    /// Build a snapshot from the engine's nested `{0, 1, 2}` table.
    pub fn from_rows(table: Vec<Vec<i64>>) -> Result<Self, BoardError> {
        let rows = table.len();
        let cols = table.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows * cols);
        for (row, values) in table.into_iter().enumerate() {
            if values.len() != cols {
                return Err(BoardError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for (col, value) in values.into_iter().enumerate() {
                let cell = match value {
                    0 => CellValue::Empty,
                    1 => CellValue::Taken(Player::One),
                    2 => CellValue::Taken(Player::Two),
                    _ => return Err(BoardError::InvalidCell { row, col, value }),
                };
                cells.push(cell);
            }
        }
        Ok(Self { rows, cols, cells })
    }

    /// An all-empty board of the given size.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellValue::Empty; rows * cols],
        }
    }

    /// Decode the JSON form of the engine's `getBoard` response.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|source| EngineError::Decode {
            operation: "getBoard",
            source,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, cell: CellRef) -> Option<CellValue> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return None;
        }
        self.cells.get(cell.row * self.cols + cell.col).copied()
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (CellRef, Player)> + '_ {
        let cols = self.cols.max(1);
        self.cells.iter().enumerate().filter_map(move |(idx, v)| {
            v.player()
                .map(|p| (CellRef::new(idx / cols, idx % cols), p))
        })
    }
}

impl TryFrom<Vec<Vec<i64>>> for BoardState {
    type Error = BoardError;

    fn try_from(table: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        BoardState::from_rows(table)
    }
}

/// Operations consumed from the remote engine.
///
/// Each call is a suspension point: the handler awaiting it yields to the event
/// loop until the engine answers. Futures are not `Send`; everything runs on the
/// single UI thread.
#[allow(async_fn_in_trait)]
pub trait GameEngine {
    async fn board(&self) -> Result<BoardState, EngineError>;
    async fn is_game_over(&self) -> Result<bool, EngineError>;
    /// Display name of the winner, `None` when the engine reports no winner.
    async fn winner(&self) -> Result<Option<String>, EngineError>;
    async fn current_player(&self) -> Result<Player, EngineError>;
    async fn is_current_player_human(&self) -> Result<bool, EngineError>;
    async fn set_player_move(&self, player: Player, cell: CellRef) -> Result<(), EngineError>;
    /// Advance turn bookkeeping and let an AI player move.
    async fn update_game(&self) -> Result<(), EngineError>;
    async fn load_config_from_file(&self, file_name: &str) -> Result<(), EngineError>;
    async fn save_config(
        &self,
        settings: &GameSettings,
        file_name: &str,
    ) -> Result<(), EngineError>;
}
