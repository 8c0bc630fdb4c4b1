//! Browser bridge to the game engine.
//!
//! The host page exposes the engine as `window.hexEngine`, an object whose
//! methods return promises (for example by forwarding to the Python side):
//!
//! ```js
//! window.hexEngine = {
//!   getBoard: () => eel.eel_get_board()(),
//!   setPlayerMove: (player, row, col) => eel.eel_set_player_move(player, row, col)(),
//!   // ...
//! };
//! ```

use wasm_bindgen::prelude::*;

use crate::board::geometry::CellRef;
use crate::engine::{BoardState, GameEngine, Player};
use crate::error::EngineError;
use crate::settings::GameSettings;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = getBoard)]
    async fn js_get_board() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = isGameOver)]
    async fn js_is_game_over() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = getWinner)]
    async fn js_get_winner() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = getCurrentPlayer)]
    async fn js_get_current_player() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = isCurrentPlayerHuman)]
    async fn js_is_current_player_human() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = setPlayerMove)]
    async fn js_set_player_move(player: u8, row: u32, col: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = updateGame)]
    async fn js_update_game() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = loadConfigFromFile)]
    async fn js_load_config_from_file(file_name: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hexEngine, js_name = saveConfig)]
    async fn js_save_config(config: JsValue, file_name: &str) -> Result<JsValue, JsValue>;
}

/// [`GameEngine`] backed by `window.hexEngine`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsEngine;

fn expect_bool(operation: &'static str, value: JsValue) -> Result<bool, EngineError> {
    value.as_bool().ok_or(EngineError::UnexpectedValue {
        operation,
        expected: "boolean",
    })
}

fn stringify(operation: &'static str, value: &JsValue) -> Result<String, EngineError> {
    js_sys::JSON::stringify(value)
        .map_err(|e| EngineError::rejected(operation, &e))?
        .as_string()
        .ok_or(EngineError::UnexpectedValue {
            operation,
            expected: "JSON value",
        })
}

impl GameEngine for JsEngine {
    async fn board(&self) -> Result<BoardState, EngineError> {
        let value = js_get_board()
            .await
            .map_err(|e| EngineError::rejected("getBoard", &e))?;
        BoardState::from_json(&stringify("getBoard", &value)?)
    }

    async fn is_game_over(&self) -> Result<bool, EngineError> {
        let value = js_is_game_over()
            .await
            .map_err(|e| EngineError::rejected("isGameOver", &e))?;
        expect_bool("isGameOver", value)
    }

    async fn winner(&self) -> Result<Option<String>, EngineError> {
        let value = js_get_winner()
            .await
            .map_err(|e| EngineError::rejected("getWinner", &e))?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        value.as_string().map(Some).ok_or(EngineError::UnexpectedValue {
            operation: "getWinner",
            expected: "string",
        })
    }

    async fn current_player(&self) -> Result<Player, EngineError> {
        let value = js_get_current_player()
            .await
            .map_err(|e| EngineError::rejected("getCurrentPlayer", &e))?;
        let id = value.as_f64().ok_or(EngineError::UnexpectedValue {
            operation: "getCurrentPlayer",
            expected: "number",
        })?;
        Player::try_from(id as i64)
    }

    async fn is_current_player_human(&self) -> Result<bool, EngineError> {
        let value = js_is_current_player_human()
            .await
            .map_err(|e| EngineError::rejected("isCurrentPlayerHuman", &e))?;
        expect_bool("isCurrentPlayerHuman", value)
    }

    async fn set_player_move(&self, player: Player, cell: CellRef) -> Result<(), EngineError> {
        js_set_player_move(player.id(), cell.row as u32, cell.col as u32)
            .await
            .map_err(|e| EngineError::rejected("setPlayerMove", &e))?;
        Ok(())
    }

    async fn update_game(&self) -> Result<(), EngineError> {
        js_update_game()
            .await
            .map_err(|e| EngineError::rejected("updateGame", &e))?;
        Ok(())
    }

    async fn load_config_from_file(&self, file_name: &str) -> Result<(), EngineError> {
        js_load_config_from_file(file_name)
            .await
            .map_err(|e| EngineError::rejected("loadConfigFromFile", &e))?;
        Ok(())
    }

    async fn save_config(
        &self,
        settings: &GameSettings,
        file_name: &str,
    ) -> Result<(), EngineError> {
        let json = settings.to_json()?;
        let config = js_sys::JSON::parse(&json)
            .map_err(|e| EngineError::rejected("saveConfig", &e))?;
        js_save_config(config, file_name)
            .await
            .map_err(|e| EngineError::rejected("saveConfig", &e))?;
        Ok(())
    }
}
