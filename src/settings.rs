//! Game settings edited on the settings page and stored by the engine.
//!
//! Loading and saving happen on the engine side; this module validates what
//! the page hands over and reports the outcome to the player. Failures are
//! caught here and turned into an error notice, never propagated.

use serde::{Deserialize, Serialize};

use crate::engine::GameEngine;
use crate::error::ConfigError;
use crate::notify::{Notice, Notifier};

/// Move-selection strategy of a player, as named in the engine config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Human,
    Random,
    Minimax,
    AlphaBeta,
    NegaBeta,
    Sss,
    Mcts,
}

impl Algorithm {
    /// Whether the strategy searches a game tree and needs a depth.
    pub fn uses_depth(self) -> bool {
        matches!(
            self,
            Algorithm::Minimax | Algorithm::AlphaBeta | Algorithm::NegaBeta | Algorithm::Sss
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub player1_algorithm: Algorithm,
    pub player1_depth: u32,
    pub player2_algorithm: Algorithm,
    pub player2_depth: u32,
}

/// Board size. Signed so that bad form input reaches validation instead of
/// failing to parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSize {
    pub board_width: i64,
    pub board_height: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub user: UserSettings,
    pub game: BoardSize,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            user: UserSettings {
                player1_algorithm: Algorithm::Human,
                player1_depth: 3,
                player2_algorithm: Algorithm::AlphaBeta,
                player2_depth: 3,
            },
            game: BoardSize {
                board_width: 11,
                board_height: 11,
            },
        }
    }
}

impl GameSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: GameSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.board_width <= 0 || self.game.board_height <= 0 {
            return Err(ConfigError::Validation(format!(
                "board size must be positive (got {}x{})",
                self.game.board_width, self.game.board_height
            )));
        }
        let players = [
            (1, self.user.player1_algorithm, self.user.player1_depth),
            (2, self.user.player2_algorithm, self.user.player2_depth),
        ];
        for (n, algorithm, depth) in players {
            if algorithm.uses_depth() && depth == 0 {
                return Err(ConfigError::Validation(format!(
                    "player{n}_depth must be > 0 for {algorithm:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Result of a load/save request, after the player has been notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigOutcome {
    Done,
    Failed,
    Cancelled,
}

pub const LOAD_SUCCESS: &str = "Configuration loaded successfully!";
pub const LOAD_FAILURE: &str = "There was an error loading the configuration.";
pub const SAVE_SUCCESS: &str = "Configuration saved successfully!";
pub const SAVE_FAILURE: &str = "There was an error saving the configuration.";
pub const MISSING_FILE_NAME: &str = "You need to enter a file name!";

/// Ask the engine to load `file_name` and report the result.
pub async fn load_config_from_file<E, N>(engine: &E, notifier: &N, file_name: &str) -> ConfigOutcome
where
    E: GameEngine,
    N: Notifier + ?Sized,
{
    if file_name.is_empty() {
        return ConfigOutcome::Cancelled;
    }
    match engine.load_config_from_file(file_name).await {
        Ok(()) => {
            log::info!("loaded configuration from {file_name}");
            notifier.notify(Notice::success("Success!", LOAD_SUCCESS));
            ConfigOutcome::Done
        }
        Err(err) => {
            log::error!("error loading configuration {file_name}: {err}");
            notifier.notify(Notice::error("Error!", LOAD_FAILURE));
            ConfigOutcome::Failed
        }
    }
}

/// Validate `settings` and ask the engine to store them as `file_name`.
///
/// `None` means the player dismissed the file name prompt.
pub async fn save_config<E, N>(
    engine: &E,
    notifier: &N,
    settings: &GameSettings,
    file_name: Option<&str>,
) -> ConfigOutcome
where
    E: GameEngine,
    N: Notifier + ?Sized,
{
    let Some(file_name) = file_name else {
        return ConfigOutcome::Cancelled;
    };
    let file_name = file_name.trim();
    if file_name.is_empty() {
        notifier.notify(Notice::error("Error!", MISSING_FILE_NAME));
        return ConfigOutcome::Failed;
    }
    if let Err(err) = settings.validate() {
        log::error!("refusing to save invalid configuration: {err}");
        notifier.notify(Notice::error("Error!", SAVE_FAILURE));
        return ConfigOutcome::Failed;
    }
    match engine.save_config(settings, file_name).await {
        Ok(()) => {
            log::info!("saved configuration as {file_name}");
            notifier.notify(Notice::success("Success!", SAVE_SUCCESS));
            ConfigOutcome::Done
        }
        Err(err) => {
            log::error!("error saving configuration {file_name}: {err}");
            notifier.notify(Notice::error("Error!", SAVE_FAILURE));
            ConfigOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_json_shape() {
        let json = r#"{
            "user": {
                "player1_algorithm": "human",
                "player1_depth": 0,
                "player2_algorithm": "alpha_beta",
                "player2_depth": 4
            },
            "game": { "board_width": 9, "board_height": 7 }
        }"#;
        let settings = GameSettings::from_json(json).unwrap();
        assert_eq!(settings.user.player2_algorithm, Algorithm::AlphaBeta);
        assert_eq!(settings.game.board_height, 7);
        let round = settings.to_json().unwrap();
        assert!(round.contains(r#""player2_algorithm":"alpha_beta""#));
    }

    #[test]
    fn test_settings_reject_bad_sizes_and_depths() {
        let mut settings = GameSettings::default();
        settings.game.board_width = -3;
        assert!(matches!(settings.validate(), Err(ConfigError::Validation(_))));

        let mut settings = GameSettings::default();
        settings.user.player2_algorithm = Algorithm::Minimax;
        settings.user.player2_depth = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::Validation(_))));

        let mut settings = GameSettings::default();
        settings.user.player2_algorithm = Algorithm::Random;
        settings.user.player2_depth = 0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_unknown_algorithm_is_parse_error() {
        let json = r#"{"user":{"player1_algorithm":"oracle","player1_depth":1,
            "player2_algorithm":"human","player2_depth":1},
            "game":{"board_width":3,"board_height":3}}"#;
        assert!(matches!(
            GameSettings::from_json(json),
            Err(ConfigError::Parse(_))
        ));
    }
}
