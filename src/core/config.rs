//! Game configuration.
//!
//! A `GameConfig` is chosen once at setup and never changes. It carries the
//! player roster and the house-rule toggles the rule set reads:
//! - `enter_on_six_only`: leave base on a 6 only (otherwise on a 1 or a 6)
//! - `safe_zones_enabled`: suppress captures on safe track cells
//! - `max_consecutive_sixes`: streak length that forfeits the turn
//! - `pass_dice_to_next_player`: gift unusable rolls to the next capable player
//! - `friend_mode`: declared only, no rule reads it
//!
//! Configs serialize to JSON for the wire (`GAME_START`) and load from TOML
//! files for tools.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::color::PlayerColor;
use super::player::AiDifficulty;
use crate::error::ConfigError;

/// Minimum number of seats.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of seats.
pub const MAX_PLAYERS: usize = 4;

/// Configuration of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub color: PlayerColor,
    pub name: String,
    #[serde(default)]
    pub is_ai: bool,
    #[serde(default)]
    pub difficulty: AiDifficulty,
}

impl PlayerConfig {
    /// A human-controlled seat.
    pub fn human(color: PlayerColor, name: impl Into<String>) -> Self {
        Self {
            color,
            name: name.into(),
            is_ai: false,
            difficulty: AiDifficulty::default(),
        }
    }

    /// An AI-controlled seat.
    pub fn ai(color: PlayerColor, name: impl Into<String>, difficulty: AiDifficulty) -> Self {
        Self {
            color,
            name: name.into(),
            is_ai: true,
            difficulty,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats in turn order (2-4, unique colors).
    pub player_configs: Vec<PlayerConfig>,

    #[serde(default = "default_true")]
    pub enter_on_six_only: bool,

    #[serde(default = "default_true")]
    pub safe_zones_enabled: bool,

    /// Consecutive sixes that forfeit the turn (at least 1).
    #[serde(default = "default_max_consecutive_sixes")]
    pub max_consecutive_sixes: u32,

    #[serde(default)]
    pub pass_dice_to_next_player: bool,

    /// Allied diagonal colors. Carried in config and on the wire, but no
    /// capture rule reads it.
    #[serde(default)]
    pub friend_mode: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_consecutive_sixes() -> u32 {
    3
}

impl GameConfig {
    /// Create a configuration with standard rules.
    pub fn new(player_configs: Vec<PlayerConfig>) -> Self {
        Self {
            player_configs,
            enter_on_six_only: true,
            safe_zones_enabled: true,
            max_consecutive_sixes: default_max_consecutive_sixes(),
            pass_dice_to_next_player: false,
            friend_mode: false,
        }
    }

    /// Standard rules with `count` human seats in seating order.
    pub fn with_players(count: usize) -> Self {
        let seats = PlayerColor::ALL
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, &color)| PlayerConfig::human(color, format!("Player {}", i + 1)))
            .collect();
        Self::new(seats)
    }

    #[must_use]
    pub fn with_enter_on_six_only(mut self, enabled: bool) -> Self {
        self.enter_on_six_only = enabled;
        self
    }

    #[must_use]
    pub fn with_safe_zones(mut self, enabled: bool) -> Self {
        self.safe_zones_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_max_consecutive_sixes(mut self, max: u32) -> Self {
        self.max_consecutive_sixes = max;
        self
    }

    #[must_use]
    pub fn with_pass_dice_to_next_player(mut self, enabled: bool) -> Self {
        self.pass_dice_to_next_player = enabled;
        self
    }

    #[must_use]
    pub fn with_friend_mode(mut self, enabled: bool) -> Self {
        self.friend_mode = enabled;
        self
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_configs.len()
    }

    /// Check roster size, color uniqueness and the six-streak threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.player_configs.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ConfigError::PlayerCount(count));
        }

        for (i, seat) in self.player_configs.iter().enumerate() {
            if self.player_configs[..i].iter().any(|s| s.color == seat.color) {
                return Err(ConfigError::DuplicateColor(seat.color));
            }
        }

        if self.max_consecutive_sixes == 0 {
            return Err(ConfigError::Validation(
                "max_consecutive_sixes must be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(vec![
            PlayerConfig::human(PlayerColor::Red, "Player 1"),
            PlayerConfig::ai(PlayerColor::Green, "Player 2", AiDifficulty::Medium),
        ])
    }
}
