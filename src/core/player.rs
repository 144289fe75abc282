//! Players and AI difficulty.
//!
//! A `Player` is created once from its `PlayerConfig` and keeps its color for
//! the whole game. Only the engine replaces a player's tokens, and it does so
//! by producing a new `Player` value inside a new `GameState`.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::color::PlayerColor;
use super::config::PlayerConfig;
use super::token::{Token, TOKENS_PER_PLAYER};

/// Strength of an AI-controlled seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiDifficulty {
    /// Uniform random choice among legal moves.
    Easy,
    /// Fixed-priority heuristic.
    #[default]
    Medium,
    /// Heuristic plus progress bonus and capture-threat penalty.
    Hard,
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub color: PlayerColor,
    pub name: String,
    pub is_ai: bool,
    pub difficulty: AiDifficulty,
    pub tokens: [Token; TOKENS_PER_PLAYER],
    /// Last value this player rolled (or received as a gift).
    pub last_dice_value: Option<u8>,
}

impl Player {
    /// Create a player with every token in base.
    #[must_use]
    pub fn new(config: &PlayerConfig) -> Self {
        let color = config.color;
        Self {
            color,
            name: config.name.clone(),
            is_ai: config.is_ai,
            difficulty: config.difficulty,
            tokens: std::array::from_fn(|i| Token::in_base(i as u8, color)),
            last_dice_value: None,
        }
    }

    /// Replace the token cells, keeping ids. Mostly useful for setting up
    /// positions in tests and tools.
    #[must_use]
    pub fn with_cells(mut self, cells: [Cell; TOKENS_PER_PLAYER]) -> Self {
        for (token, cell) in self.tokens.iter_mut().zip(cells) {
            token.cell = cell;
        }
        self
    }

    /// Look up a token by id.
    #[must_use]
    pub fn token(&self, id: u8) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// True once all four tokens are home.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.tokens.iter().all(|t| t.cell.is_home())
    }

    /// Number of tokens already home.
    #[must_use]
    pub fn tokens_home(&self) -> usize {
        self.tokens.iter().filter(|t| t.cell.is_home()).count()
    }
}
