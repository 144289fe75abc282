//! Game state: the single source of truth.
//!
//! ## Immutability
//!
//! A `GameState` is a value. Engine operations take `&GameState` and return a
//! new one; nothing edits a state in place once it has been handed out.
//! Players live in an `im::Vector`, so the copy made by each transition shares
//! every untouched player with its predecessor.
//!
//! ## Invariants
//!
//! - `current_player_index` is a valid index into `players`
//! - `consecutive_sixes` is 0 after the turn passes or a non-six is rolled
//! - `winner` is set iff `phase == GameOver`
//! - `gifted_dice` and `gifted_dice_original_player_index` are both present
//!   or both absent
//!
//! [`GameState::check_invariants`] verifies all four.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::color::PlayerColor;
use super::config::GameConfig;
use super::dice::DiceResult;
use super::player::Player;
use super::token::Token;

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// The current player must roll.
    WaitingForRoll,
    /// Presentation only: a roll animation is playing. The engine never
    /// produces this phase.
    Rolling,
    /// The current player must choose one of the legal moves.
    WaitingForMove,
    /// Presentation only: a move animation is playing. The engine never
    /// produces this phase.
    Animating,
    /// Terminal. `winner` is set.
    GameOver,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Seats in turn order.
    pub players: Vector<Player>,

    /// Whose turn it is.
    pub current_player_index: usize,

    /// The die the current player must use, if any.
    pub dice: Option<DiceResult>,

    pub phase: GamePhase,

    pub winner: Option<PlayerColor>,

    /// Sixes rolled in a row by the current player.
    pub consecutive_sixes: u32,

    /// An unusable roll handed to the current player, not yet promoted to
    /// `dice`.
    pub gifted_dice: Option<DiceResult>,

    /// Who rolled `gifted_dice`.
    pub gifted_dice_original_player_index: Option<usize>,

    /// Rolls applied so far. Source of deterministic roll ids.
    pub roll_count: u64,
}

impl GameState {
    /// Fresh state: all tokens in base, first seat to roll.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::from_players(config.player_configs.iter().map(Player::new).collect())
    }

    /// State with the given players, first seat to roll.
    #[must_use]
    pub fn from_players(players: Vector<Player>) -> Self {
        Self {
            players,
            current_player_index: 0,
            dice: None,
            phase: GamePhase::WaitingForRoll,
            winner: None,
            consecutive_sixes: 0,
            gifted_dice: None,
            gifted_dice_original_player_index: None,
            roll_count: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    #[must_use]
    pub fn current_color(&self) -> PlayerColor {
        self.current_player().color
    }

    /// Index of the seat after `index`, wrapping.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.players.len()
    }

    /// Find a seat by color.
    #[must_use]
    pub fn player_index(&self, color: PlayerColor) -> Option<usize> {
        self.players.iter().position(|p| p.color == color)
    }

    #[must_use]
    pub fn player_by_color(&self, color: PlayerColor) -> Option<&Player> {
        self.players.iter().find(|p| p.color == color)
    }

    /// Every token on the table, in seat then id order.
    pub fn all_tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.players.iter().flat_map(|p| p.tokens.iter().copied())
    }

    /// Current position of the piece `(color, id)`.
    #[must_use]
    pub fn token(&self, color: PlayerColor, id: u8) -> Option<Token> {
        self.player_by_color(color)?.token(id).copied()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True while a gift waits to be promoted by `apply_gifted_dice`.
    #[must_use]
    pub fn has_pending_gift(&self) -> bool {
        self.gifted_dice.is_some()
    }

    /// Check the structural invariants, describing the first violation.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.current_player_index >= self.players.len() {
            return Err(format!(
                "current_player_index {} out of range for {} players",
                self.current_player_index,
                self.players.len()
            ));
        }
        if self.winner.is_some() != (self.phase == GamePhase::GameOver) {
            return Err(format!(
                "winner {:?} inconsistent with phase {:?}",
                self.winner, self.phase
            ));
        }
        if self.gifted_dice.is_some() != self.gifted_dice_original_player_index.is_some() {
            return Err("gifted dice markers must be set together".to_string());
        }
        let gift_roller = self
            .gifted_dice_original_player_index
            .or_else(|| self.dice.and_then(|d| d.gifted_from));
        if let Some(roller) = gift_roller.filter(|&i| i >= self.players.len()) {
            return Err(format!(
                "gift roller index {roller} out of range for {} players",
                self.players.len()
            ));
        }
        if let Some(dice) = self.dice {
            if !dice.is_six() && self.consecutive_sixes != 0 {
                return Err(format!(
                    "consecutive_sixes {} after rolling {}",
                    self.consecutive_sixes, dice.value
                ));
            }
        }
        Ok(())
    }
}
