//! Core value types: colors, cells, tokens, players, dice, moves, state,
//! configuration and the deterministic RNG.
//!
//! Everything here is plain data. Rules live in [`crate::rules`].

pub mod cell;
pub mod color;
pub mod config;
pub mod dice;
pub mod moves;
pub mod player;
pub mod rng;
pub mod state;
pub mod token;

pub use cell::{Cell, HOME_STRETCH_LENGTH, TRACK_SIZE};
pub use color::PlayerColor;
pub use config::{GameConfig, PlayerConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use dice::{DiceResult, DICE_FACES};
pub use moves::{Captures, Move};
pub use player::{AiDifficulty, Player};
pub use rng::{GameRng, GameRngState};
pub use state::{GamePhase, GameState};
pub use token::{Token, TOKENS_PER_PLAYER};
