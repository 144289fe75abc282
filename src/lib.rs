//! # ludo-engine
//!
//! A deterministic Ludo rules engine with lockstep peer replication.
//!
//! ## Design Principles
//!
//! 1. **Immutable States**: Every transition takes a `GameState` and returns a
//!    new one. Players live in an `im::Vector`, so each copy is O(1).
//!
//! 2. **Pure Transitions**: Apart from rolling a die, every engine call is a
//!    pure function of `(state, input)`. Replicas that apply the same inputs
//!    hold identical states.
//!
//! 3. **Swappable Rules**: House-rule variants are `RuleSet` implementations,
//!    not branches in the state machine.
//!
//! ## Modules
//!
//! - `core`: Colors, cells, tokens, players, dice, moves, state, config, RNG
//! - `board`: Per-color paths and safe cells
//! - `rules`: Path calculator, rule set, move validator, game engine
//! - `ai`: Move selection strategies and a headless driver
//! - `sync`: Wire messages, client replica, relay rooms
//! - `error`: Config and sync error types
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use ludo_engine::{BoardLayout, GameConfig, GameEngine, GameRng};
//!
//! let engine = GameEngine::new(Arc::new(BoardLayout::standard()), GameConfig::with_players(2)).unwrap();
//! let mut rng = GameRng::new(7);
//!
//! let state = engine.create_initial_state();
//! let state = engine.roll_dice(&state, &mut rng);
//! assert!(state.check_invariants().is_ok());
//! ```

pub mod ai;
pub mod board;
pub mod core;
pub mod error;
pub mod rules;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    AiDifficulty, Cell, DiceResult, GameConfig, GamePhase, GameRng, GameRngState, GameState,
    Move, Player, PlayerColor, PlayerConfig, Token,
};

pub use crate::board::BoardLayout;

pub use crate::rules::{GameEngine, MoveValidator, PathCalculator, RuleSet, StandardRuleSet};

pub use crate::ai::{for_difficulty, MoveStrategy};

pub use crate::sync::{GameMessage, MessageKind, RelayRooms, Replica, SessionPhase};

pub use crate::error::{ConfigError, SyncError};
