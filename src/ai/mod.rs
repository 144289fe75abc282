//! AI move selection.
//!
//! Strategies are trait-based so seats can mix difficulties:
//! - `RandomStrategy` (easy): uniform over legal moves
//! - `HeuristicStrategy` (medium): fixed weights per move feature
//! - `ThreatAwareStrategy` (hard): heuristic plus progress, minus exposure
//!
//! The [`driver`] module runs headless games with them.

pub mod driver;
pub mod scoring;
pub mod strategy;

pub use driver::{play_out, seat_strategies, step};
pub use strategy::{for_difficulty, HeuristicStrategy, MoveStrategy, RandomStrategy, ThreatAwareStrategy};
