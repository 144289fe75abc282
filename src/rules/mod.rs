//! Rules: path arithmetic, rule variants, legal moves and the turn engine.
//!
//! Layered bottom-up:
//! - [`PathCalculator`] walks a color's path on the [`BoardLayout`](crate::board::BoardLayout)
//! - [`RuleSet`] answers entry, capture, extra-turn and forfeit questions
//! - [`MoveValidator`] combines the two into the legal-move set
//! - [`GameEngine`] drives phases and turns on top of the validator
//!
//! The engine calls into `RuleSet` but never hardcodes a house rule itself.

pub mod engine;
pub mod path;
pub mod ruleset;
pub mod validator;

pub use engine::GameEngine;
pub use path::PathCalculator;
pub use ruleset::{RuleSet, StandardRuleSet};
pub use validator::MoveValidator;
