//! Board topology: per-color paths, safe cells, home-stretch entries.
//!
//! The layout is pure data built once per game and shared read-only (behind
//! an `Arc`) by the path calculator, validator, engine and AI strategies.

pub mod layout;

pub use layout::{BoardLayout, STANDARD_SAFE_POSITIONS, STANDARD_START_POSITIONS};
