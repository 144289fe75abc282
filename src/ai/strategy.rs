//! Move selection strategies.
//!
//! Strategies are read-only consumers of the legal-move list: they never touch
//! the state and always answer with a member of the list they were given.

use crate::board::BoardLayout;
use crate::core::{AiDifficulty, GameRng, GameState, Move};

use super::scoring::{heuristic_score, threat_aware_score};

// =============================================================================
// Strategy trait
// =============================================================================

/// Policy for picking one of the current legal moves.
pub trait MoveStrategy: std::fmt::Debug + Send + Sync {
    /// Choose a move from `legal_moves`.
    ///
    /// Returns `None` only if `legal_moves` is empty.
    fn choose_move(
        &self,
        state: &GameState,
        legal_moves: &[Move],
        layout: &BoardLayout,
        rng: &mut GameRng,
    ) -> Option<Move>;
}

/// Strategy for an AI seat of the given difficulty.
#[must_use]
pub fn for_difficulty(difficulty: AiDifficulty) -> Box<dyn MoveStrategy> {
    match difficulty {
        AiDifficulty::Easy => Box::new(RandomStrategy),
        AiDifficulty::Medium => Box::new(HeuristicStrategy),
        AiDifficulty::Hard => Box::new(ThreatAwareStrategy),
    }
}

// =============================================================================
// Strategies
// =============================================================================

/// Uniform choice among legal moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl MoveStrategy for RandomStrategy {
    fn choose_move(
        &self,
        _state: &GameState,
        legal_moves: &[Move],
        _layout: &BoardLayout,
        rng: &mut GameRng,
    ) -> Option<Move> {
        rng.choose(legal_moves).cloned()
    }
}

/// Prefers captures, then entering the board, reaching home, safe cells and
/// the home stretch.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicStrategy;

impl MoveStrategy for HeuristicStrategy {
    fn choose_move(
        &self,
        _state: &GameState,
        legal_moves: &[Move],
        _layout: &BoardLayout,
        _rng: &mut GameRng,
    ) -> Option<Move> {
        best_by(legal_moves, heuristic_score)
    }
}

/// The heuristic plus a progress bonus and a penalty for landing within one
/// roll of an opponent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreatAwareStrategy;

impl MoveStrategy for ThreatAwareStrategy {
    fn choose_move(
        &self,
        state: &GameState,
        legal_moves: &[Move],
        layout: &BoardLayout,
        _rng: &mut GameRng,
    ) -> Option<Move> {
        best_by(legal_moves, |mv| threat_aware_score(mv, state, layout))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Highest-scoring move; the earliest one wins ties.
fn best_by(moves: &[Move], score: impl Fn(&Move) -> i32) -> Option<Move> {
    moves
        .iter()
        .map(|mv| (score(mv), mv))
        .fold(None, |best: Option<(i32, &Move)>, (s, mv)| match best {
            Some((b, _)) if b >= s => best,
            _ => Some((s, mv)),
        })
        .map(|(_, mv)| mv.clone())
}
