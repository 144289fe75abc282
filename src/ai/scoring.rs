//! Move scoring for the heuristic strategies.

use crate::board::BoardLayout;
use crate::core::{Cell, GameState, Move};

pub const CAPTURE_WEIGHT: i32 = 50;
pub const ENTER_BOARD_WEIGHT: i32 = 40;
pub const REACH_HOME_WEIGHT: i32 = 30;
pub const SAFE_CELL_WEIGHT: i32 = 20;
pub const HOME_STRETCH_WEIGHT: i32 = 15;

/// Penalty per opposing token that could hit the destination next roll.
pub const THREAT_PENALTY: i32 = 15;

/// Path progress is divided by this before being added as a bonus.
pub const PROGRESS_DIVISOR: i32 = 5;

/// Furthest an opponent can reach with one roll.
const THREAT_RADIUS: usize = 6;

/// Score used by the medium strategy.
#[must_use]
pub fn heuristic_score(mv: &Move) -> i32 {
    let mut score = 0;
    if mv.is_capture() {
        score += CAPTURE_WEIGHT;
    }
    if mv.enters_board() {
        score += ENTER_BOARD_WEIGHT;
    }
    if mv.reaches_home() {
        score += REACH_HOME_WEIGHT;
    }
    if mv.destination.is_safe_track() {
        score += SAFE_CELL_WEIGHT;
    }
    if mv.destination.is_home_stretch() {
        score += HOME_STRETCH_WEIGHT;
    }
    score
}

/// Score used by the hard strategy: the medium score, plus progress along the
/// path, minus exposure to single-roll captures.
#[must_use]
pub fn threat_aware_score(mv: &Move, state: &GameState, layout: &BoardLayout) -> i32 {
    let progress = layout
        .path_index_of(mv.token.color, mv.destination)
        .unwrap_or(0) as i32;
    let threats = threat_count(mv, state, layout) as i32;
    heuristic_score(mv) + progress / PROGRESS_DIVISOR - THREAT_PENALTY * threats
}

/// Opposing tokens on the track that could land on the move's destination
/// with one roll, walking their own path.
///
/// Safe cells and cells off the track are never threatened. Tokens this move
/// captures are not counted.
#[must_use]
pub fn threat_count(mv: &Move, state: &GameState, layout: &BoardLayout) -> usize {
    let destination = mv.destination;
    if !matches!(destination, Cell::Track { .. }) || destination.is_safe_track() {
        return 0;
    }
    state
        .all_tokens()
        .filter(|t| t.color != mv.token.color)
        .filter(|t| matches!(t.cell, Cell::Track { .. }))
        .filter(|t| !mv.captures_piece(t))
        .filter(|t| {
            let from = layout.path_index_of(t.color, t.cell);
            let to = layout.path_index_of(t.color, destination);
            matches!((from, to), (Some(from), Some(to)) if to > from && to - from <= THREAT_RADIUS)
        })
        .count()
}
