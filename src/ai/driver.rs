//! Headless play: step a game forward with one strategy per seat.
//!
//! The loop an orchestration layer would run, minus the animation and
//! "thinking" delays: promote a pending gift, roll when a roll is owed, pick
//! and execute a move when one is.

use log::{debug, info};

use crate::core::{GamePhase, GameRng, GameState};
use crate::rules::GameEngine;

use super::strategy::{for_difficulty, MoveStrategy};

/// Advance `state` by one engine transition.
///
/// A finished game is returned unchanged. A move window with no usable move
/// is skipped.
pub fn step(
    engine: &GameEngine,
    state: &GameState,
    strategy: &dyn MoveStrategy,
    rng: &mut GameRng,
) -> GameState {
    if state.has_pending_gift() {
        return engine.apply_gifted_dice(state);
    }
    match state.phase {
        GamePhase::GameOver => state.clone(),
        GamePhase::WaitingForMove => {
            let moves = engine.legal_moves(state);
            match strategy.choose_move(state, &moves, engine.layout(), rng) {
                Some(mv) => engine.execute_move(state, &mv),
                None => engine.skip_turn(state),
            }
        }
        GamePhase::WaitingForRoll | GamePhase::Rolling | GamePhase::Animating => {
            engine.roll_dice(state, rng)
        }
    }
}

/// Strategies for every seat, taken from each player's difficulty.
#[must_use]
pub fn seat_strategies(state: &GameState) -> Vec<Box<dyn MoveStrategy>> {
    state.players.iter().map(|p| for_difficulty(p.difficulty)).collect()
}

/// Play from `state` until the game ends or `max_steps` transitions pass.
pub fn play_out(
    engine: &GameEngine,
    state: &GameState,
    strategies: &[Box<dyn MoveStrategy>],
    rng: &mut GameRng,
    max_steps: usize,
) -> GameState {
    let mut current = state.clone();
    for _ in 0..max_steps {
        if current.is_game_over() {
            break;
        }
        let Some(strategy) = strategies.get(current.current_player_index) else {
            debug!("no strategy for seat {}", current.current_player_index);
            break;
        };
        current = step(engine, &current, strategy.as_ref(), rng);
    }
    if let Some(winner) = current.winner {
        info!("game finished after {} rolls, {winner} won", current.roll_count);
    }
    current
}
