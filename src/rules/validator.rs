//! Legal move enumeration.

use std::sync::Arc;

use crate::core::{Cell, GameState, Move, Token};

use super::path::PathCalculator;
use super::ruleset::RuleSet;

/// Produces the complete legal-move set for the current player and die.
#[derive(Clone, Debug)]
pub struct MoveValidator {
    paths: PathCalculator,
    rules: Arc<dyn RuleSet>,
}

impl MoveValidator {
    #[must_use]
    pub fn new(paths: PathCalculator, rules: Arc<dyn RuleSet>) -> Self {
        Self { paths, rules }
    }

    #[must_use]
    pub fn paths(&self) -> &PathCalculator {
        &self.paths
    }

    /// Every legal move for the current player, in token order.
    ///
    /// Empty when no die is present. An empty result for a present die is
    /// normal; the engine decides what happens next.
    #[must_use]
    pub fn compute_legal_moves(&self, state: &GameState) -> Vec<Move> {
        let Some(dice) = state.dice else {
            return Vec::new();
        };
        let all_tokens: Vec<Token> = state.all_tokens().collect();

        state
            .current_player()
            .tokens
            .iter()
            .filter_map(|token| {
                let destination = self.destination(token, dice.value)?;
                if self.rules.is_blocked(token, destination, &all_tokens) {
                    return None;
                }
                let captures = self.rules.is_captured(token, destination, &all_tokens);
                Some(Move {
                    token: *token,
                    destination,
                    captures,
                })
            })
            .collect()
    }

    fn destination(&self, token: &Token, dice_value: u8) -> Option<Cell> {
        match token.cell {
            Cell::Home(_) => None,
            Cell::Base(color) => self
                .rules
                .can_enter_board(dice_value)
                .then(|| self.paths.enter_board_destination(color)),
            _ => self
                .paths
                .calculate_destination(token, dice_value)
                .or_else(|| (!self.rules.requires_exact_roll()).then_some(Cell::Home(token.color))),
        }
    }
}
