//! The turn and phase state machine.
//!
//! `WaitingForRoll -> WaitingForMove -> (WaitingForRoll | GameOver)`, where a
//! roll with no legal moves goes straight back to `WaitingForRoll` (extra
//! roll owed, turn passed, or die gifted to a later seat).
//!
//! ## Purity
//!
//! Every transition takes `&GameState` and returns a new state. Apart from
//! [`GameEngine::roll_dice`], which draws from the caller's [`GameRng`], each
//! one is a pure function of `(state, input)`; two replicas applying the same
//! inputs hold identical states.
//!
//! ## Invalid input
//!
//! Out-of-phase or illegal input is logged at `warn` and answered with the
//! input state unchanged. A stale or duplicated network message must not be
//! able to corrupt a game.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::board::BoardLayout;
use crate::core::{DiceResult, GameConfig, GamePhase, GameRng, GameState, Move, Token};
use crate::error::ConfigError;

use super::path::PathCalculator;
use super::ruleset::{RuleSet, StandardRuleSet};
use super::validator::MoveValidator;

/// Authoritative rules for one game.
///
/// Built once from a board layout and a validated configuration; shared
/// read-only between every transition of that game.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    rules: Arc<dyn RuleSet>,
    validator: MoveValidator,
}

impl GameEngine {
    /// Engine with the standard rules configured by `config`.
    pub fn new(layout: Arc<BoardLayout>, config: GameConfig) -> Result<Self, ConfigError> {
        let rules = Arc::new(StandardRuleSet::new(&config));
        Self::with_rule_set(layout, config, rules)
    }

    /// Engine with a custom rule variant.
    pub fn with_rule_set(
        layout: Arc<BoardLayout>,
        config: GameConfig,
        rules: Arc<dyn RuleSet>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let validator = MoveValidator::new(PathCalculator::new(layout), Arc::clone(&rules));
        Ok(Self {
            config,
            rules,
            validator,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        self.validator.paths().layout()
    }

    #[must_use]
    pub fn paths(&self) -> &PathCalculator {
        self.validator.paths()
    }

    #[must_use]
    pub fn rule_set(&self) -> &dyn RuleSet {
        self.rules.as_ref()
    }

    #[must_use]
    pub fn validator(&self) -> &MoveValidator {
        &self.validator
    }

    /// One player per configured seat, all tokens in base, first seat to roll.
    #[must_use]
    pub fn create_initial_state(&self) -> GameState {
        GameState::new(&self.config)
    }

    /// Legal moves for the current player and die.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        self.validator.compute_legal_moves(state)
    }

    /// True if `mv` may be executed on `state` right now.
    #[must_use]
    pub fn is_legal_move(&self, state: &GameState, mv: &Move) -> bool {
        state.phase == GamePhase::WaitingForMove
            && state.dice.is_some()
            && self.legal_moves(state).contains(mv)
    }

    /// Roll a die and apply it.
    ///
    /// Only for the peer whose turn it is. Everyone else must apply the
    /// broadcast value with [`apply_dice_value`](Self::apply_dice_value).
    pub fn roll_dice(&self, state: &GameState, rng: &mut GameRng) -> GameState {
        let value = rng.roll_die();
        debug!("{} rolled {value}", state.current_color());
        self.apply_dice_value(state, value)
    }

    /// Apply a die value for the current player.
    pub fn apply_dice_value(&self, state: &GameState, value: u8) -> GameState {
        if !DiceResult::is_valid_value(value) {
            warn!("ignoring invalid dice value {value}");
            return state.clone();
        }
        if state.phase != GamePhase::WaitingForRoll {
            warn!("ignoring dice value {value} in phase {:?}", state.phase);
            return state.clone();
        }

        let mut next = state.clone();
        next.roll_count += 1;
        let dice = DiceResult::new(value, next.roll_count);
        next.dice = Some(dice);
        next.consecutive_sixes = if dice.is_six() { state.consecutive_sixes + 1 } else { 0 };
        if let Some(player) = next.players.get_mut(next.current_player_index) {
            player.last_dice_value = Some(value);
        }

        let max = self.config.max_consecutive_sixes;
        if self.rules.should_forfeit_for_consecutive_sixes(next.consecutive_sixes, max) {
            debug!(
                "{} forfeits after {} sixes in a row",
                next.current_color(),
                next.consecutive_sixes
            );
            return self.advance_to_next_player(&next);
        }

        if !self.legal_moves(&next).is_empty() {
            next.phase = GamePhase::WaitingForMove;
            debug!("{} to move with {value}", next.current_color());
            return next;
        }

        if self.rules.grants_extra_turn(value, state.consecutive_sixes, max) {
            debug!("{} has no move for a six, rolls again", next.current_color());
            next.dice = None;
            next.phase = GamePhase::WaitingForRoll;
            return next;
        }

        if self.config.pass_dice_to_next_player {
            return self.advance_to_next_player_with_gifted_dice(&next, dice);
        }

        debug!("{} has no move for {value}", next.current_color());
        self.advance_to_next_player(&next)
    }

    /// Hand an unusable die to the first later seat that can use it.
    ///
    /// The recipient becomes current in `WaitingForMove` with the gift pending;
    /// [`apply_gifted_dice`](Self::apply_gifted_dice) promotes it. Without a
    /// recipient the die is discarded and play passes to the roller's successor.
    pub fn advance_to_next_player_with_gifted_dice(
        &self,
        state: &GameState,
        dice: DiceResult,
    ) -> GameState {
        let roller = state.current_player_index;
        let n = state.player_count();

        let recipient = (1..n)
            .map(|offset| (roller + offset) % n)
            .find(|&index| self.can_player_use_dice(state, index, dice.value));

        let Some(recipient) = recipient else {
            debug!("nobody can use {}, discarding it", dice.value);
            return self.advance_to_next_player(state);
        };

        debug!(
            "{} gifts {} to {}",
            state.players[roller].color, dice.value, state.players[recipient].color
        );
        let mut next = state.clone();
        next.current_player_index = recipient;
        next.phase = GamePhase::WaitingForMove;
        next.dice = None;
        next.consecutive_sixes = 0;
        next.gifted_dice = Some(dice);
        next.gifted_dice_original_player_index = Some(roller);
        next
    }

    /// Promote a pending gift to the active die.
    ///
    /// Both gift markers are cleared; the die remembers its roller through
    /// [`DiceResult::gifted_from`]. Without a pending gift the state is
    /// returned unchanged.
    pub fn apply_gifted_dice(&self, state: &GameState) -> GameState {
        let (Some(gift), Some(roller)) = (state.gifted_dice, state.gifted_dice_original_player_index)
        else {
            return state.clone();
        };
        if state.is_game_over() {
            return state.clone();
        }

        let mut next = state.clone();
        next.dice = Some(gift.gifted_by(roller));
        next.gifted_dice = None;
        next.gifted_dice_original_player_index = None;
        next.phase = GamePhase::WaitingForMove;
        if let Some(player) = next.players.get_mut(next.current_player_index) {
            player.last_dice_value = Some(gift.value);
        }
        next
    }

    /// Whether `player_index` would have a legal move with `value`.
    ///
    /// Hypothetical only: `state` is not touched.
    #[must_use]
    pub fn can_player_use_dice(&self, state: &GameState, player_index: usize, value: u8) -> bool {
        if player_index >= state.player_count() || !DiceResult::is_valid_value(value) {
            return false;
        }
        let mut probe = state.clone();
        probe.current_player_index = player_index;
        probe.dice = Some(DiceResult::new(value, state.roll_count));
        probe.phase = GamePhase::WaitingForMove;
        !self.legal_moves(&probe).is_empty()
    }

    /// Execute one of the current legal moves.
    pub fn execute_move(&self, state: &GameState, mv: &Move) -> GameState {
        let Some(dice) = state.dice else {
            warn!("ignoring move {mv}: no dice");
            return state.clone();
        };
        if !self.is_legal_move(state, mv) {
            warn!("ignoring illegal move {mv} in phase {:?}", state.phase);
            return state.clone();
        }

        let mut next = state.clone();
        place_token(&mut next, mv.token.at(mv.destination));
        for captured in &mv.captures {
            place_token(&mut next, captured.sent_to_base());
        }
        debug!("{} executed {mv}", state.current_color());

        let mover = state.current_color();
        if next.current_player().has_finished() {
            info!("{mover} wins");
            next.phase = GamePhase::GameOver;
            next.winner = Some(mover);
            next.dice = None;
            next.consecutive_sixes = 0;
            next.gifted_dice = None;
            next.gifted_dice_original_player_index = None;
            return next;
        }

        if dice.is_gifted() {
            let resume = self.get_resume_player_index_after_gifted_dice(state);
            return self.pass_turn_to(&next, resume);
        }

        let sixes_before = if dice.is_six() {
            state.consecutive_sixes.saturating_sub(1)
        } else {
            state.consecutive_sixes
        };
        let extra_turn = self.rules.grants_extra_turn(
            dice.value,
            sixes_before,
            self.config.max_consecutive_sixes,
        ) || mv.is_capture()
            || mv.reaches_home();

        if extra_turn {
            debug!("{mover} earns another roll");
            next.dice = None;
            next.phase = GamePhase::WaitingForRoll;
            return next;
        }
        self.advance_to_next_player(&next)
    }

    /// Give up the current move window.
    ///
    /// A pending or active gift resumes play after its original roller.
    pub fn skip_turn(&self, state: &GameState) -> GameState {
        if state.is_game_over() {
            return state.clone();
        }
        let gifted = state.has_pending_gift() || state.dice.is_some_and(DiceResult::is_gifted);
        if gifted {
            let resume = self.get_resume_player_index_after_gifted_dice(state);
            return self.pass_turn_to(state, resume);
        }
        debug!("{} skips", state.current_color());
        self.advance_to_next_player(state)
    }

    /// Seat that plays after a gifted die is used: the original roller's
    /// successor.
    #[must_use]
    pub fn get_resume_player_index_after_gifted_dice(&self, state: &GameState) -> usize {
        let roller = state
            .gifted_dice_original_player_index
            .or_else(|| state.dice.and_then(|d| d.gifted_from))
            .unwrap_or(state.current_player_index);
        state.next_index(roller)
    }

    /// Pass the turn to the next seat with a clean slate.
    pub fn advance_to_next_player(&self, state: &GameState) -> GameState {
        self.pass_turn_to(state, state.next_index(state.current_player_index))
    }

    fn pass_turn_to(&self, state: &GameState, index: usize) -> GameState {
        let mut next = state.clone();
        next.current_player_index = index;
        next.phase = GamePhase::WaitingForRoll;
        next.dice = None;
        next.consecutive_sixes = 0;
        next.gifted_dice = None;
        next.gifted_dice_original_player_index = None;
        next
    }
}

/// Put `token` at its cell, matching the piece by color and id.
fn place_token(state: &mut GameState, token: Token) {
    let Some(index) = state.player_index(token.color) else {
        return;
    };
    if let Some(player) = state.players.get_mut(index) {
        if let Some(slot) = player.tokens.iter_mut().find(|t| t.id == token.id) {
            slot.cell = token.cell;
        }
    }
}
