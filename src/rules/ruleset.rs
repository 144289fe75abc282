//! Swappable rule variants.
//!
//! The validator and engine consult a [`RuleSet`] for every decision that
//! differs between house rules, so a variant is a new implementation of the
//! trait rather than a branch in the state machine.

use crate::core::{Captures, Cell, GameConfig, Token, DICE_FACES};

/// Policy for the configurable parts of the rules.
///
/// ## Implementation Notes
///
/// - Every method must be a pure function of its arguments and `self`.
/// - `is_captured` is asked about the destination before the mover arrives,
///   so `all_tokens` still contains the mover at its origin.
pub trait RuleSet: std::fmt::Debug + Send + Sync {
    /// True if a token may leave base with this roll.
    fn can_enter_board(&self, dice_value: u8) -> bool;

    /// Opposing tokens displaced by `moving` landing on `destination`.
    fn is_captured(&self, moving: &Token, destination: Cell, all_tokens: &[Token]) -> Captures;

    /// True if this roll earns another roll. `consecutive_sixes_before` counts
    /// the sixes rolled in a row before this one.
    fn grants_extra_turn(
        &self,
        dice_value: u8,
        consecutive_sixes_before: u32,
        max_consecutive_sixes: u32,
    ) -> bool {
        dice_value == DICE_FACES && consecutive_sixes_before + 1 < max_consecutive_sixes
    }

    /// True once the streak of sixes reaches the limit.
    fn should_forfeit_for_consecutive_sixes(
        &self,
        consecutive_sixes: u32,
        max_consecutive_sixes: u32,
    ) -> bool {
        consecutive_sixes >= max_consecutive_sixes
    }

    /// True if moves overshooting `Home` are illegal. When false the
    /// validator lets them stop at `Home`.
    fn requires_exact_roll(&self) -> bool {
        true
    }

    /// True if `destination` is closed to `moving`. Never in the standard
    /// rules: own tokens stack and opponents get captured or share a safe cell.
    fn is_blocked(&self, _moving: &Token, _destination: Cell, _all_tokens: &[Token]) -> bool {
        false
    }
}

/// The standard rules, parameterized by the game configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardRuleSet {
    enter_on_six_only: bool,
    safe_zones_enabled: bool,
}

impl StandardRuleSet {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            enter_on_six_only: config.enter_on_six_only,
            safe_zones_enabled: config.safe_zones_enabled,
        }
    }
}

impl Default for StandardRuleSet {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl RuleSet for StandardRuleSet {
    fn can_enter_board(&self, dice_value: u8) -> bool {
        dice_value == DICE_FACES || (!self.enter_on_six_only && dice_value == 1)
    }

    fn is_captured(&self, moving: &Token, destination: Cell, all_tokens: &[Token]) -> Captures {
        let Cell::Track { is_safe, .. } = destination else {
            return Captures::new();
        };
        if is_safe && self.safe_zones_enabled {
            return Captures::new();
        }
        all_tokens
            .iter()
            .filter(|t| t.color != moving.color && t.cell.same_square(destination))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerColor;

    fn track(index: u8, is_safe: bool) -> Cell {
        Cell::Track { index, is_safe }
    }

    #[test]
    fn test_can_enter_board() {
        let six_only = StandardRuleSet::default();
        assert!(six_only.can_enter_board(6));
        assert!(!six_only.can_enter_board(1));
        assert!(!six_only.can_enter_board(5));

        let one_or_six = StandardRuleSet::new(&GameConfig::default().with_enter_on_six_only(false));
        assert!(one_or_six.can_enter_board(6));
        assert!(one_or_six.can_enter_board(1));
        assert!(!one_or_six.can_enter_board(3));
    }

    #[test]
    fn test_capture_on_plain_cell() {
        let rules = StandardRuleSet::default();
        let mover = Token::new(0, PlayerColor::Red, track(5, false));
        let victim = Token::new(2, PlayerColor::Green, track(9, false));
        let friend = Token::new(1, PlayerColor::Red, track(9, false));
        let tokens = [mover, victim, friend];

        let captures = rules.is_captured(&mover, track(9, false), &tokens);
        assert_eq!(captures.as_slice(), &[victim]);
    }

    #[test]
    fn test_safe_cell_suppresses_capture() {
        let rules = StandardRuleSet::default();
        let mover = Token::new(0, PlayerColor::Red, track(10, false));
        let victim = Token::new(0, PlayerColor::Green, track(13, true));
        let tokens = [mover, victim];

        assert!(rules.is_captured(&mover, track(13, true), &tokens).is_empty());

        let unsafe_rules = StandardRuleSet::new(&GameConfig::default().with_safe_zones(false));
        assert_eq!(unsafe_rules.is_captured(&mover, track(13, true), &tokens).len(), 1);
    }

    #[test]
    fn test_no_capture_off_track() {
        let rules = StandardRuleSet::default();
        let mover = Token::new(0, PlayerColor::Red, track(50, false));
        let dest = Cell::HomeStretch { color: PlayerColor::Red, index: 0 };
        assert!(rules.is_captured(&mover, dest, &[mover]).is_empty());
    }

    #[test]
    fn test_extra_turn_and_forfeit() {
        let rules = StandardRuleSet::default();
        assert!(rules.grants_extra_turn(6, 0, 3));
        assert!(rules.grants_extra_turn(6, 1, 3));
        assert!(!rules.grants_extra_turn(6, 2, 3));
        assert!(!rules.grants_extra_turn(5, 0, 3));

        assert!(!rules.should_forfeit_for_consecutive_sixes(2, 3));
        assert!(rules.should_forfeit_for_consecutive_sixes(3, 3));
        assert!(rules.requires_exact_roll());
    }
}
