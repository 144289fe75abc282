//! Dice results.

use serde::{Deserialize, Serialize};

/// Number of faces on the die.
pub const DICE_FACES: u8 = 6;

/// One roll of the die.
///
/// `roll_id` is a per-game sequence number. It only distinguishes otherwise
/// equal rolls in logs and messages, and is derived from the state so that
/// every replica produces the same id for the same roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceResult {
    /// Face value, `1..=6`.
    pub value: u8,
    pub roll_id: u64,
    /// Index of the player who originally rolled this die, when it reached the
    /// current player as a gift.
    pub gifted_from: Option<usize>,
}

impl DiceResult {
    #[must_use]
    pub const fn new(value: u8, roll_id: u64) -> Self {
        Self {
            value,
            roll_id,
            gifted_from: None,
        }
    }

    /// Mark this die as gifted by `original_player_index`.
    #[must_use]
    pub const fn gifted_by(self, original_player_index: usize) -> Self {
        Self {
            gifted_from: Some(original_player_index),
            ..self
        }
    }

    #[must_use]
    pub const fn is_six(self) -> bool {
        self.value == DICE_FACES
    }

    #[must_use]
    pub const fn is_gifted(self) -> bool {
        self.gifted_from.is_some()
    }

    /// True for a face value the die can show.
    #[must_use]
    pub const fn is_valid_value(value: u8) -> bool {
        value >= 1 && value <= DICE_FACES
    }
}
