//! Tokens: the four pieces each player moves around the board.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::color::PlayerColor;

/// Tokens per player.
pub const TOKENS_PER_PLAYER: usize = 4;

/// A single piece, identified by `(color, id)`.
///
/// Tokens are never destroyed. A capture is a cell change back to `Base`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Index within the owner's set, `0..4`.
    pub id: u8,
    pub color: PlayerColor,
    pub cell: Cell,
}

impl Token {
    #[must_use]
    pub const fn new(id: u8, color: PlayerColor, cell: Cell) -> Self {
        Self { id, color, cell }
    }

    /// A token sitting in its color's base.
    #[must_use]
    pub const fn in_base(id: u8, color: PlayerColor) -> Self {
        Self::new(id, color, Cell::Base(color))
    }

    /// Identity key, independent of position.
    #[must_use]
    pub const fn key(self) -> (PlayerColor, u8) {
        (self.color, self.id)
    }

    /// True when `other` is the same piece (possibly at another cell).
    #[must_use]
    pub fn is_same_piece(self, other: Token) -> bool {
        self.key() == other.key()
    }

    /// Copy of this token moved to `cell`.
    #[must_use]
    pub const fn at(self, cell: Cell) -> Self {
        Self { cell, ..self }
    }

    /// Copy of this token returned to its base.
    #[must_use]
    pub const fn sent_to_base(self) -> Self {
        self.at(Cell::Base(self.color))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}@{}", self.color, self.id, self.cell)
    }
}
