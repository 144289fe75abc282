//! Moves: a token, where it lands, and whom it knocks back to base.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cell::Cell;
use super::token::Token;

/// Tokens displaced by a move. Almost always zero or one.
pub type Captures = SmallVec<[Token; 2]>;

/// A candidate or executed transition.
///
/// `token` is the mover as it stood before the move (its `cell` is the origin).
/// Moves compare structurally, so a move decoded from the network matches the
/// locally computed legal move it was built from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub token: Token,
    pub destination: Cell,
    pub captures: Captures,
}

impl Move {
    /// A move that captures nothing.
    #[must_use]
    pub fn new(token: Token, destination: Cell) -> Self {
        Self {
            token,
            destination,
            captures: SmallVec::new(),
        }
    }

    /// A move with the given captures.
    #[must_use]
    pub fn with_captures(token: Token, destination: Cell, captures: &[Token]) -> Self {
        Self {
            token,
            destination,
            captures: SmallVec::from_slice(captures),
        }
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// True when the token leaves its base.
    #[must_use]
    pub fn enters_board(&self) -> bool {
        self.token.cell.is_base()
    }

    #[must_use]
    pub fn reaches_home(&self) -> bool {
        self.destination.is_home()
    }

    /// True when `token` is listed among the captures (matched by identity).
    #[must_use]
    pub fn captures_piece(&self, token: &Token) -> bool {
        self.captures.iter().any(|c| c.is_same_piece(*token))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.token, self.destination)?;
        if self.is_capture() {
            write!(f, " (captures {})", self.captures.len())?;
        }
        Ok(())
    }
}
