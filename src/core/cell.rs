//! Board cells.
//!
//! A token's position is always exactly one `Cell`. Cells carry no grid
//! coordinates: geometry lives in [`BoardLayout`](crate::board::BoardLayout),
//! which orders cells into per-color paths.

use serde::{Deserialize, Serialize};

use super::color::PlayerColor;

/// Track length shared by every color.
pub const TRACK_SIZE: usize = 52;

/// Number of private home-stretch cells per color.
pub const HOME_STRETCH_LENGTH: usize = 5;

/// A position on the board.
///
/// Equality is structural. `Track` cells carry their safety flag so that
/// consumers can render and score them without consulting the layout, but two
/// track cells with the same index always denote the same square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Off-board starting area of a color.
    Base(PlayerColor),
    /// Shared ring cell, `index` in `0..52`.
    Track { index: u8, is_safe: bool },
    /// Private lane of a color, `index` in `0..5`.
    HomeStretch { color: PlayerColor, index: u8 },
    /// Final cell of a color.
    Home(PlayerColor),
}

impl Cell {
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, Cell::Base(_))
    }

    #[must_use]
    pub const fn is_home(self) -> bool {
        matches!(self, Cell::Home(_))
    }

    #[must_use]
    pub const fn is_home_stretch(self) -> bool {
        matches!(self, Cell::HomeStretch { .. })
    }

    /// Track index if this is a ring cell.
    #[must_use]
    pub const fn track_index(self) -> Option<u8> {
        match self {
            Cell::Track { index, .. } => Some(index),
            _ => None,
        }
    }

    /// True for a ring cell flagged safe.
    #[must_use]
    pub const fn is_safe_track(self) -> bool {
        matches!(self, Cell::Track { is_safe: true, .. })
    }

    /// True when both cells denote the same square, ignoring the safety flag
    /// of track cells.
    #[must_use]
    pub fn same_square(self, other: Cell) -> bool {
        match (self, other) {
            (Cell::Track { index: a, .. }, Cell::Track { index: b, .. }) => a == b,
            (a, b) => a == b,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Base(color) => write!(f, "Base({color})"),
            Cell::Track { index, is_safe: true } => write!(f, "Track({index}*)"),
            Cell::Track { index, .. } => write!(f, "Track({index})"),
            Cell::HomeStretch { color, index } => write!(f, "HomeStretch({color}, {index})"),
            Cell::Home(color) => write!(f, "Home({color})"),
        }
    }
}
