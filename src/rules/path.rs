//! Movement along a color's path.
//!
//! Every token walks the same linear path for its color, so movement on the
//! track and in the home stretch is plain index arithmetic. Overshooting
//! `Home` is reported as `None`, never clamped.

use std::sync::Arc;

use crate::board::BoardLayout;
use crate::core::{Cell, PlayerColor, Token};

/// Converts positions and step counts into destinations and walked paths.
#[derive(Clone, Debug)]
pub struct PathCalculator {
    layout: Arc<BoardLayout>,
}

impl PathCalculator {
    #[must_use]
    pub fn new(layout: Arc<BoardLayout>) -> Self {
        Self { layout }
    }

    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Cell a token lands on when it leaves base. Independent of the roll.
    #[must_use]
    pub fn enter_board_destination(&self, color: PlayerColor) -> Cell {
        self.layout.track_cell(self.layout.start_position(color))
    }

    /// Index of the token within its own color's path (0 = Base).
    #[must_use]
    pub fn path_index(&self, token: &Token) -> Option<usize> {
        self.layout.path_index_of(token.color, token.cell)
    }

    /// How far along its path the token is: 0 in base, `path_len - 1` home.
    #[must_use]
    pub fn progress(&self, token: &Token) -> usize {
        self.path_index(token).unwrap_or(0)
    }

    /// Cell reached after `steps`, or `None` on overshoot.
    ///
    /// Works from any cell on the path, base included.
    #[must_use]
    pub fn calculate_destination(&self, token: &Token, steps: u8) -> Option<Cell> {
        let from = self.path_index(token)?;
        self.layout.cell_at(token.color, from + usize::from(steps))
    }

    /// Steps needed to walk from the token's cell to `destination` along the
    /// token's own path, if `destination` lies ahead of it.
    #[must_use]
    pub fn distance(&self, token: &Token, destination: Cell) -> Option<usize> {
        let from = self.path_index(token)?;
        let to = self.layout.path_index_of(token.color, destination)?;
        (to > from).then(|| to - from)
    }

    /// Cells walked from the token's cell (exclusive) to `destination`
    /// (inclusive). Empty if `destination` is not ahead of the token.
    #[must_use]
    pub fn calculate_path(&self, token: &Token, destination: Cell) -> Vec<Cell> {
        let path = self.layout.full_path(token.color);
        match (
            self.path_index(token),
            self.layout.path_index_of(token.color, destination),
        ) {
            (Some(from), Some(to)) if to > from => path[from + 1..=to].to_vec(),
            _ => Vec::new(),
        }
    }

    /// Cells walked back from the token's cell (exclusive) to its base
    /// (inclusive). Empty for a token already in base.
    #[must_use]
    pub fn calculate_reverse_path(&self, token: &Token) -> Vec<Cell> {
        let path = self.layout.full_path(token.color);
        match self.path_index(token) {
            Some(from) if from > 0 => path[..from].iter().rev().copied().collect(),
            _ => Vec::new(),
        }
    }
}
