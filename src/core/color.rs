//! Player colors.
//!
//! Colors double as player identity: each seat at the table owns exactly one
//! color for the lifetime of a game, and tokens carry their owner's color.

use serde::{Deserialize, Serialize};

/// One of the four seat colors, listed in clockwise seating order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerColor {
    Red,
    Green,
    Yellow,
    Blue,
}

impl PlayerColor {
    /// All colors in seating order.
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Blue,
    ];

    /// Dense index (0-3) for per-color tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerColor::Red => 0,
            PlayerColor::Green => 1,
            PlayerColor::Yellow => 2,
            PlayerColor::Blue => 3,
        }
    }

    /// Upper-case name, matching the serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Red => "RED",
            PlayerColor::Green => "GREEN",
            PlayerColor::Yellow => "YELLOW",
            PlayerColor::Blue => "BLUE",
        }
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PlayerColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerColor::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown color '{s}'"))
    }
}
