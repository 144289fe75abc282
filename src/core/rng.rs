//! Seeded dice stream.
//!
//! Only `GameEngine::roll_dice`, the random AI strategy and relay room codes
//! draw from a `GameRng`. Every other transition is a pure function of its
//! inputs.
//!
//! A stream's position can be saved as a [`GameRngState`] next to a persisted
//! game and resumed later, continuing with exactly the rolls it would have
//! produced.
//!
//! ```
//! use ludo_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(7);
//! let value = rng.roll_die();
//! assert!((1..=6).contains(&value));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::dice::DICE_FACES;

/// ChaCha8 stream that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `1..=6`.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DICE_FACES)
    }

    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniform pick; `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Where the stream currently stands.
    #[must_use]
    pub fn position(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Continue a stream from a saved position.
    #[must_use]
    pub fn resume(saved: &GameRngState) -> Self {
        let mut rng = Self::new(saved.seed);
        rng.inner.set_word_pos(saved.word_pos);
        rng
    }
}

/// Saved position of a [`GameRng`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha word counter.
    pub word_pos: u128,
}
