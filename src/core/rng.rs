//! Injected randomness for shuffling and first-player selection.
//!
//! ## Key Features
//!
//! - **Injectable**: the rules only see the `RandomSource` trait, so tests
//!   can script the exact deal they need
//! - **Deterministic**: `GameRng` with the same seed produces the same deals
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use theater_duel::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.coin_flip(), b.coin_flip());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Source of randomness consumed by the rules.
///
/// Only `rng` is required; the provided methods sample from it with
/// `rand`. Scripted sources may override them to force a coin flip or a
/// deal order.
pub trait RandomSource: Send {
    /// The generator behind this source.
    fn rng(&mut self) -> &mut dyn RngCore;

    /// Fair coin flip.
    fn coin_flip(&mut self) -> bool {
        self.rng().gen_bool(0.5)
    }

    /// Shuffle cards in place, uniformly over all permutations.
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        cards.shuffle(self.rng());
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn rng(&mut self) -> &mut dyn RngCore {
        (**self).rng()
    }

    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }

    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        (**self).shuffle_cards(cards);
    }
}

/// Seedable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.inner
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
