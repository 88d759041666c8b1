//! A randomized 52-card sequence supporting deal and burn.
//!
//! The default constructor seeds its RNG from OS entropy through
//! [`rand::rngs::OsRng`]; no determinism is guaranteed or required by the
//! live engine path. [`Deck::with_seed`] exists only for tests and the CLI's
//! deterministic-replay tooling.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// A deck whose shuffles are drawn from a cryptographically strong,
    /// OS-entropy-seeded generator. This is the constructor the live engine
    /// uses; it makes no determinism guarantee.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self {
            cards: full_deck(),
            position: full_deck().len(),
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// A deterministic deck for tests and offline replay. Never reachable
    /// from the live table-registry/engine path.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cards: full_deck(),
            position: full_deck().len(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Re-populates all 52 cards and shuffles into a uniformly random order.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    /// Removes and returns the first `k` cards. Fails if `k` exceeds the
    /// number of cards remaining.
    pub fn deal(&mut self, k: usize) -> Result<Vec<Card>, GameError> {
        if k > self.remaining() {
            return Err(GameError::NotEnoughCards);
        }
        let dealt = self.cards[self.position..self.position + k].to_vec();
        self.position += k;
        Ok(dealt)
    }

    pub fn deal_one(&mut self) -> Result<Card, GameError> {
        Ok(self.deal(1)?[0])
    }

    /// Discards one card without revealing it.
    pub fn burn(&mut self) -> Result<(), GameError> {
        self.deal(1).map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
