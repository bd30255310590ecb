//! Seeded shuffling.
//!
//! Every deck order in a game comes from one ChaCha8 stream seeded by
//! `BoardConfig::seed`. The stream position can be captured for snapshots
//! and resumed later.
//!
//! ```
//! use cafe_wars::core::GameRng;
//!
//! let mut left = vec!["Barista", "Espresso Shot", "Coffee Bar"];
//! let mut right = left.clone();
//! GameRng::new(7).shuffle(&mut left);
//! GameRng::new(7).shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Shuffle source for a game.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index_below(&mut self, len: usize) -> usize {
        self.stream.gen_range(0..len)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for last in (1..items.len()).rev() {
            let pick = self.index_below(last + 1);
            items.swap(last, pick);
        }
    }

    /// Where the stream currently is.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(saved: &GameRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(saved.seed);
        stream.set_word_pos(saved.word_pos);
        Self {
            stream,
            seed: saved.seed,
        }
    }
}

/// Seed plus ChaCha8 word position; enough to resume the exact stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_order(rng: &mut GameRng) -> Vec<u32> {
        let mut cards: Vec<u32> = (0..30).collect();
        rng.shuffle(&mut cards);
        cards
    }

    #[test]
    fn test_same_seed_same_order() {
        assert_eq!(deck_order(&mut GameRng::new(42)), deck_order(&mut GameRng::new(42)));
    }

    #[test]
    fn test_seeds_give_different_orders() {
        assert_ne!(deck_order(&mut GameRng::new(1)), deck_order(&mut GameRng::new(2)));
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut cards = deck_order(&mut GameRng::new(9));
        cards.sort_unstable();
        assert_eq!(cards, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = GameRng::new(3);
        let mut none: Vec<u8> = Vec::new();
        let mut single = vec!['x'];

        rng.shuffle(&mut none);
        rng.shuffle(&mut single);

        assert!(none.is_empty());
        assert_eq!(single, vec!['x']);
    }

    #[test]
    fn test_second_shuffle_continues_stream() {
        let mut rng = GameRng::new(5);
        let first = deck_order(&mut rng);
        let second = deck_order(&mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn test_resume_from_captured_state() {
        let mut rng = GameRng::new(11);
        deck_order(&mut rng);

        let saved = rng.state();
        let expected = deck_order(&mut rng);

        let mut resumed = GameRng::from_state(&saved);
        assert_eq!(resumed.seed(), 11);
        assert_eq!(deck_order(&mut resumed), expected);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let saved = GameRng::new(42).state();
        let json = serde_json::to_string(&saved).unwrap();
        assert_eq!(serde_json::from_str::<GameRngState>(&json).unwrap(), saved);
    }
}
