//! RNG module - seeded shuffling for question selection
//!
//! Wraps a ChaCha8 stream so that a seed reproduces a whole round: which
//! questions are drawn from each wave and the order of every question's
//! choices. Shuffles are explicit Fisher-Yates passes over the stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used by the question selector.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this stream was created with (for replaying a round)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Generate random value in range [0, max)
    ///
    /// `max` must be non-zero.
    pub fn next_range(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..max)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range(i + 1);
            slice.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(54321);

        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(4) < 4);
        }
        assert_eq!(rng.next_range(1), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(99);
        let mut items = [1, 2, 3, 4, 5, 6, 7, 8];
        rng.shuffle(&mut items);

        let mut sorted = items;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_shuffle_handles_short_slices() {
        let mut rng = GameRng::new(1);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
        let mut one = [42];
        rng.shuffle(&mut one);
        assert_eq!(one, [42]);
    }

    #[test]
    fn test_shuffle_moves_items_eventually() {
        let mut rng = GameRng::new(2024);
        let moved = (0..50).any(|_| {
            let mut items = [0, 1, 2, 3];
            rng.shuffle(&mut items);
            items != [0, 1, 2, 3]
        });
        assert!(moved);
    }
}
