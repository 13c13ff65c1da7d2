//! Random sampling helpers for round generation.
//!
//! Every random choice the engine makes goes through a
//! [`RandomRoundSampler`]. Samplers are derived from a session seed, so the
//! row permutation and each round's data are reproducible from
//! `(seed, round index)` alone.

use std::ops::{Range, RangeInclusive};

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom, index};
use rand::{Rng, SeedableRng};

use crate::error::{GameError, GameResult};

/// Default cap for bounded-retry sampling.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Odd constant used to spread round indices across the seed space.
const ROUND_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// A seeded source of uniform randomness for one purpose (a permutation or
/// a single round).
#[derive(Debug, Clone)]
pub struct RandomRoundSampler {
    rng: StdRng,
}

impl RandomRoundSampler {
    /// Sampler seeded directly from a session seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Independent sampler for one round of a session.
    pub fn for_round(seed: u64, round: usize) -> Self {
        let mixed = seed ^ (round as u64).wrapping_add(1).wrapping_mul(ROUND_MIX);
        Self::from_seed(mixed)
    }

    /// A uniform-random permutation of `0..len`. Every index appears exactly
    /// once.
    pub fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }

    /// `amount` distinct values from `0..len`, or `None` if `amount > len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Option<Vec<usize>> {
        if amount > len {
            return None;
        }
        Some(index::sample(&mut self.rng, len, amount).into_vec())
    }

    /// `amount` distinct elements of a slice, or `None` if there are too few.
    pub fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Option<Vec<T>> {
        if amount > items.len() {
            return None;
        }
        Some(
            items
                .choose_multiple(&mut self.rng, amount)
                .cloned()
                .collect(),
        )
    }

    /// One uniformly chosen element.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Uniform float in a half-open range.
    pub fn uniform(&mut self, range: Range<f64>) -> f64 {
        self.rng.random_range(range)
    }

    /// Uniform integer in an inclusive range.
    pub fn uniform_int(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.random_range(range)
    }

    /// Run `attempt` until it yields a value, at most `max_attempts` times.
    ///
    /// Fails with [`GameError::Exhausted`] once the cap is hit; never loops
    /// past it.
    pub fn with_retries<T>(
        &mut self,
        max_attempts: usize,
        reason: &str,
        mut attempt: impl FnMut(&mut Self) -> Option<T>,
    ) -> GameResult<T> {
        for n in 1..=max_attempts {
            if let Some(value) = attempt(&mut *self) {
                if n > 1 {
                    log::debug!("sampling succeeded after {n} attempts: {reason}");
                }
                return Ok(value);
            }
        }
        Err(GameError::Exhausted {
            attempts: max_attempts,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_permutation() {
        let a = RandomRoundSampler::from_seed(7).permutation(20);
        let b = RandomRoundSampler::from_seed(7).permutation(20);
        assert_eq!(a, b);
    }

    #[test]
    fn rounds_get_independent_streams() {
        let a = RandomRoundSampler::for_round(7, 0).permutation(20);
        let b = RandomRoundSampler::for_round(7, 1).permutation(20);
        assert_ne!(a, b);
    }

    #[test]
    fn sample_indices_without_replacement() {
        let mut s = RandomRoundSampler::from_seed(1);
        for _ in 0..200 {
            let picked = s.sample_indices(5, 3).unwrap();
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(picked.iter().all(|i| *i < 5));
        }
    }

    #[test]
    fn sample_too_many_is_none() {
        let mut s = RandomRoundSampler::from_seed(1);
        assert!(s.sample_indices(2, 3).is_none());
        assert!(s.sample(&["a", "b"], 3).is_none());
        assert_eq!(s.sample(&["a", "b"], 2).map(|v| v.len()), Some(2));
    }

    #[test]
    fn uniform_ranges() {
        let mut s = RandomRoundSampler::from_seed(3);
        for _ in 0..500 {
            let f = s.uniform(1.5..2.5);
            assert!((1.5..2.5).contains(&f));
            let i = s.uniform_int(100..=500);
            assert!((100..=500).contains(&i));
        }
    }

    #[test]
    fn retries_are_capped() {
        let mut s = RandomRoundSampler::from_seed(0);
        let mut calls = 0;
        let result: GameResult<()> = s.with_retries(10, "never", |_| {
            calls += 1;
            None
        });
        assert_eq!(calls, 10);
        assert!(matches!(
            result,
            Err(GameError::Exhausted { attempts: 10, .. })
        ));
    }

    #[test]
    fn retries_stop_on_success() {
        let mut s = RandomRoundSampler::from_seed(0);
        let mut calls = 0;
        let value = s
            .with_retries(10, "third time", |_| {
                calls += 1;
                (calls == 3).then_some(calls)
            })
            .unwrap();
        assert_eq!(value, 3);
        assert_eq!(calls, 3);
    }

    proptest! {
        #[test]
        fn permutation_covers_every_index_once(seed in any::<u64>(), len in 0usize..200) {
            let mut order = RandomRoundSampler::from_seed(seed).permutation(len);
            order.sort_unstable();
            prop_assert_eq!(order, (0..len).collect::<Vec<_>>());
        }
    }
}
