//! Uniform random values over an inclusive range

use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;

use crate::error::{ProducerError, ProducerResult};
use crate::traits::ValueSource;

/// Generates values uniformly distributed over `[first, last]`.
///
/// Each producer owns its own randomizer; there is no shared generator state.
#[derive(Debug, Clone)]
pub struct RangeRandomizer {
    rng: StdRng,
    distribution: Uniform<u32>,
    first: u32,
    last: u32,
}

impl RangeRandomizer {
    /// Randomizer over `[first, last]`, seeded from OS entropy
    pub fn new(first: u32, last: u32) -> ProducerResult<Self> {
        Self::validate(first, last)?;
        Ok(Self::build(StdRng::from_entropy(), first, last))
    }

    /// Randomizer over `[1, n]`
    pub fn up_to(n: u32) -> ProducerResult<Self> {
        Self::new(1, n)
    }

    /// Reproducible randomizer for tests and replays
    pub fn with_seed(first: u32, last: u32, seed: u64) -> ProducerResult<Self> {
        Self::validate(first, last)?;
        Ok(Self::build(StdRng::seed_from_u64(seed), first, last))
    }

    pub fn get_next(&mut self) -> u32 {
        self.distribution.sample(&mut self.rng)
    }

    pub fn range(&self) -> (u32, u32) {
        (self.first, self.last)
    }

    fn validate(first: u32, last: u32) -> ProducerResult<()> {
        if first > last {
            return Err(ProducerError::InvalidRange { first, last });
        }
        Ok(())
    }

    fn build(rng: StdRng, first: u32, last: u32) -> Self {
        Self {
            rng,
            distribution: Uniform::new_inclusive(first, last),
            first,
            last,
        }
    }
}

impl ValueSource for RangeRandomizer {
    fn next_value(&mut self) -> u32 {
        self.get_next()
    }
}
