//! Seedable random source shared by collapse-point tie-breaking and tile picks

use crate::io::configuration::NONDETERMINISTIC_SEED;
use rand::Rng;
use rand_mt::Mt64;

/// Deterministic generator owned by a single engine
///
/// Backed by the 64-bit Mersenne Twister (MT19937-64) initialised directly
/// from the seed, so raw output matches other MT19937-64 implementations.
/// Bounded draws go through `rand`'s uniform sampling.
///
/// The same seed always yields the same sequence of draws. A seed equal to
/// [`NONDETERMINISTIC_SEED`] is replaced by a fresh nonzero seed drawn from
/// the thread-local generator, and the replacement is kept so the run can be
/// reproduced.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Mt64,
    seed: u64,
}

impl RandomSource {
    /// Create a random source from a seed
    pub fn new(seed: u64) -> Self {
        let seed = if seed == NONDETERMINISTIC_SEED {
            rand::rng().random_range(1..=u64::MAX)
        } else {
            seed
        };

        Self {
            rng: Mt64::new(seed),
            seed,
        }
    }

    /// Seed actually used by this source
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Next raw 64-bit output of the generator
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform index in `0..len`, or 0 when `len` is 0
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    /// Uniform value in `0..bound`, or 0 when `bound` is 0
    pub fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }
}
