//! Seeded pseudo-random number generator
//!
//! Every tournament gets its own stream derived from a campaign seed and the
//! tournament index, so results are reproducible and workers never share
//! generator state.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: SmallRng,
}

impl SeededRng {
    /// Create a new RNG from a seed and a stream index
    pub fn new(seed: u64, stream: u64) -> Self {
        // Mix the stream in so neighbouring indices start far apart
        let state = seed ^ stream.wrapping_mul(0x517cc1b727220a95);
        Self {
            inner: SmallRng::seed_from_u64(state),
        }
    }

    /// Create an unseeded RNG from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_entropy(),
        }
    }

    /// Uniform draw in [0, 1), the unit every coin-flip strategy works with
    pub fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform integer in [min, max] inclusive
    pub fn next_between(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..=max)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
