//! Random number generators.
//!
//! Wraps the `rand_mt` Mersenne Twister and turns its output into standard
//! normal deviates through the inverse normal CDF. A given seed always yields
//! the same sequence on every platform.

use hw_core::Real;
use rand_mt::Mt19937GenRand64;

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // 53 high bits → exactly representable multiples of 2^-53
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }
}

/// An inverse-cumulative normal random number generator.
///
/// Wraps a uniform RNG and transforms its output through the inverse CDF of
/// the standard normal distribution.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }

    /// Generate the next standard-normal deviate.
    pub fn next_real(&mut self) -> Real {
        // Avoid exact 0, which would produce −∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }

    /// Fill `out` with consecutive standard-normal deviates.
    pub fn fill(&mut self, out: &mut [Real]) {
        for z in out.iter_mut() {
            *z = self.next_real();
        }
    }
}
