use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use rand_pcg::Pcg64Mcg;

/// An explicitly seeded random source. Every component that needs randomness owns one of
/// these, so that identical seeds produce identical populations and placements regardless
/// of what else happened in the process.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: Pcg64Mcg,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Samples uniformly from `[min, max]`. A degenerate range returns `min`.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        Uniform::new_inclusive(min, max).sample(&mut self.rng)
    }

    /// Samples an index uniformly from `[0, len)`.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }
}
