// 🎲 Randomness Source - Injected, never global
//
// The generator only ever asks for two things: a uniform float in [a, b]
// and an integer in [a, b]. Anything implementing those can drive it,
// including a fixed script for tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Next uniform float in [lo, hi]
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Next integer in [lo, hi], both inclusive
    fn int_in(&mut self, lo: i64, hi: i64) -> i64;

    /// Bernoulli draw: one `uniform(0, 1)` compared against `probability`
    fn chance(&mut self, probability: f64) -> bool {
        self.uniform(0.0, 1.0) < probability
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        (**self).uniform(lo, hi)
    }

    fn int_in(&mut self, lo: i64, hi: i64) -> i64 {
        (**self).int_in(lo, hi)
    }
}

// ============================================================================
// SEEDED (reproducible)
// ============================================================================

/// ChaCha8-backed source. Same seed → same batch.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded implicitly from OS entropy
    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn int_in(&mut self, lo: i64, hi: i64) -> i64 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}

// ============================================================================
// SCRIPTED (tests, demos)
// ============================================================================

/// Replays fixed sequences, cycling when exhausted.
///
/// Floats are unit values in [0, 1] mapped onto the requested range
/// (`lo + u * (hi - lo)`). Integers are clamped into the requested range.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    units: Vec<f64>,
    ints: Vec<i64>,
    unit_pos: usize,
    int_pos: usize,
}

impl ScriptedRandom {
    pub fn new(units: Vec<f64>, ints: Vec<i64>) -> Self {
        ScriptedRandom {
            units,
            ints,
            unit_pos: 0,
            int_pos: 0,
        }
    }

    /// Always the same unit value and the same integer
    pub fn constant(unit: f64, int: i64) -> Self {
        ScriptedRandom::new(vec![unit], vec![int])
    }

    fn next_unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let u = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        u.clamp(0.0, 1.0)
    }

    fn next_int(&mut self) -> i64 {
        if self.ints.is_empty() {
            return 0;
        }
        let i = self.ints[self.int_pos % self.ints.len()];
        self.int_pos += 1;
        i
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let u = self.next_unit();
        lo + u * (hi - lo)
    }

    fn int_in(&mut self, lo: i64, hi: i64) -> i64 {
        let i = self.next_int();
        if lo > hi {
            return lo;
        }
        i.clamp(lo, hi)
    }
}
