//! Random Draw Capability
//!
//! All stochastic choices in the model go through the [`Selector`]
//! trait so a run can be replayed exactly: the default implementation
//! wraps a seedable RNG, and [`ScriptedSelector`] feeds back a fixed
//! sequence of draws for tests.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of the model's random draws.
pub trait Selector {
    /// Uniform index in `[0, upper)`. Callers must pass `upper >= 1`.
    fn index(&mut self, upper: usize) -> usize;

    /// Uniform opinion strictly inside (-1, 1).
    fn opinion(&mut self) -> f64;

    /// Uniform value in [0, 1].
    fn unit(&mut self) -> f64;
}

/// Selector backed by a small, seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: SmallRng,
}

impl RandomSelector {
    /// Selector with a fixed seed for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Selector seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Selector for RandomSelector {
    fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    fn opinion(&mut self) -> f64 {
        // gen_range is half-open; reject the lower endpoint
        loop {
            let v = self.rng.gen_range(-1.0..1.0);
            if v > -1.0 {
                return v;
            }
        }
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..=1.0)
    }
}

/// Selector that replays pre-recorded draws.
///
/// Panics when a queue runs dry or a scripted index is out of bounds;
/// a replay script that does not match the consumption order is a
/// broken test, not a recoverable condition.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    indices: VecDeque<usize>,
    opinions: VecDeque<f64>,
    units: VecDeque<f64>,
}

impl ScriptedSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn queue_indices(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.indices.extend(indices);
    }

    pub fn queue_opinions(&mut self, opinions: impl IntoIterator<Item = f64>) {
        self.opinions.extend(opinions);
    }

    pub fn queue_units(&mut self, units: impl IntoIterator<Item = f64>) {
        self.units.extend(units);
    }

    /// Draws remaining across all queues.
    pub fn remaining(&self) -> usize {
        self.indices.len() + self.opinions.len() + self.units.len()
    }
}

impl Selector for ScriptedSelector {
    fn index(&mut self, upper: usize) -> usize {
        let i = self
            .indices
            .pop_front()
            .unwrap_or_else(|| panic!("scripted index queue exhausted (upper {})", upper));
        assert!(i < upper, "scripted index {} out of bounds for {}", i, upper);
        i
    }

    fn opinion(&mut self) -> f64 {
        self.opinions
            .pop_front()
            .unwrap_or_else(|| panic!("scripted opinion queue exhausted"))
    }

    fn unit(&mut self) -> f64 {
        self.units
            .pop_front()
            .unwrap_or_else(|| panic!("scripted unit queue exhausted"))
    }
}
