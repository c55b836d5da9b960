//! Randomness providers
//!
//! The engine only ever asks for uniform integers in a bounded range, so the
//! source is injected behind [`RandomProvider`]. Production tables use
//! [`ChaChaRandom::from_entropy`]; tests and replays use a seed or a scripted
//! [`SequenceRandom`].

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Errors raised by a randomness source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RandomError {
    #[error("Empty range: bound must be positive")]
    EmptyBound,

    #[error("Empty range: [{min}, {max})")]
    EmptyRange { min: i64, max: i64 },

    #[error("Provider returned {value}, outside [0, {bound})")]
    OutOfRange { value: usize, bound: usize },

    #[error("Random source failed: {0}")]
    Source(String),
}

/// Uniform bounded-integer source
pub trait RandomProvider: Send {
    /// Uniform integer in `[0, bound)`. `bound == 0` is an error.
    fn next_index(&mut self, bound: usize) -> Result<usize, RandomError>;

    /// Uniform integer in `[min, max)`
    fn next_range(&mut self, min: i64, max: i64) -> Result<i64, RandomError> {
        if max <= min {
            return Err(RandomError::EmptyRange { min, max });
        }
        let span = max.abs_diff(min) as usize;
        let offset = self.next_index(span)?;
        // offset < span, so the wrapped sum lands in [min, max)
        Ok(min.wrapping_add(offset as i64))
    }

    /// Uniform float in `[0, 1)`
    fn next_unit(&mut self) -> Result<f64, RandomError>;
}

impl<R: RandomProvider + ?Sized> RandomProvider for Box<R> {
    fn next_index(&mut self, bound: usize) -> Result<usize, RandomError> {
        (**self).next_index(bound)
    }

    fn next_range(&mut self, min: i64, max: i64) -> Result<i64, RandomError> {
        (**self).next_range(min, max)
    }

    fn next_unit(&mut self) -> Result<f64, RandomError> {
        (**self).next_unit()
    }
}

/// ChaCha8-backed provider, seeded or from OS entropy
pub struct ChaChaRandom {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl ChaChaRandom {
    /// Create a provider with optional seed
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { rng, seed }
    }

    /// Reproducible stream
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// System entropy
    pub fn from_entropy() -> Self {
        Self::new(None)
    }

    /// Seed used at construction, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomProvider for ChaChaRandom {
    fn next_index(&mut self, bound: usize) -> Result<usize, RandomError> {
        if bound == 0 {
            return Err(RandomError::EmptyBound);
        }
        Ok(self.rng.random_range(0..bound))
    }

    fn next_unit(&mut self) -> Result<f64, RandomError> {
        Ok(self.rng.random::<f64>())
    }
}

/// Scripted provider: replays a fixed sequence, cycling when exhausted.
///
/// Values are returned as-is (not reduced modulo the bound), so a script that
/// overshoots a bound surfaces as [`RandomError::OutOfRange`] in the engine.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always the same value
    pub fn constant(value: usize) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws served so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomProvider for SequenceRandom {
    fn next_index(&mut self, bound: usize) -> Result<usize, RandomError> {
        if bound == 0 {
            return Err(RandomError::EmptyBound);
        }
        if self.values.is_empty() {
            return Err(RandomError::Source("empty sequence".into()));
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        Ok(value)
    }

    fn next_unit(&mut self) -> Result<f64, RandomError> {
        if self.values.is_empty() {
            return Err(RandomError::Source("empty sequence".into()));
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        let max = self.values.iter().copied().max().unwrap_or(0);
        Ok(value as f64 / (max as f64 + 1.0))
    }
}
