//! Pluggable uniform random sources.
//!
//! The generator never touches a global generator. Callers inject a
//! [`RandomSource`]: a fresh entropy-seeded one per call, a seeded one shared
//! across calls for a reproducible stream, or a scripted one in tests.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

// ---

/// Source of uniform floats in a closed range.
pub trait RandomSource {
    /// Draw a value in `[low, high]`.
    fn next_float(&mut self, low: f64, high: f64) -> Result<f64>;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_float(&mut self, low: f64, high: f64) -> Result<f64> {
        (**self).next_float(low, high)
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    // ---
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    // ---
    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Fresh generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_float(&mut self, low: f64, high: f64) -> Result<f64> {
        // ---
        check_range(low, high)?;
        Ok(self.rng.gen_range(low..=high))
    }
}

/// Returns the midpoint of every requested range.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointSource;

impl RandomSource for MidpointSource {
    fn next_float(&mut self, low: f64, high: f64) -> Result<f64> {
        // ---
        check_range(low, high)?;
        Ok((low + high) / 2.0)
    }
}

/// Replays a scripted sequence of values, then fails once exhausted.
///
/// Values are handed out verbatim; range checking is left to the consumer so
/// that out-of-range scripts can exercise validation paths.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    values: VecDeque<f64>,
}

impl FixedSource {
    // ---
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for FixedSource {
    fn next_float(&mut self, low: f64, high: f64) -> Result<f64> {
        // ---
        check_range(low, high)?;
        self.values
            .pop_front()
            .ok_or_else(|| Error::invalid("random source exhausted"))
    }
}

fn check_range(low: f64, high: f64) -> Result<()> {
    // ---
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(Error::invalid(format!(
            "invalid random range [{low}, {high}]"
        )));
    }
    Ok(())
}

/// Draw from `source` and verify the value actually lies in `[low, high]`.
pub(crate) fn draw(source: &mut impl RandomSource, low: f64, high: f64) -> Result<f64> {
    // ---
    let value = source.next_float(low, high)?;
    if !value.is_finite() || value < low || value > high {
        return Err(Error::invalid(format!(
            "random source produced {value}, outside [{low}, {high}]"
        )));
    }
    Ok(value)
}
