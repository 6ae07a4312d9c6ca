//! Source of the placeholder random values (series jitter, volatility,
//! significance flags).

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform randomness in [0, 1)
pub trait Entropy {
    fn unit(&mut self) -> f64;

    /// True with probability `1 - threshold`, i.e. `unit() > threshold`
    fn above(&mut self, threshold: f64) -> bool {
        self.unit() > threshold
    }
}

/// Production entropy backed by any `rand` generator
#[derive(Debug)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: Rng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngEntropy<StdRng> {
    /// Seeded generator for reproducible sessions
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> Entropy for RngEntropy<R> {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed cycle of values
#[derive(Debug, Clone)]
pub struct ScriptedEntropy {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedEntropy {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        Self {
            values: if values.is_empty() { vec![0.5] } else { values },
            cursor: 0,
        }
    }

    /// Always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl Entropy for ScriptedEntropy {
    fn unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl<E: Entropy + ?Sized> Entropy for Box<E> {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}
