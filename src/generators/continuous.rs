//! Continuous Generator
//!
//! Builds values from `arity` real numbers in `[0, 1]`. Round 0 passes
//! all zeros, round 1 all ones, and every later round fresh random draws.

use std::fmt;
use std::sync::Arc;

use super::{Generator, GeneratorId, RandomSource};
use crate::error::GeneratorError;
use crate::utils::panic::catch_failure;

type BuildFn<T> = dyn Fn(&[f64]) -> anyhow::Result<T> + Send + Sync;

pub struct Continuous<T> {
    id: GeneratorId,
    name: String,
    arity: usize,
    build: Arc<BuildFn<T>>,
    random: RandomSource,
}

impl<T: 'static> Continuous<T> {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        f: impl Fn(&[f64]) -> T + Send + Sync + 'static,
    ) -> Self {
        Self::try_new(name, arity, move |xs| Ok(f(xs)))
    }

    /// Like [`Continuous::new`] for functions that can reject their input.
    pub fn try_new(
        name: impl Into<String>,
        arity: usize,
        f: impl Fn(&[f64]) -> anyhow::Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: GeneratorId::new(),
            name: name.into(),
            arity,
            build: Arc::new(f),
            random: RandomSource::default(),
        }
    }
}

impl<T> Continuous<T> {
    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The arguments handed to the wrapped function for round `i`.
    pub fn params_for(&self, i: usize) -> Vec<f64> {
        (0..self.arity)
            .map(|_| match i {
                0 => 0.0,
                1 => 1.0,
                _ => self.random.next(),
            })
            .collect()
    }
}

impl<T> Generator<T> for Continuous<T> {
    fn id(&self) -> GeneratorId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, i: usize) -> Result<T, GeneratorError> {
        let params = self.params_for(i);
        let failed = |message: String| GeneratorError::Failed {
            name: self.name.clone(),
            message,
        };

        match catch_failure(|| (self.build)(&params)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(failed(e.to_string())),
            Err(panic) => Err(failed(panic)),
        }
    }
}

impl<T> Clone for Continuous<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            arity: self.arity,
            build: Arc::clone(&self.build),
            random: self.random.clone(),
        }
    }
}

impl<T> fmt::Debug for Continuous<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuous")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("random", &self.random)
            .finish()
    }
}

/// Generates test values through a function of `arity` numbers.
///
/// ```
/// use typeclass_laws::generators::{continuous, Generator};
///
/// let points = continuous("Point", 2, |xs| (xs[0], xs[1]));
/// assert_eq!(points.get(0).unwrap(), (0.0, 0.0));
/// assert_eq!(points.get(1).unwrap(), (1.0, 1.0));
/// ```
pub fn continuous<T: 'static>(
    name: impl Into<String>,
    arity: usize,
    f: impl Fn(&[f64]) -> T + Send + Sync + 'static,
) -> Continuous<T> {
    Continuous::new(name, arity, f)
}

pub fn try_continuous<T: 'static>(
    name: impl Into<String>,
    arity: usize,
    f: impl Fn(&[f64]) -> anyhow::Result<T> + Send + Sync + 'static,
) -> Continuous<T> {
    Continuous::try_new(name, arity, f)
}
