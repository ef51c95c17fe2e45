//! Discrete Generator
//!
//! Samples uniformly from a fixed list. The round index is ignored.

use super::{Generator, GeneratorId, RandomSource};
use crate::error::GeneratorError;

#[derive(Debug, Clone)]
pub struct Discrete<T> {
    id: GeneratorId,
    name: String,
    values: Vec<T>,
    random: RandomSource,
}

impl<T: Clone> Discrete<T> {
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            id: GeneratorId::new(),
            name: name.into(),
            values,
            random: RandomSource::default(),
        }
    }

    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: Clone> Generator<T> for Discrete<T> {
    fn id(&self) -> GeneratorId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, _i: usize) -> Result<T, GeneratorError> {
        if self.values.is_empty() {
            return Err(GeneratorError::EmptyValues {
                name: self.name.clone(),
            });
        }

        let len = self.values.len();
        let scaled = (self.random.next() * len as f64).floor().max(0.0) as usize;
        Ok(self.values[scaled.min(len - 1)].clone())
    }
}

/// Generates test values by sampling from `values`.
pub fn discrete<T: Clone>(name: impl Into<String>, values: Vec<T>) -> Discrete<T> {
    Discrete::new(name, values)
}
