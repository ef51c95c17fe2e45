//! Value Generators
//!
//! A [`Generator`] mints sample values for a zero-based round index. The
//! validators pull from it as many values as a law needs per round.

mod continuous;
mod discrete;
mod random;

pub use continuous::{continuous, try_continuous, Continuous};
pub use discrete::{discrete, Discrete};
pub use random::RandomSource;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::GeneratorError;

/// Identity of a generator, used as the validation cache key.
///
/// Minted once per constructed generator; clones keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorId(Uuid);

impl GeneratorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GeneratorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A source of sample values.
///
/// Round `0` and round `1` are the edge-case rounds; implementations
/// should make them reachable and meaningful. Nothing requires two calls
/// with the same index to agree.
pub trait Generator<T> {
    fn id(&self) -> GeneratorId;

    /// Label used in reports.
    fn name(&self) -> &str;

    fn get(&self, i: usize) -> Result<T, GeneratorError>;
}

impl<T, G: Generator<T> + ?Sized> Generator<T> for &G {
    fn id(&self) -> GeneratorId {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, i: usize) -> Result<T, GeneratorError> {
        (**self).get(i)
    }
}
