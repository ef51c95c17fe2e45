//! Validators
//!
//! Composable law checkers: a single [`Law`] (`Obeys`), a conjunction
//! (`All`) or a disjunction (`Any`). Every sub-validator is evaluated; the
//! results are folded with [`ErrorFold`] so a failure report lists every
//! broken law, not just the first.

mod law;

pub use law::Law;

use std::fmt::{self, Debug};

use crate::config::ValidationConfig;
use crate::fold::ErrorFold;
use crate::generators::Generator;

pub const ALL_FAILED_HEADER: &str = "All constraint failed:";
pub const ANY_FAILED_HEADER: &str = "Any constraint failed:";

pub enum Validator<T> {
    Obeys(Law<T>),
    All(Vec<Validator<T>>),
    Any(Vec<Validator<T>>),
}

impl<T> Validator<T> {
    /// The validator that always passes (`All` of nothing).
    pub fn trivial() -> Self {
        Validator::All(Vec::new())
    }

    /// Conjunction with `other`, flattening into an existing `All`.
    pub fn and(self, other: Validator<T>) -> Self {
        match self {
            Validator::All(mut validators) => {
                validators.push(other);
                Validator::All(validators)
            }
            single => Validator::All(vec![single, other]),
        }
    }

    /// Disjunction with `other`, flattening into an existing `Any`.
    pub fn or(self, other: Validator<T>) -> Self {
        match self {
            Validator::Any(mut validators) => {
                validators.push(other);
                Validator::Any(validators)
            }
            single => Validator::Any(vec![single, other]),
        }
    }

    /// Names of every law reachable from this validator, in order.
    pub fn law_names(&self) -> Vec<&str> {
        match self {
            Validator::Obeys(law) => vec![law.name()],
            Validator::All(validators) | Validator::Any(validators) => {
                validators.iter().flat_map(|v| v.law_names()).collect()
            }
        }
    }

    pub fn law_count(&self) -> usize {
        self.law_names().len()
    }
}

impl<T: Debug> Validator<T> {
    pub fn check<G>(&self, generator: &G, config: &ValidationConfig) -> ErrorFold
    where
        G: Generator<T> + ?Sized,
    {
        match self {
            Validator::Obeys(law) => law.check(generator, config),
            Validator::All(validators) => {
                ErrorFold::fold_conjoin(validators.iter().map(|v| v.check(generator, config)))
                    .with_header(ALL_FAILED_HEADER)
            }
            Validator::Any(validators) => {
                // Collected first so every alternative runs, even after a pass.
                let results: Vec<ErrorFold> =
                    validators.iter().map(|v| v.check(generator, config)).collect();
                ErrorFold::fold_disjoin(results).with_header(ANY_FAILED_HEADER)
            }
        }
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        match self {
            Validator::Obeys(law) => Validator::Obeys(law.clone()),
            Validator::All(validators) => Validator::All(validators.clone()),
            Validator::Any(validators) => Validator::Any(validators.clone()),
        }
    }
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::trivial()
    }
}

impl<T> From<Law<T>> for Validator<T> {
    fn from(law: Law<T>) -> Self {
        Validator::Obeys(law)
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Obeys(law) => f.debug_tuple("Obeys").field(law).finish(),
            Validator::All(validators) => f.debug_tuple("All").field(validators).finish(),
            Validator::Any(validators) => f.debug_tuple("Any").field(validators).finish(),
        }
    }
}

/// A validator demanding that `predicate` holds for any `arity` samples.
///
/// ```
/// use typeclass_laws::validators::obey;
///
/// let commutativity = obey("commutativity", 2, |xs: &[i64]| xs[0] + xs[1] == xs[1] + xs[0]);
/// assert_eq!(commutativity.law_names(), vec!["commutativity"]);
/// ```
pub fn obey<T: 'static>(
    name: impl Into<String>,
    arity: usize,
    predicate: impl Fn(&[T]) -> bool + Send + Sync + 'static,
) -> Validator<T> {
    Validator::Obeys(Law::new(name, arity, predicate))
}

pub fn try_obey<T: 'static>(
    name: impl Into<String>,
    arity: usize,
    predicate: impl Fn(&[T]) -> anyhow::Result<bool> + Send + Sync + 'static,
) -> Validator<T> {
    Validator::Obeys(Law::try_new(name, arity, predicate))
}

/// Every validator must pass. `all([])` passes.
pub fn all<T>(validators: impl IntoIterator<Item = Validator<T>>) -> Validator<T> {
    Validator::All(validators.into_iter().collect())
}

/// At least one validator must pass. `any([])` fails.
pub fn any<T>(validators: impl IntoIterator<Item = Validator<T>>) -> Validator<T> {
    Validator::Any(validators.into_iter().collect())
}
