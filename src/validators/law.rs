//! Laws
//!
//! A [`Law`] is a named predicate over `arity` sampled values. Checking it
//! is a first-failure falsification search: edge rounds first, then random
//! rounds, stopping at the first counterexample. No shrinking.

use std::fmt::{self, Debug};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::config::ValidationConfig;
use crate::fold::ErrorFold;
use crate::generators::Generator;
use crate::utils::panic::catch_failure;
use crate::utils::truncate::render_values;

type PredicateFn<T> = dyn Fn(&[T]) -> anyhow::Result<bool> + Send + Sync;

pub struct Law<T> {
    name: String,
    arity: usize,
    predicate: Arc<PredicateFn<T>>,
}

impl<T: 'static> Law<T> {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        predicate: impl Fn(&[T]) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::try_new(name, arity, move |values| Ok(predicate(values)))
    }

    /// A law whose predicate may fail outright. An `Err` counts as a
    /// violation and its message is kept in the report.
    pub fn try_new(
        name: impl Into<String>,
        arity: usize,
        predicate: impl Fn(&[T]) -> anyhow::Result<bool> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            predicate: Arc::new(predicate),
        }
    }
}

impl<T> Law<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl<T: Debug> Law<T> {
    pub fn check<G>(&self, generator: &G, config: &ValidationConfig) -> ErrorFold
    where
        G: Generator<T> + ?Sized,
    {
        if config.skip_validations() {
            trace!("Skipping law {}", self.name);
            return ErrorFold::success();
        }

        for round in 0..config.sample_size() {
            let mut params = Vec::with_capacity(self.arity);

            for _ in 0..self.arity {
                match generator.get(round) {
                    Ok(value) => params.push(value),
                    Err(e) => {
                        warn!("Generator {} failed while checking {}: {}", generator.name(), self.name, e);
                        return ErrorFold::fail(e.to_string()).conjoin(self.counterexample(&params));
                    }
                }
            }

            let verdict = match catch_failure(|| (self.predicate)(&params)) {
                Ok(Ok(true)) => continue,
                Ok(Ok(false)) => self.counterexample(&params),
                Ok(Err(e)) => ErrorFold::fail(format!("{:#}", e)).conjoin(self.counterexample(&params)),
                Err(panic) => ErrorFold::fail(panic).conjoin(self.counterexample(&params)),
            };

            warn!(
                "Law {} violated by {} in round {}",
                self.name,
                generator.name(),
                round
            );
            return verdict;
        }

        debug!(
            "Law {} held for {} over {} rounds",
            self.name,
            generator.name(),
            config.sample_size()
        );
        ErrorFold::success()
    }

    fn counterexample(&self, params: &[T]) -> ErrorFold {
        if params.is_empty() {
            ErrorFold::fail(format!("Predicate {} failed with no params", self.name))
        } else {
            ErrorFold::fail(format!(
                "Predicate {} failed with params {}",
                self.name,
                render_values(params)
            ))
        }
    }
}

impl<T> Clone for Law<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            arity: self.arity,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Law<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Law")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}
