//! Validation Cache
//!
//! Records which classes have already been validated against which
//! generator, together with the outcome. Entries are never evicted; the
//! cache lives as long as the registry that owns it.

use std::collections::HashMap;

use super::ClassId;
use crate::fold::ErrorFold;
use crate::generators::GeneratorId;

#[derive(Debug, Default)]
pub struct ValidationCache {
    outcomes: HashMap<GeneratorId, HashMap<ClassId, ErrorFold>>,
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, generator: GeneratorId, class: ClassId) -> bool {
        self.outcome(generator, class).is_some()
    }

    /// The recorded result of validating `class` against `generator`.
    pub fn outcome(&self, generator: GeneratorId, class: ClassId) -> Option<&ErrorFold> {
        self.outcomes
            .get(&generator)
            .and_then(|classes| classes.get(&class))
    }

    /// Records an outcome. The first record for a pair wins.
    pub fn record(&mut self, generator: GeneratorId, class: ClassId, outcome: ErrorFold) {
        self.outcomes
            .entry(generator)
            .or_default()
            .entry(class)
            .or_insert(outcome);
    }

    /// Classes validated against `generator`, in id order.
    pub fn classes_for(&self, generator: GeneratorId) -> Vec<ClassId> {
        let mut classes: Vec<ClassId> = self
            .outcomes
            .get(&generator)
            .map(|classes| classes.keys().copied().collect())
            .unwrap_or_default();
        classes.sort();
        classes
    }

    /// Number of recorded (generator, class) pairs.
    pub fn len(&self) -> usize {
        self.outcomes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
