//! Classes
//!
//! A class is a named set of laws with optional parent classes. Classes
//! live in a [`ClassRegistry`] arena and are referred to by [`ClassId`];
//! parents must be registered before their children, so the hierarchy is
//! always a DAG.
//!
//! Validating a class against a generator validates every ancestor first.
//! Outcomes are cached per (generator, class) pair, so shared ancestors in
//! a diamond hierarchy run their laws once, and repeated requests report
//! the recorded outcome without sampling again.

mod cache;

pub use cache::ValidationCache;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Debug};
use tracing::{debug, info};

use crate::config::ValidationConfig;
use crate::error::ClassError;
use crate::fold::ErrorFold;
use crate::generators::Generator;
use crate::validators::Validator;

/// Label for classes registered without a name.
pub const UNNAMED: &str = "Unnamed";

/// Stable identity of a class inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(usize);

impl ClassId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct Class<T> {
    id: ClassId,
    name: String,
    parents: Vec<ClassId>,
    laws: Validator<T>,
}

impl<T> Class<T> {
    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct parents, in declaration order.
    pub fn parents(&self) -> &[ClassId] {
        &self.parents
    }

    pub fn laws(&self) -> &Validator<T> {
        &self.laws
    }

    /// Identity comparison; laws and parents are not compared.
    pub fn equals(&self, other: &Class<T>) -> bool {
        self.id == other.id
    }
}

impl<T> PartialEq for Class<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T> Eq for Class<T> {}

impl<T> fmt::Debug for Class<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parents", &self.parents)
            .field("laws", &self.laws)
            .finish()
    }
}

/// Collects a class definition before it is frozen by
/// [`ClassRegistry::register`].
pub struct ClassBuilder<T> {
    name: Option<String>,
    parents: Vec<ClassId>,
    laws: Vec<Validator<T>>,
}

impl<T> ClassBuilder<T> {
    pub fn new() -> Self {
        Self {
            name: None,
            parents: Vec::new(),
            laws: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn extends(mut self, parent: ClassId) -> Self {
        self.parents.push(parent);
        self
    }

    pub fn extends_all(mut self, parents: impl IntoIterator<Item = ClassId>) -> Self {
        self.parents.extend(parents);
        self
    }

    /// Appends a law; all appended laws must hold.
    pub fn law(mut self, law: impl Into<Validator<T>>) -> Self {
        self.laws.push(law.into());
        self
    }

    /// Replaces every law appended so far with `laws`.
    pub fn laws(mut self, laws: Validator<T>) -> Self {
        self.laws = vec![laws];
        self
    }

    fn into_laws(mut self) -> Validator<T> {
        match self.laws.len() {
            0 => Validator::trivial(),
            1 => self.laws.remove(0),
            _ => Validator::All(self.laws),
        }
    }
}

impl<T> Default for ClassBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena owning every class over values of type `T`, plus the cache of
/// validation outcomes.
///
/// Validation needs `&mut self`; hosts sharing a registry across threads
/// wrap it in a lock.
pub struct ClassRegistry<T> {
    classes: Vec<Class<T>>,
    cache: ValidationCache,
}

impl<T> ClassRegistry<T> {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            cache: ValidationCache::new(),
        }
    }

    pub fn builder() -> ClassBuilder<T> {
        ClassBuilder::new()
    }

    /// Freezes `builder` into a class. Parents must already be registered.
    pub fn register(&mut self, builder: ClassBuilder<T>) -> Result<ClassId, ClassError> {
        let id = ClassId(self.classes.len());
        let name = builder.name.clone().unwrap_or_else(|| UNNAMED.to_string());

        if let Some(parent) = builder.parents.iter().find(|p| p.0 >= self.classes.len()) {
            return Err(ClassError::UnknownParent {
                class: name,
                parent: *parent,
            });
        }

        let mut parents = Vec::with_capacity(builder.parents.len());
        for parent in &builder.parents {
            if !parents.contains(parent) {
                parents.push(*parent);
            }
        }

        let laws = builder.into_laws();
        debug!(
            "Registered class {} ({}) with {} parents and {} laws",
            name,
            id,
            parents.len(),
            laws.law_count()
        );

        self.classes.push(Class {
            id,
            name,
            parents,
            laws,
        });
        Ok(id)
    }

    pub fn get(&self, id: ClassId) -> Option<&Class<T>> {
        self.classes.get(id.0)
    }

    pub fn class(&self, id: ClassId) -> Result<&Class<T>, ClassError> {
        self.get(id).ok_or(ClassError::UnknownClass(id))
    }

    pub fn name_of(&self, id: ClassId) -> &str {
        self.get(id).map(Class::name).unwrap_or(UNNAMED)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Class<T>> {
        self.classes.iter()
    }

    pub fn cache(&self) -> &ValidationCache {
        &self.cache
    }

    /// Every transitive parent of `id`, each once, nearest first.
    pub fn ancestors(&self, id: ClassId) -> Vec<ClassId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut frontier: Vec<ClassId> = self
            .get(id)
            .map(|class| class.parents.clone())
            .unwrap_or_default();

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for parent in frontier {
                if parent == id || !seen.insert(parent) {
                    continue;
                }
                order.push(parent);
                if let Some(class) = self.get(parent) {
                    next.extend(class.parents.iter().copied());
                }
            }
            frontier = next;
        }
        order
    }

    /// True when `ancestor` is `class` itself or one of its transitive parents.
    pub fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        class == ancestor || self.ancestors(class).contains(&ancestor)
    }
}

impl<T: Debug> ClassRegistry<T> {
    /// Validates `class` and all of its ancestors against `generator`.
    pub fn validate<G>(&mut self, class: ClassId, generator: &G, config: &ValidationConfig) -> ErrorFold
    where
        G: Generator<T> + ?Sized,
    {
        let mut visited = HashSet::new();
        let result = validate_class(
            &self.classes,
            &mut self.cache,
            &mut visited,
            class,
            generator,
            config,
        );

        if result.is_success() {
            info!("{} is a valid {}", generator.name(), self.name_of(class));
        } else {
            info!("{} is not a valid {}", generator.name(), self.name_of(class));
        }
        result
    }
}

impl<T> Default for ClassRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ClassRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.classes)
            .field("cache", &self.cache)
            .finish()
    }
}

// `visited` spans one top-level request: a failing ancestor reached twice
// in the same traversal is reported in full only once. Across requests the
// cached outcome is returned as recorded.
fn validate_class<T, G>(
    classes: &[Class<T>],
    cache: &mut ValidationCache,
    visited: &mut HashSet<ClassId>,
    id: ClassId,
    generator: &G,
    config: &ValidationConfig,
) -> ErrorFold
where
    T: Debug,
    G: Generator<T> + ?Sized,
{
    let Some(class) = classes.get(id.0) else {
        return ErrorFold::fail(ClassError::UnknownClass(id).to_string());
    };

    let key = generator.id();
    let first_visit = visited.insert(id);
    if let Some(outcome) = cache.outcome(key, id) {
        debug!("Cache hit for {} against {}", class.name, generator.name());
        if first_visit || outcome.is_success() {
            return outcome.clone();
        }
        return ErrorFold::fail(format!(
            "{} already failed for {}",
            class.name,
            generator.name()
        ));
    }

    let prerequisites = ErrorFold::fold_conjoin(
        class
            .parents
            .iter()
            .map(|parent| validate_class(classes, cache, visited, *parent, generator, config))
            .collect::<Vec<_>>(),
    )
    .with_header(format!(
        "{} fails the prerequisites to be a {}",
        generator.name(),
        class.name
    ));

    let own = class.laws.check(generator, config).with_header(format!(
        "{} does not obey the laws of {}",
        generator.name(),
        class.name
    ));

    let result = prerequisites.conjoin(own);
    cache.record(key, id, result.clone());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{continuous, discrete, RandomSource};
    use crate::validators::obey;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(name: &str, calls: &Arc<AtomicUsize>, verdict: bool) -> Validator<i64> {
        let calls = Arc::clone(calls);
        obey(name, 1, move |_: &[i64]| {
            calls.fetch_add(1, Ordering::SeqCst);
            verdict
        })
    }

    fn numbers() -> crate::generators::Discrete<i64> {
        discrete("Numbers", vec![1, 2, 3]).with_random(RandomSource::seeded(1))
    }

    #[test]
    fn test_each_class_has_its_own_id() {
        let mut registry = ClassRegistry::<i64>::new();
        let a = registry.register(ClassBuilder::new()).unwrap();
        let b = registry.register(ClassBuilder::new()).unwrap();
        let c = registry.register(ClassBuilder::new()).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert!(registry.class(a).unwrap().equals(registry.class(a).unwrap()));
        assert!(!registry.class(a).unwrap().equals(registry.class(b).unwrap()));
    }

    #[test]
    fn test_defaults_to_unnamed_with_trivial_laws() {
        let mut registry = ClassRegistry::<i64>::new();
        let id = registry.register(ClassBuilder::new()).unwrap();
        let class = registry.class(id).unwrap();

        assert_eq!(class.name(), UNNAMED);
        assert_eq!(class.laws().law_count(), 0);
        assert!(registry
            .validate(id, &numbers(), &ValidationConfig::new())
            .is_success());
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let mut registry = ClassRegistry::<i64>::new();
        let err = registry
            .register(ClassBuilder::new().name("Orphan").extends(ClassId(4)))
            .unwrap_err();
        assert_eq!(
            err,
            ClassError::UnknownParent {
                class: "Orphan".to_string(),
                parent: ClassId(4)
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_appended_laws_all_apply() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ClassRegistry::new();
        let id = registry
            .register(
                ClassBuilder::new()
                    .name("Twice")
                    .law(counting("first", &calls, true))
                    .law(counting("second", &calls, true)),
            )
            .unwrap();

        assert_eq!(registry.class(id).unwrap().laws().law_names(), vec!["first", "second"]);
        let config = ValidationConfig::new().with_sample_size(3.0).unwrap();
        assert!(registry.validate(id, &numbers(), &config).is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_second_validation_is_a_cache_hit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ClassRegistry::new();
        let id = registry
            .register(ClassBuilder::new().name("Always").law(counting("always", &calls, true)))
            .unwrap();
        let generator = numbers();
        let config = ValidationConfig::new();

        assert!(registry.validate(id, &generator, &config).is_success());
        let after_first = calls.load(Ordering::SeqCst);
        assert_eq!(after_first, config.sample_size());

        assert!(registry.validate(id, &generator, &config).is_success());
        assert_eq!(calls.load(Ordering::SeqCst), after_first);
        assert!(registry.cache().contains(generator.id(), id));
    }

    #[test]
    fn test_failures_are_cached_too() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ClassRegistry::new();
        let id = registry
            .register(ClassBuilder::new().name("Never").law(counting("never", &calls, false)))
            .unwrap();
        let generator = numbers();
        let config = ValidationConfig::new();

        let first = registry.validate(id, &generator, &config);
        let second = registry.validate(id, &generator, &config);
        assert!(first.is_error());
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fresh_generator_revalidates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ClassRegistry::new();
        let id = registry
            .register(ClassBuilder::new().law(counting("always", &calls, true)))
            .unwrap();
        let config = ValidationConfig::new().with_sample_size(2.0).unwrap();

        registry.validate(id, &numbers(), &config);
        registry.validate(id, &numbers(), &config);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_diamond_validates_shared_ancestor_once() {
        let root_calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ClassRegistry::new();
        let root = registry
            .register(ClassBuilder::new().name("Root").law(counting("root", &root_calls, true)))
            .unwrap();
        let left = registry
            .register(ClassBuilder::new().name("Left").extends(root))
            .unwrap();
        let right = registry
            .register(ClassBuilder::new().name("Right").extends(root))
            .unwrap();
        let bottom = registry
            .register(ClassBuilder::new().name("Bottom").extends_all([left, right]))
            .unwrap();

        let config = ValidationConfig::new().with_sample_size(2.0).unwrap();
        assert!(registry.validate(bottom, &numbers(), &config).is_success());
        assert_eq!(root_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_diamond_reports_failing_ancestor_once() {
        let mut registry = ClassRegistry::new();
        let root = registry
            .register(ClassBuilder::new().name("Root").law(obey("broken", 1, |_: &[i64]| false)))
            .unwrap();
        let left = registry.register(ClassBuilder::new().name("Left").extends(root)).unwrap();
        let right = registry.register(ClassBuilder::new().name("Right").extends(root)).unwrap();
        let bottom = registry
            .register(ClassBuilder::new().name("Bottom").extends_all([left, right]))
            .unwrap();

        let result = registry.validate(bottom, &numbers(), &ValidationConfig::new());
        let message = result.message().unwrap();
        assert_eq!(message.matches("Predicate broken failed").count(), 1);
        assert!(message.contains("Root already failed for Numbers"));
        assert!(message.contains("Numbers fails the prerequisites to be a Bottom"));

        let generator = numbers();
        registry.validate(bottom, &generator, &ValidationConfig::new());
        let right_outcome = registry.cache().outcome(generator.id(), right).unwrap();
        assert!(right_outcome.is_error());
    }

    #[test]
    fn test_parent_failure_fails_child() {
        let mut registry = ClassRegistry::new();
        let eq = registry
            .register(ClassBuilder::new().name("Eq").law(obey("reflexivity", 1, |_: &[f64]| false)))
            .unwrap();
        let child = registry.register(ClassBuilder::new().name("Child").extends(eq)).unwrap();

        let generator = continuous("Floats", 1, |xs| xs[0]);
        let result = registry.validate(child, &generator, &ValidationConfig::new());
        assert!(result.message().unwrap().contains("reflexivity"));
        assert!(registry.cache().contains(generator.id(), eq));
        assert!(registry.cache().contains(generator.id(), child));
    }

    #[test]
    fn test_ancestors_are_transitive_and_deduplicated() {
        let mut registry = ClassRegistry::<i64>::new();
        let a = registry.register(ClassBuilder::new().name("A")).unwrap();
        let b = registry.register(ClassBuilder::new().name("B").extends(a)).unwrap();
        let c = registry.register(ClassBuilder::new().name("C").extends(a)).unwrap();
        let d = registry
            .register(ClassBuilder::new().name("D").extends_all([b, c, b]))
            .unwrap();

        assert_eq!(registry.class(d).unwrap().parents(), &[b, c]);
        assert_eq!(registry.ancestors(d), vec![b, c, a]);
        assert!(registry.is_subclass_of(d, a));
        assert!(registry.is_subclass_of(d, d));
        assert!(!registry.is_subclass_of(a, d));
    }

    #[test]
    fn test_unknown_class_fails_validation() {
        let mut registry = ClassRegistry::<i64>::new();
        let result = registry.validate(ClassId(9), &numbers(), &ValidationConfig::new());
        assert_eq!(result.message(), Some("Unknown class ClassId(9)"));
    }
}
