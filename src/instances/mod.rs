//! Instances
//!
//! Declaring that a type is an instance of a class, and asking about it
//! later. Declarations live in an [`InstanceTable`] side table keyed by the
//! subject's [`TypeId`]; the pure functions [`mark_validated`],
//! [`is_instance_of`] and [`validate_all`] operate on one subject's
//! [`InstanceMetadata`].
//!
//! [`declare_instance`] is the boundary assertion: it validates through the
//! registry cache and turns a failed validation into an error.

use serde::{Deserialize, Serialize};
use std::any::{type_name, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use tracing::{info, warn};

use crate::classes::{ClassId, ClassRegistry};
use crate::config::ValidationConfig;
use crate::error::InstanceError;
use crate::fold::ErrorFold;
use crate::generators::{Continuous, Generator};

/// A type that can mint its own sample values from `ARITY` numbers in
/// `[0, 1]`.
pub trait Instance: Sized + Debug + 'static {
    const ARITY: usize;

    fn generate_data(xs: &[f64]) -> Self;

    /// Label used in reports.
    fn subject_name() -> &'static str {
        type_name::<Self>()
    }
}

/// The classes a subject was declared against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceMetadata {
    /// Directly declared classes; ancestors are derived when queried.
    pub classes: Vec<ClassId>,
    /// Whether the declared classes were validated since the last declaration.
    pub validated: bool,
}

/// Returns `metadata` with `class` appended to the declared classes.
pub fn mark_validated(metadata: &InstanceMetadata, class: ClassId) -> InstanceMetadata {
    let mut classes = metadata.classes.clone();
    if !classes.contains(&class) {
        classes.push(class);
    }
    InstanceMetadata {
        classes,
        validated: false,
    }
}

/// True when `class` is declared, or is a transitive parent of a declared class.
pub fn is_instance_of<T>(
    registry: &ClassRegistry<T>,
    metadata: &InstanceMetadata,
    class: ClassId,
) -> bool {
    metadata
        .classes
        .iter()
        .any(|declared| registry.is_subclass_of(*declared, class))
}

/// A generator drawing from `T::generate_data`.
pub fn structural_generator<T: Instance>(config: &ValidationConfig) -> Continuous<T> {
    Continuous::new(T::subject_name(), T::ARITY, T::generate_data)
        .with_random(config.random().clone())
}

/// Checks the laws of every declared class and of every ancestor, each
/// exactly once, directly against `T`. Bypasses the registry cache.
pub fn validate_all<T: Instance>(
    registry: &ClassRegistry<T>,
    metadata: &InstanceMetadata,
    config: &ValidationConfig,
) -> ErrorFold {
    if metadata.classes.is_empty() {
        return ErrorFold::fail(
            InstanceError::NoDeclaredClasses {
                subject: T::subject_name().to_string(),
            }
            .to_string(),
        );
    }

    let generator = structural_generator::<T>(config);
    let mut visited = HashSet::new();
    let mut results = Vec::new();

    for declared in &metadata.classes {
        let mut lineage = registry.ancestors(*declared);
        lineage.reverse();
        lineage.push(*declared);

        for id in lineage {
            if !visited.insert(id) {
                continue;
            }
            let result = match registry.class(id) {
                Ok(class) => class.laws().check(&generator, config).with_header(format!(
                    "Class {} fails the laws of {}",
                    T::subject_name(),
                    class.name()
                )),
                Err(e) => ErrorFold::fail(e.to_string()),
            };
            results.push(result);
        }
    }

    ErrorFold::fold_conjoin(results)
}

/// Side table from subject type to its declared classes.
#[derive(Debug, Default)]
pub struct InstanceTable {
    entries: HashMap<TypeId, InstanceMetadata>,
}

impl InstanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `S` an instance of `class`. Nothing is validated here.
    pub fn declare<S: 'static>(&mut self, class: ClassId) -> &InstanceMetadata {
        let entry = self.entries.entry(TypeId::of::<S>()).or_default();
        *entry = mark_validated(entry, class);
        entry
    }

    pub fn metadata<S: 'static>(&self) -> Option<&InstanceMetadata> {
        self.entries.get(&TypeId::of::<S>())
    }

    pub fn is_instance<T: 'static>(&self, registry: &ClassRegistry<T>, class: ClassId) -> bool {
        self.metadata::<T>()
            .map(|metadata| is_instance_of(registry, metadata, class))
            .unwrap_or(false)
    }

    /// Validates every class declared for `T`, recording success.
    pub fn validate<T: Instance>(
        &mut self,
        registry: &ClassRegistry<T>,
        config: &ValidationConfig,
    ) -> Result<(), InstanceError> {
        let subject = T::subject_name().to_string();
        let Some(metadata) = self.entries.get_mut(&TypeId::of::<T>()) else {
            return Err(InstanceError::NoDeclaredClasses { subject });
        };

        match validate_all(registry, metadata, config) {
            ErrorFold::Success => {
                metadata.validated = true;
                info!("{} satisfies all of its declared classes", subject);
                Ok(())
            }
            ErrorFold::Failure(report) => {
                let class = metadata
                    .classes
                    .iter()
                    .map(|id| registry.name_of(*id))
                    .collect::<Vec<_>>()
                    .join(", ");
                warn!("{} fails its declared classes ({})", subject, class);
                Err(InstanceError::LawViolation {
                    subject,
                    class,
                    report,
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Asserts that the values produced by `generator` form a `class`, and on
/// success records `T` as an instance of it.
pub fn declare_instance<T, G>(
    registry: &mut ClassRegistry<T>,
    table: &mut InstanceTable,
    class: ClassId,
    generator: &G,
    config: &ValidationConfig,
) -> Result<(), InstanceError>
where
    T: Debug + 'static,
    G: Generator<T> + ?Sized,
{
    registry.class(class)?;

    match registry.validate(class, generator, config) {
        ErrorFold::Success => {
            table.declare::<T>(class);
            Ok(())
        }
        ErrorFold::Failure(report) => Err(InstanceError::LawViolation {
            subject: generator.name().to_string(),
            class: registry.name_of(class).to_string(),
            report,
        }),
    }
}
