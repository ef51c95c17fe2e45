//! Type-Class Law Validation
//!
//! Declare abstract classes (Eq, Semigroup, Monoid, ...) as sets of
//! algebraic laws, declare that concrete types are instances of them, and
//! check the laws against sampled values:
//! - Composable validators (`obey` / `all` / `any`) folding every result
//! - Edge-case plus random sampling through injectable generators
//! - Class hierarchies validated once per (generator, class) pair
//! - A side table answering "is this type an instance of that class?"
//!
//! ```
//! use typeclass_laws::classes::{ClassBuilder, ClassRegistry};
//! use typeclass_laws::config::ValidationConfig;
//! use typeclass_laws::generators::continuous;
//! use typeclass_laws::laws::partial_eq_laws;
//!
//! let mut registry = ClassRegistry::new();
//! let eq = registry
//!     .register(ClassBuilder::new().name("Eq").laws(partial_eq_laws::<i64>()))
//!     .unwrap();
//!
//! let ints = continuous("Ints", 1, |xs| (xs[0] * 100.0) as i64);
//! assert!(registry.validate(eq, &ints, &ValidationConfig::new()).is_success());
//! ```

pub mod classes;
pub mod config;
pub mod error;
pub mod fold;
pub mod generators;
pub mod instances;
pub mod laws;
pub mod utils;
pub mod validators;

// Re-exports for convenience
pub use classes::{Class, ClassBuilder, ClassId, ClassRegistry, ValidationCache};
pub use config::ValidationConfig;
pub use error::{ClassError, ConfigError, GeneratorError, InstanceError, LawViolation};
pub use fold::ErrorFold;
pub use generators::{continuous, discrete, Generator, RandomSource};
pub use instances::{declare_instance, Instance, InstanceMetadata, InstanceTable};
pub use validators::{all, any, obey, try_obey, Validator};
