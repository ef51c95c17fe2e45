//! Error Types
//!
//! One error enum per concern. Law violations are *not* errors at this
//! level: validators and classes report them as [`ErrorFold`](crate::fold::ErrorFold)
//! failures, and only the outermost boundary converts them into
//! [`LawViolation`] / [`InstanceError::LawViolation`].

use std::path::PathBuf;
use thiserror::Error;

use crate::classes::ClassId;

/// Invalid configuration values. Raised immediately when the value is set.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Test sample size cannot be negative (got {0}).")]
    NegativeSampleSize(f64),

    #[error("Test sample size must be a finite number (got {0}).")]
    NonFiniteSampleSize(f64),

    #[error("Test sample size must be at least {min} to cover the edge cases (got {got}).")]
    SampleSizeTooSmall { got: usize, min: usize },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidOverride { key: String, value: String },
}

/// Failures while minting a sample value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeneratorError {
    #[error("Generator {name} has no values to sample from")]
    EmptyValues { name: String },

    #[error("Generator {name} failed: {message}")]
    Failed { name: String, message: String },
}

/// Misuse of the class registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassError {
    #[error("Class {class} extends unknown class {parent:?}")]
    UnknownParent { class: String, parent: ClassId },

    #[error("Unknown class {0:?}")]
    UnknownClass(ClassId),
}

/// Failures of the instance boundary (tagging and asserting instances).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InstanceError {
    #[error("{subject} has no declared classes")]
    NoDeclaredClasses { subject: String },

    #[error("{subject} is not a valid {class}:\n\n{report}")]
    LawViolation {
        subject: String,
        class: String,
        report: String,
    },

    #[error(transparent)]
    Class(#[from] ClassError),
}

/// A failed validation converted into an error at the boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{report}")]
pub struct LawViolation {
    pub report: String,
}
