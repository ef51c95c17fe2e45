//! Process-wide default configuration.
//!
//! Library code never reads this; it takes a [`ValidationConfig`] argument.
//! Application entry points and test harnesses use it to decide what to
//! pass down, mirroring a global settings object.

use lazy_static::lazy_static;
use std::sync::RwLock;
use tracing::info;

use super::{normalize_sample_size, ValidationConfig};
use crate::error::ConfigError;
use crate::generators::RandomSource;

lazy_static! {
    static ref CURRENT: RwLock<ValidationConfig> = RwLock::new(ValidationConfig::new());
}

/// A snapshot of the current default.
pub fn current() -> ValidationConfig {
    CURRENT
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn update(f: impl FnOnce(&mut ValidationConfig)) {
    let mut guard = CURRENT
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard);
}

/// Validated before anything is stored; an invalid value leaves the
/// default untouched.
pub fn set_test_sample_size(value: f64) -> Result<usize, ConfigError> {
    let size = normalize_sample_size(value)?;
    update(|config| config.sample_size = size);
    info!("Default test sample size set to {}", size);
    Ok(size)
}

pub fn set_skip_validations(skip: bool) {
    update(|config| config.skip_validations = skip);
}

pub fn set_random(random: RandomSource) {
    update(|config| config.random = random);
}

pub fn replace(config: ValidationConfig) {
    update(|current| *current = config);
}

pub fn reset() {
    replace(ValidationConfig::new());
}
