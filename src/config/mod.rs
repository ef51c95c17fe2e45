//! Validation Configuration
//!
//! [`ValidationConfig`] is an immutable value threaded through every
//! `check`/`validate` call. It can be built in code, loaded from a JSON or
//! YAML file, and adjusted from the environment. The mutable process-wide
//! default lives in [`defaults`] and is meant for the application edge only.

pub mod defaults;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;
use crate::generators::RandomSource;

/// Rounds per law when nothing else is configured.
pub const DEFAULT_SAMPLE_SIZE: usize = 15;

/// Rounds 0 and 1 are the edge-case rounds and always run.
pub const MIN_SAMPLE_SIZE: usize = 2;

pub const ENV_SAMPLE_SIZE: &str = "TYPECLASS_LAWS_SAMPLE_SIZE";
pub const ENV_SKIP_VALIDATIONS: &str = "TYPECLASS_LAWS_SKIP";
pub const ENV_SEED: &str = "TYPECLASS_LAWS_SEED";

#[derive(Debug, Clone)]
pub struct ValidationConfig {
    sample_size: usize,
    skip_validations: bool,
    random: RandomSource,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            skip_validations: false,
            random: RandomSource::default(),
        }
    }

    /// Number of sample rounds per law, edge-case rounds included.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// When set, every law check passes without sampling.
    pub fn skip_validations(&self) -> bool {
        self.skip_validations
    }

    pub fn random(&self) -> &RandomSource {
        &self.random
    }

    /// Sets the sample size. Fractional values are truncated; negative,
    /// non-finite and too-small values are rejected.
    pub fn with_sample_size(mut self, value: f64) -> Result<Self, ConfigError> {
        self.sample_size = normalize_sample_size(value)?;
        Ok(self)
    }

    pub fn with_skip_validations(mut self, skip: bool) -> Self {
        self.skip_validations = skip;
        self
    }

    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    /// Applies the fields present in `settings` on top of `self`.
    pub fn apply(mut self, settings: &ValidationSettings) -> Result<Self, ConfigError> {
        if let Some(size) = settings.sample_size {
            self = self.with_sample_size(size)?;
        }
        if let Some(skip) = settings.skip_validations {
            self.skip_validations = skip;
        }
        if let Some(seed) = settings.seed {
            self.random = RandomSource::seeded(seed);
        }
        Ok(self)
    }

    pub fn from_settings(settings: &ValidationSettings) -> Result<Self, ConfigError> {
        Self::new().apply(settings)
    }

    /// Loads a JSON (`.json`) or YAML (`.yaml`/`.yml`) settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = ValidationSettings::from_value(path, load_value(path)?)?;
        Self::from_settings(&settings)
    }

    /// Loads `base` and overlays `custom` when that file exists.
    pub fn load_with_customization(base: &Path, custom: &Path) -> Result<Self, ConfigError> {
        let mut value = load_value(base)?;
        if custom.exists() {
            merge_values(&mut value, load_value(custom)?);
        } else {
            debug!("No customization at {}, using base configuration", custom.display());
        }
        let settings = ValidationSettings::from_value(base, value)?;
        Self::from_settings(&settings)
    }

    /// Applies `TYPECLASS_LAWS_*` environment variables.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, keyed like the environment.
    pub fn with_overrides_from(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let invalid = |key: &str, value: &str| ConfigError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
        };

        let mut settings = ValidationSettings::default();

        if let Some(raw) = lookup(ENV_SAMPLE_SIZE) {
            let size = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(ENV_SAMPLE_SIZE, &raw))?;
            settings.sample_size = Some(size);
        }
        if let Some(raw) = lookup(ENV_SKIP_VALIDATIONS) {
            let skip = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(invalid(ENV_SKIP_VALIDATIONS, &raw)),
            };
            settings.skip_validations = Some(skip);
        }
        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|_| invalid(ENV_SEED, &raw))?;
            settings.seed = Some(seed);
        }

        self.apply(&settings)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The serializable face of [`ValidationConfig`]; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub sample_size: Option<f64>,
    pub skip_validations: Option<bool>,
    /// Seeds a reproducible random source.
    pub seed: Option<u64>,
}

impl ValidationSettings {
    fn from_value(path: &Path, value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

pub fn normalize_sample_size(value: f64) -> Result<usize, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteSampleSize(value));
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeSampleSize(value));
    }

    let size = value.trunc() as usize;
    if size < MIN_SAMPLE_SIZE {
        return Err(ConfigError::SampleSizeTooSmall {
            got: size,
            min: MIN_SAMPLE_SIZE,
        });
    }
    Ok(size)
}

fn load_value(path: &Path) -> Result<Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
        }
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Recursively overlays `overlay` onto `base`. Non-object values replace.
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_values(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}
