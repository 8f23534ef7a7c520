//! Engine configuration.
//!
//! [`MosaicConfig`] bounds the split percentages a resize may commit. It can be
//! built in code or, with the `config` feature, loaded from TOML or JSON:
//!
//! ```toml
//! # mosaic.toml
//! min_split_percentage = 20.0
//! max_split_percentage = 80.0
//! ```
//!
//! ```rust,ignore
//! let config = MosaicConfig::from_toml_file("mosaic.toml")?;
//! let engine = MosaicEngine::new(config)?;
//! ```
//!
//! Missing fields fall back to [`MosaicConfig::default`], which allows the
//! full `[0, 100]` range.

#[cfg(feature = "config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InvalidGesture};

/// Lowest split percentage a parent can store.
pub const MIN_SPLIT_PERCENTAGE: f64 = 0.0;

/// Highest split percentage a parent can store.
pub const MAX_SPLIT_PERCENTAGE: f64 = 100.0;

/// Tunable bounds for the restructure engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    /// Smallest share a resize may give the `first` child. Default: 0.
    pub min_split_percentage: f64,
    /// Largest share a resize may give the `first` child. Default: 100.
    pub max_split_percentage: f64,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            min_split_percentage: MIN_SPLIT_PERCENTAGE,
            max_split_percentage: MAX_SPLIT_PERCENTAGE,
        }
    }
}

impl MosaicConfig {
    /// Bounds that keep each child of a split at least `minimum` percent wide,
    /// i.e. `[minimum, 100 - minimum]`.
    #[must_use]
    pub fn with_minimum_pane_size(minimum: f64) -> Self {
        Self {
            min_split_percentage: minimum,
            max_split_percentage: MAX_SPLIT_PERCENTAGE - minimum,
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let range = MIN_SPLIT_PERCENTAGE..=MAX_SPLIT_PERCENTAGE;

        if !range.contains(&self.min_split_percentage) {
            errors.push(format!(
                "min_split_percentage must be in [0, 100], got {}",
                self.min_split_percentage
            ));
        }
        if !range.contains(&self.max_split_percentage) {
            errors.push(format!(
                "max_split_percentage must be in [0, 100], got {}",
                self.max_split_percentage
            ));
        }
        if self.min_split_percentage > self.max_split_percentage {
            errors.push(format!(
                "min_split_percentage ({}) must not exceed max_split_percentage ({})",
                self.min_split_percentage, self.max_split_percentage
            ));
        }

        errors
    }

    /// Validate, turning any findings into [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Clamp a requested split into this config's bounds.
    pub fn clamp_split(&self, value: f64) -> Result<f64, InvalidGesture> {
        clamp_split_percentage(value, self.min_split_percentage, self.max_split_percentage)
    }
}

/// Clamp `value` into `[min, max]`, rejecting non-finite input.
///
/// Out-of-range values are a correctable input, so they are logged and
/// clamped rather than failed.
pub(crate) fn clamp_split_percentage(value: f64, min: f64, max: f64) -> Result<f64, InvalidGesture> {
    if !value.is_finite() {
        return Err(InvalidGesture::NonFiniteSplit { value });
    }
    let clamped = value.max(min).min(max);
    if clamped != value {
        tracing::debug!(
            requested = value,
            stored = clamped,
            min,
            max,
            "split percentage clamped"
        );
    }
    Ok(clamped)
}
