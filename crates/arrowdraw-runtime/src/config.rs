#![forbid(unsafe_code)]

//! Recalculation configuration.
//!
//! # Loading
//!
//! With the `config` feature, [`RecalcConfig`] loads from TOML or JSON:
//!
//! ```toml
//! # arrowdraw.toml
//! search = "pruned"
//! default_color = "black"
//! head_px = 10.0
//!
//! [resolver]
//! inset_px = 10.0
//! angle_mode = "single_quadrant"
//! ```
//!
//! ```rust,ignore
//! let config = RecalcConfig::from_toml_file("arrowdraw.toml")?;
//! let config = RecalcConfig::from_json_str(json)?;
//! ```
//!
//! Missing fields take their defaults, so an empty file yields
//! `RecalcConfig::default()`. Loaded configs are validated before they are
//! returned.

#[cfg(feature = "config")]
use std::path::Path;

use arrowdraw_core::{
    AngleMode, ArrowPipeline, DEFAULT_COLOR, ResolverConfig, SearchStrategy,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::DEFAULT_HEAD_PX;

/// Settings for a [`ReactiveRecalculator`](crate::ReactiveRecalculator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecalcConfig {
    /// Inset and angle derivation.
    pub resolver: ResolverConfig,
    /// Closest-point search strategy.
    pub search: SearchStrategy,
    /// Color for arrows that declare none.
    pub default_color: String,
    /// Arrowhead size in pixels.
    pub head_px: f64,
}

impl Default for RecalcConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            search: SearchStrategy::default(),
            default_color: DEFAULT_COLOR.to_string(),
            head_px: DEFAULT_HEAD_PX,
        }
    }
}

impl RecalcConfig {
    /// Set the closest-point search strategy.
    #[must_use]
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    /// Set the angle derivation.
    #[must_use]
    pub fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.resolver.angle_mode = mode;
        self
    }

    /// Set the gap between the head and the target's border.
    #[must_use]
    pub fn with_inset(mut self, inset_px: f64) -> Self {
        self.resolver.inset_px = inset_px;
        self
    }

    /// Set the fallback color.
    #[must_use]
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// Set the arrowhead size.
    #[must_use]
    pub fn with_head_size(mut self, head_px: f64) -> Self {
        self.head_px = head_px;
        self
    }

    /// Build the per-arrow pipeline these settings describe.
    #[must_use]
    pub fn pipeline(&self) -> ArrowPipeline {
        ArrowPipeline::new(self.search, self.resolver, self.default_color.clone())
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.resolver.inset_px.is_finite() || self.resolver.inset_px < 0.0 {
            errors.push(format!(
                "resolver.inset_px must be finite and >= 0, got {}",
                self.resolver.inset_px
            ));
        }
        if !self.head_px.is_finite() || self.head_px < 0.0 {
            errors.push(format!(
                "head_px must be finite and >= 0, got {}",
                self.head_px
            ));
        }
        if self.default_color.trim().is_empty() {
            errors.push("default_color must not be empty".into());
        }

        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)?.validated()
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
        serde_json::from_str::<Self>(s)?.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, choosing the format by extension (`.toml` or
    /// anything else as JSON).
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            _ => Self::from_json_file(path),
        }
    }
}

/// Errors from loading a [`RecalcConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RecalcConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.head_px, 10.0);
        assert_eq!(config.default_color, "black");
        assert_eq!(config.search, SearchStrategy::Pruned);
        assert_eq!(config.resolver.inset_px, 10.0);
    }

    #[test]
    fn builders_chain() {
        let config = RecalcConfig::default()
            .with_search(SearchStrategy::Exhaustive)
            .with_angle_mode(AngleMode::FourQuadrant)
            .with_inset(4.0)
            .with_default_color("gray")
            .with_head_size(6.0);
        assert_eq!(config.search, SearchStrategy::Exhaustive);
        assert_eq!(config.resolver.angle_mode, AngleMode::FourQuadrant);
        assert_eq!(config.resolver.inset_px, 4.0);
        assert_eq!(config.pipeline().default_color(), "gray");
        assert_eq!(config.head_px, 6.0);
    }

    #[test]
    fn validate_reports_every_problem() {
        let config = RecalcConfig::default()
            .with_inset(-1.0)
            .with_head_size(f64::NAN)
            .with_default_color("  ");
        let errors = config.validate();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("resolver.inset_px"));
        assert!(errors[1].starts_with("head_px"));
    }

    #[test]
    fn invalid_error_joins_messages() {
        let err = RecalcConfig::default()
            .with_head_size(-2.0)
            .validated()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: head_px must be finite and >= 0, got -2"
        );
    }
}
