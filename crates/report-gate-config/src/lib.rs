// crates/report-gate-config/src/lib.rs
// ============================================================================
// Module: Report Gate Config
// Description: File-level configuration model with strict loading guards.
// Purpose: Load and validate integration settings, fail closed on bad input.
// Dependencies: report-gate-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! This crate holds the canonical file-level configuration for the report
//! gate integration: the global retry threshold, the scrub-field set, the
//! parameter deny-list, and the framework label. Loading is strict and fail
//! closed: path, size, and encoding guards run before parsing, unknown fields
//! are rejected, and every absent field degrades to a documented default.
//! Invariants:
//! - An absent config file yields the documented defaults (threshold 0).
//! - Validation rejects negative thresholds and malformed field names.
//!
//! Config files are untrusted input; guards run before any parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use report_gate_core::HandlerSettings;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum config file size in bytes.
pub const MAX_CONFIG_BYTES: usize = 1_048_576;

/// Maximum config path length in bytes.
pub const MAX_CONFIG_PATH_LEN: usize = 4_096;

/// Maximum length of a single config path component in bytes.
pub const MAX_CONFIG_PATH_COMPONENT_LEN: usize = 255;

/// Maximum length of a configured field name in bytes.
pub const MAX_FIELD_NAME_LEN: usize = 255;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config path exceeds the maximum length.
    #[error("config path exceeds max length: {actual} > {max}")]
    PathTooLong {
        /// Actual path length in bytes.
        actual: usize,
        /// Maximum allowed path length in bytes.
        max: usize,
    },
    /// A config path component exceeds the maximum length.
    #[error("config path component too long: {0}")]
    PathComponentTooLong(String),
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file exceeds the size limit.
    #[error("config file exceeds size limit: {actual} > {max}")]
    TooLarge {
        /// Actual file size in bytes.
        actual: usize,
        /// Maximum allowed file size in bytes.
        max: usize,
    },
    /// Config file is not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// Config file failed TOML parsing.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Config contents failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default global retry threshold.
const fn default_threshold() -> i64 {
    0
}

/// Returns the default scrub-field set (common credential field names).
fn default_scrub_fields() -> BTreeSet<String> {
    [
        "access_token",
        "api_key",
        "passwd",
        "password",
        "password_confirmation",
        "secret",
        "secret_token",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Returns the default parameter deny-list (runtime bookkeeping fields).
fn default_param_denylist() -> BTreeSet<String> {
    ["backtrace", "error_backtrace", "error_message", "exception"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Returns the default framework label.
fn default_framework_label() -> String {
    "sidekiq".to_string()
}

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// File-level configuration for the report gate integration.
///
/// # Invariants
/// - `threshold` is non-negative after validation.
/// - Field-name sets contain non-empty, bounded entries after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ReportGateConfig {
    /// Global retry threshold; failures report once the effective retry count
    /// reaches it. Defaults to 0 (no threshold-based suppression).
    pub threshold: i64,
    /// Field names whose values are masked before submission.
    pub scrub_fields: BTreeSet<String>,
    /// Field names excluded from report parameters entirely.
    pub param_denylist: BTreeSet<String>,
    /// Fixed framework label prefixed to the runtime version tag.
    pub framework_label: String,
}

impl Default for ReportGateConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            scrub_fields: default_scrub_fields(),
            param_denylist: default_param_denylist(),
            framework_label: default_framework_label(),
        }
    }
}

impl ReportGateConfig {
    /// Loads configuration from an optional TOML file.
    ///
    /// A `None` path yields the documented defaults. Path, size, and encoding
    /// guards run before parsing; the parsed model is then validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a guard, the parse, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        check_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::TooLarge {
                actual: bytes.len(),
                max: MAX_CONFIG_BYTES,
            });
        }
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8)?;
        let config: Self =
            toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration contents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a negative threshold or a
    /// malformed field name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold < 0 {
            return Err(ConfigError::Invalid(format!(
                "threshold must be non-negative: {}",
                self.threshold
            )));
        }
        check_field_names("scrub_fields", &self.scrub_fields)?;
        check_field_names("param_denylist", &self.param_denylist)?;
        if self.framework_label.is_empty() {
            return Err(ConfigError::Invalid("framework_label must not be empty".to_string()));
        }
        Ok(())
    }

    /// Maps the file model onto core handler settings.
    ///
    /// The runtime version comes from the queue runtime at integration time,
    /// not from the config file.
    #[must_use]
    pub fn handler_settings(&self, runtime_version: impl Into<String>) -> HandlerSettings {
        HandlerSettings {
            threshold: self.threshold,
            scrub_fields: self.scrub_fields.clone(),
            param_denylist: self.param_denylist.clone(),
            framework_label: self.framework_label.clone(),
            runtime_version: runtime_version.into(),
        }
    }
}

// ============================================================================
// SECTION: Guards
// ============================================================================

/// Rejects over-long paths and path components before any file read.
fn check_path(path: &Path) -> Result<(), ConfigError> {
    let rendered = path.to_string_lossy();
    if rendered.len() > MAX_CONFIG_PATH_LEN {
        return Err(ConfigError::PathTooLong {
            actual: rendered.len(),
            max: MAX_CONFIG_PATH_LEN,
        });
    }
    for component in path.components() {
        let component = component.as_os_str().to_string_lossy();
        if component.len() > MAX_CONFIG_PATH_COMPONENT_LEN {
            return Err(ConfigError::PathComponentTooLong(component.into_owned()));
        }
    }
    Ok(())
}

/// Rejects empty or over-long field names in a configured set.
fn check_field_names(section: &str, names: &BTreeSet<String>) -> Result<(), ConfigError> {
    for name in names {
        if name.is_empty() {
            return Err(ConfigError::Invalid(format!("{section} entries must not be empty")));
        }
        if name.len() > MAX_FIELD_NAME_LEN {
            return Err(ConfigError::Invalid(format!(
                "{section} entry exceeds max length: {name}"
            )));
        }
    }
    Ok(())
}
