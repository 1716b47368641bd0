//! core::config::schema
//!
//! Configuration file schema.
//!
//! The same schema is used at both scopes (global and repository); values
//! present in the repository file override the global file.
//!
//! # Validation
//!
//! Unknown keys are rejected at parse time. Values are checked after
//! parsing (e.g. at least one read attempt).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// prune_on_fetch = true
///
/// [read]
/// max_attempts = 3
/// retry_interval_ms = 500
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Pass `--prune` when fetching
    pub prune_on_fetch: Option<bool>,

    /// Status read behaviour
    pub read: Option<ReadSettings>,
}

impl Settings {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(read) = &self.read {
            read.validate()?;
        }
        Ok(())
    }
}

/// Retry behaviour of the status reader when the repository is locked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReadSettings {
    /// Total attempts, including the first (at least 1)
    pub max_attempts: Option<u32>,

    /// Pause between attempts, in milliseconds
    pub retry_interval_ms: Option<u64>,
}

impl ReadSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == Some(0) {
            return Err(ConfigError::InvalidValue(
                "read.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
