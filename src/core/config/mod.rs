//! core::config
//!
//! Configuration loading.
//!
//! # Overview
//!
//! repolens has two configuration scopes, both using [`Settings`]:
//! - **Global**: user-level settings
//! - **Repo**: per-repository overrides
//!
//! # Precedence
//!
//! Later overrides earlier:
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! First one found:
//! 1. `$REPOLENS_CONFIG`
//! 2. `$XDG_CONFIG_HOME/repolens/config.toml`
//! 3. `~/.repolens/config.toml`
//!
//! # Repo Config Location
//!
//! `<work_dir>/.git/repolens/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use repolens::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! println!("prune on fetch: {}", config.prune_on_fetch());
//! ```

pub mod schema;

pub use schema::{ReadSettings, Settings};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Default number of status read attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between status read attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(500);

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global settings
    pub global: Settings,
    /// Repository settings (if a repo file was found)
    pub repo: Option<Settings>,
    /// Path the global file was loaded from
    global_path: Option<PathBuf>,
    /// Path the repo file was loaded from
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `work_dir` is provided, the repository file under it is loaded too.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. Missing files are not an error.
    pub fn load(work_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let candidates = Self::global_candidates(
            std::env::var_os("REPOLENS_CONFIG"),
            std::env::var_os("XDG_CONFIG_HOME"),
            dirs::home_dir(),
        );
        Self::load_from(&candidates, work_dir)
    }

    /// Load with an explicit list of global config candidates; the first
    /// existing one wins.
    fn load_from(candidates: &[PathBuf], work_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let global_path = candidates.iter().find(|p| p.exists()).cloned();
        let global = match &global_path {
            Some(path) => Self::read_settings(path)?,
            None => Settings::default(),
        };

        let repo_path = work_dir
            .map(Self::repo_config_path)
            .filter(|p| p.exists());
        let repo = repo_path.as_deref().map(Self::read_settings).transpose()?;

        tracing::debug!(
            global = ?global_path,
            repo = ?repo_path,
            "loaded configuration"
        );

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path,
        })
    }

    /// Global config paths in search order.
    fn global_candidates(
        explicit: Option<OsString>,
        xdg_config_home: Option<OsString>,
        home: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = explicit {
            candidates.push(PathBuf::from(path));
        }
        if let Some(xdg) = xdg_config_home {
            candidates.push(PathBuf::from(xdg).join("repolens/config.toml"));
        }
        if let Some(home) = home {
            candidates.push(home.join(".repolens/config.toml"));
        }
        candidates
    }

    /// Read, parse and validate one config file.
    fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: Settings =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Path of the repository config file for `work_dir`.
    pub fn repo_config_path(work_dir: &Path) -> PathBuf {
        work_dir.join(".git/repolens/config.toml")
    }

    /// First value of `pick` found in the repo file, then the global file.
    fn lookup<T>(&self, pick: impl Fn(&Settings) -> Option<T>) -> Option<T> {
        self.repo.as_ref().and_then(&pick).or_else(|| pick(&self.global))
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Whether fetch should prune deleted remote branches.
    ///
    /// Defaults to `false`.
    pub fn prune_on_fetch(&self) -> bool {
        self.lookup(|s| s.prune_on_fetch).unwrap_or(false)
    }

    /// Total status read attempts.
    ///
    /// Defaults to [`DEFAULT_MAX_ATTEMPTS`].
    pub fn max_read_attempts(&self) -> u32 {
        self.lookup(|s| s.read.as_ref().and_then(|r| r.max_attempts))
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Pause between status read attempts.
    ///
    /// Defaults to [`DEFAULT_RETRY_INTERVAL`].
    pub fn read_retry_interval(&self) -> Duration {
        self.lookup(|s| s.read.as_ref().and_then(|r| r.retry_interval_ms))
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RETRY_INTERVAL)
    }

    /// Path the global config was loaded from.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path the repo config was loaded from.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
