//! Runtime settings
//!
//! Settings come from command line flags first, then environment variables,
//! then built-in defaults.

use crate::store::{JsonStore, StoreError};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "MEDIA_MANAGER_DATA_DIR";
/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "MEDIA_MANAGER_LOG";

const DEFAULT_LOG_FILTER: &str = "media_manager=warn";
const VERBOSE_LOG_FILTER: &str = "media_manager=debug";

/// Errors that can occur while resolving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The log filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

/// Resolved application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where show documents live; `None` means the platform data directory
    pub data_dir: Option<PathBuf>,
    /// Tracing filter directive, e.g. `media_manager=debug`
    pub log_filter: String,
}

impl Settings {
    /// Resolves settings from the process environment
    pub fn from_env(cli_data_dir: Option<PathBuf>, verbose: bool) -> Self {
        Self::resolve(
            cli_data_dir,
            env::var_os(DATA_DIR_ENV),
            env::var(LOG_ENV).ok(),
            verbose,
        )
    }

    /// Applies precedence: command line, then environment, then defaults.
    ///
    /// `verbose` wins over the environment's log filter. Empty environment
    /// values are ignored.
    pub fn resolve(
        cli_data_dir: Option<PathBuf>,
        env_data_dir: Option<OsString>,
        env_log_filter: Option<String>,
        verbose: bool,
    ) -> Self {
        let data_dir = cli_data_dir.or_else(|| {
            env_data_dir
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        });

        let log_filter = if verbose {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            env_log_filter
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
        };

        Self {
            data_dir,
            log_filter,
        }
    }

    /// Builds the tracing filter for the configured directive
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| ConfigError::InvalidLogFilter {
            filter: self.log_filter.clone(),
            reason: e.to_string(),
        })
    }

    /// Opens the show store at the configured location
    pub fn open_store(&self) -> Result<JsonStore, StoreError> {
        match &self.data_dir {
            Some(dir) => JsonStore::open(dir),
            None => JsonStore::open_default(),
        }
    }
}
