//! Environment configuration for packhost
//!
//! Every setting the boundary layer honours comes from an environment
//! variable. Lookups go through [`EnvSource`] so parsing stays a pure
//! function of its input; [`ProcessEnv`] reads the real process environment
//! and a `HashMap` stands in for it in tests.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Controls deprecation advisories. `"false"` or `"0"` disables them.
pub const DEP_WARNINGS_ENV: &str = "PACKHOST_DEP_WARNINGS";

/// Console verbosity for the logger (0, 1 or 2).
pub const VERBOSE_ENV: &str = "PACKHOST_VERBOSE";

/// Optional path of the log file.
pub const LOG_FILE_ENV: &str = "PACKHOST_LOG_FILE";

/// Highest verbosity level the logger distinguishes.
pub const MAX_VERBOSITY: u8 = 2;

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Read access to a set of environment variables
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<&str, &str, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| (*v).to_string())
    }
}

/// Decide whether deprecation advisories are enabled for a raw variable value.
///
/// Only the literal values `"false"` and `"0"` disable advisories; an unset
/// variable or any other value leaves them on.
pub fn advisories_enabled_from(value: Option<&str>) -> bool {
    !matches!(value, Some("false" | "0"))
}

/// Read the advisory switch from the process environment
pub fn advisories_enabled_from_env() -> bool {
    advisories_enabled_from(ProcessEnv.var(DEP_WARNINGS_ENV).as_deref())
}

/// Snapshot of every environment setting used by the boundary layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub dep_warnings: bool,
    pub verbosity: u8,
    pub log_file: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            dep_warnings: true,
            verbosity: 0,
            log_file: None,
        }
    }
}

impl HostConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_source(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let dep_warnings = advisories_enabled_from(source.var(DEP_WARNINGS_ENV).as_deref());
        let verbosity = match source.var(VERBOSE_ENV) {
            Some(raw) => parse_verbosity(&raw)?,
            None => 0,
        };
        let log_file = source
            .var(LOG_FILE_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|trimmed| !trimmed.is_empty())
            .map(PathBuf::from);

        let config = HostConfig {
            dep_warnings,
            verbosity,
            log_file,
        };
        debug!(?config, "loaded host configuration");
        Ok(config)
    }
}

fn parse_verbosity(raw: &str) -> Result<u8, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let level: u8 = trimmed.parse().map_err(|e| ConfigError::InvalidValue {
        key: VERBOSE_ENV,
        value: raw.to_string(),
        reason: format!("{}", e),
    })?;
    if level > MAX_VERBOSITY {
        return Err(ConfigError::InvalidValue {
            key: VERBOSE_ENV,
            value: raw.to_string(),
            reason: format!("expected a level between 0 and {}", MAX_VERBOSITY),
        });
    }
    Ok(level)
}
