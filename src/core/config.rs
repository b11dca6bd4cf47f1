//! Configuration file management.
//!
//! Handles reading and validating the optional user configuration file,
//! `<config dir>/lockbox/config.toml` unless `LOCKBOX_CONFIG` points
//! elsewhere. Command-line flags override every value read here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Session file used when `--file` is not given.
    pub file: Option<PathBuf>,
    /// Disable colored output.
    pub no_color: bool,
    /// Startup password attempts when the password is typed.
    pub password_attempts: u32,
    /// Indent `dump` output unless told otherwise.
    pub indent_dumps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            no_color: false,
            password_attempts: constants::DEFAULT_PASSWORD_ATTEMPTS,
            indent_dumps: true,
        }
    }
}

impl Config {
    /// Location of the configuration file, if one can be determined.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(constants::CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load the configuration from its default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::Invalid` if a value is out of range.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("config file absent, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config = Self::parse(&contents)?;

        debug!(
            file = config.file.is_some(),
            password_attempts = config.password_attempts,
            "config loaded"
        );

        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.password_attempts == 0 {
            return Err(ConfigError::Invalid("password_attempts must be at least 1".to_string()).into());
        }
        if let Some(file) = &self.file {
            if file.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("file must not be empty".to_string()).into());
            }
        }
        Ok(())
    }
}
