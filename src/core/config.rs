//! Configuration file management.
//!
//! Handles reading `~/.envop.toml` and merging it with command-line flags.
//!
//! ```toml
//! [connect]
//! host = "http://localhost:8080"
//! token = "..."
//!
//! [defaults]
//! vault = "Engineering"
//! ```
//!
//! A flag (or its environment variable, which clap folds into the flag)
//! always wins over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of `~/.envop.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How to reach the item store.
    pub connect: ConnectConfig,
    /// Fallbacks for per-command flags.
    pub defaults: Defaults,
}

/// The `[connect]` table.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ConnectConfig {
    pub host: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for ConnectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectConfig")
            .field("host", &self.host)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The `[defaults]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub vault: Option<String>,
}

/// Store connection settings after merging flags and file.
#[derive(Debug)]
pub struct Connection {
    pub host: String,
    pub token: Zeroizing<String>,
}

impl Config {
    /// Default location: `~/.envop.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHome` if the home directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home.join(constants::CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// With `path`, that file must exist. Without it the default location is
    /// used, and a missing file there yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Ok(p) => (p, false),
                Err(_) => {
                    debug!("no home directory, using empty config");
                    return Ok(Self::default());
                }
            },
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Merge the store host and token with the flag values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingHost` or `ConfigError::MissingToken` when
    /// neither the flag nor the file provides a value.
    pub fn connection(&self, host: Option<&str>, token: Option<&str>) -> Result<Connection> {
        let host = pick(host, self.connect.host.as_deref()).ok_or(ConfigError::MissingHost)?;
        let token = pick(token, self.connect.token.as_deref()).ok_or(ConfigError::MissingToken)?;
        Ok(Connection {
            host,
            token: Zeroizing::new(token),
        })
    }

    /// Merge the vault title with the flag value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVault` when no vault is given anywhere.
    pub fn vault(&self, flag: Option<&str>) -> Result<String> {
        pick(flag, self.defaults.vault.as_deref()).ok_or_else(|| ConfigError::MissingVault.into())
    }
}

fn pick(flag: Option<&str>, file: Option<&str>) -> Option<String> {
    flag.or(file)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
