//
//  sonar-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module manages the `sq` configuration file: which SonarQube servers
//! are known, which one is the default, and the transport settings used when
//! building a [`SonarClient`](crate::api::SonarClient).
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/sq/config.toml`
//! - **macOS**: `~/Library/Application Support/sq/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\sq\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! timeout_secs = 30
//! default_host = "work"
//!
//! [hosts.work]
//! url = "https://sonar.example.com"
//! token = "squ_0123456789abcdef"
//!
//! [hosts.local]
//! url = "http://localhost:9000"
//! user = "admin"
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `SONAR_HOST_URL` | server URL |
//! | `SONAR_TOKEN` | token of the selected host |
//! | `SONAR_USER` / `SONAR_PASSWORD` | Basic credentials |
//!
//! Command-line flags win over the environment, which wins over the file.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`hosts`]: URL normalization and connection resolution

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::ClientOptions;

/// Global configuration container for the `sq` CLI.
///
/// # Examples
///
/// ```rust
/// use sonar_cli::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.core.timeout_secs, 30);
/// assert!(config.hosts.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Settings that apply to every host.
    #[serde(default)]
    pub core: CoreConfig,

    /// Known servers, keyed by a short name chosen by the user.
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

/// Settings that apply to every host.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `timeout_secs` | `30` (`0` disables the timeout) |
/// | `default_host` | `None` (the only configured host, if there is one) |
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoreConfig {
    /// Request timeout in seconds; `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the host used when `--host` is not given.
    #[serde(default)]
    pub default_host: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            default_host: None,
        }
    }
}

/// One SonarQube server.
///
/// # Notes
///
/// - `url` is stored normalized; see [`normalize_url`]
/// - A `token` takes precedence over `user` when both are set
/// - Passwords are never stored; supply them through `SONAR_PASSWORD`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// Server root, e.g. `https://sonar.example.com`.
    #[serde(default)]
    pub url: String,

    /// Login for Basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// User token for Bearer authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    ///
    /// `SQ_CONFIG` overrides the platform location.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os("SQ_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the configuration of a named host.
    pub fn host_config(&self, name: &str) -> Option<&HostConfig> {
        self.hosts.get(name)
    }

    /// Picks the host to use.
    ///
    /// Order: the explicit `name`, then `core.default_host`, then the only
    /// configured host.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named or default host is unknown.
    pub fn resolve_host(&self, name: Option<&str>) -> Result<Option<(&str, &HostConfig)>> {
        let wanted = name.or(self.core.default_host.as_deref());
        match wanted {
            Some(wanted) => self
                .hosts
                .get_key_value(wanted)
                .map(|(k, v)| Some((k.as_str(), v)))
                .ok_or_else(|| anyhow::anyhow!("Unknown host '{wanted}'; add it with `sq config set`")),
            None if self.hosts.len() == 1 => Ok(self.hosts.iter().next().map(|(k, v)| (k.as_str(), v))),
            None => Ok(None),
        }
    }

    /// Transport settings derived from `[core]`.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: (self.core.timeout_secs > 0).then(|| Duration::from_secs(self.core.timeout_secs)),
            ..Default::default()
        }
    }

    /// Gets a configuration value by key.
    ///
    /// # Supported Keys
    ///
    /// | Key | Field |
    /// |-----|-------|
    /// | `timeout_secs` | `core.timeout_secs` |
    /// | `default_host` | `core.default_host` |
    /// | `hosts.<name>.url` | `hosts[name].url` |
    /// | `hosts.<name>.user` | `hosts[name].user` |
    /// | `hosts.<name>.token` | `hosts[name].token` |
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sonar_cli::config::Config;
    ///
    /// let mut config = Config::default();
    /// assert_eq!(config.get("timeout_secs"), Some("30".to_string()));
    /// assert_eq!(config.get("default_host"), None);
    ///
    /// assert!(config.set("hosts.work.url", "https://sonar.example.com/".to_string()));
    /// assert_eq!(
    ///     config.get("hosts.work.url"),
    ///     Some("https://sonar.example.com".to_string())
    /// );
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "timeout_secs" => Some(self.core.timeout_secs.to_string()),
            "default_host" => self.core.default_host.clone(),
            _ => {
                let (name, field) = split_host_key(key)?;
                let host = self.hosts.get(name)?;
                match field {
                    "url" => Some(host.url.clone()),
                    "user" => host.user.clone(),
                    "token" => host.token.clone(),
                    _ => None,
                }
            }
        }
    }

    /// Sets a configuration value by key; see [`Config::get`] for keys.
    ///
    /// Setting a field of an unknown host creates the host.
    ///
    /// # Returns
    ///
    /// `false` if the key is unknown or the value does not fit the field.
    ///
    /// # Notes
    ///
    /// Changes are only persisted when [`Config::save`] is called.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "timeout_secs" => match value.trim().parse() {
                Ok(secs) => {
                    self.core.timeout_secs = secs;
                    true
                }
                Err(_) => false,
            },
            "default_host" => {
                self.core.default_host = Some(value);
                true
            }
            _ => {
                let Some((name, field)) = split_host_key(key) else {
                    return false;
                };
                if !matches!(field, "url" | "user" | "token") {
                    return false;
                }
                let host = self.hosts.entry(name.to_string()).or_default();
                match field {
                    "url" => host.url = normalize_url(&value),
                    "user" => host.user = Some(value),
                    _ => host.token = Some(value),
                }
                true
            }
        }
    }
}

/// Splits `hosts.<name>.<field>`; host names may not contain dots.
fn split_host_key(key: &str) -> Option<(&str, &str)> {
    let rest = key.strip_prefix("hosts.")?;
    let (name, field) = rest.split_once('.')?;
    (!name.is_empty()).then_some((name, field))
}
