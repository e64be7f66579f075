//
//  sonar-cli
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Host Configuration Module
//!
//! Turns the configuration file, the environment and command-line flags into
//! the one server URL and credential a command talks to.
//!
//! ## Precedence
//!
//! | Setting | 1st | 2nd | 3rd | Fallback |
//! |---------|-----|-----|-----|----------|
//! | URL | `--url` | `SONAR_HOST_URL` | `hosts.<name>.url` | [`DEFAULT_URL`] |
//! | Credential | `--token` | `SONAR_TOKEN`, then `SONAR_USER`/`SONAR_PASSWORD` | `hosts.<name>.token`, then `user` | anonymous |
//!
//! ## Usage
//!
//! ```rust
//! use sonar_cli::config::{normalize_url, resolve_connection, Config, ConnectionOverrides};
//!
//! assert_eq!(normalize_url(" https://sonar.example.com// "), "https://sonar.example.com");
//!
//! let overrides = ConnectionOverrides {
//!     token: Some("squ_abc".to_string()),
//!     ..Default::default()
//! };
//! let connection = resolve_connection(&Config::default(), &overrides, |_| None)?;
//! assert_eq!(connection.url, "http://localhost:9000");
//! assert_eq!(connection.auth.kind(), "token");
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};

use super::Config;
use crate::api::client::ClientOptions;
use crate::api::SonarClient;
use crate::auth::AuthCredential;

/// Server used when nothing else is configured.
pub const DEFAULT_URL: &str = "http://localhost:9000";

/// Environment variable holding the server URL.
pub const ENV_HOST_URL: &str = "SONAR_HOST_URL";

/// Environment variable holding a token.
pub const ENV_TOKEN: &str = "SONAR_TOKEN";

/// Environment variable holding a Basic login.
pub const ENV_USER: &str = "SONAR_USER";

/// Environment variable holding a Basic password.
pub const ENV_PASSWORD: &str = "SONAR_PASSWORD";

/// Normalizes a server URL for storage and comparison.
///
/// Trims whitespace and trailing slashes and adds `https://` when no scheme
/// is given. The path is kept, so context paths such as `/sonarqube`
/// survive.
///
/// # Examples
///
/// ```rust
/// use sonar_cli::config::normalize_url;
///
/// assert_eq!(normalize_url("sonar.example.com/"), "https://sonar.example.com");
/// assert_eq!(normalize_url("http://localhost:9000"), "http://localhost:9000");
/// assert_eq!(
///     normalize_url("https://example.com/sonarqube/"),
///     "https://example.com/sonarqube"
/// );
/// ```
pub fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOverrides {
    /// `--host`: name of a configured host.
    pub host: Option<String>,
    /// `--url`: server URL.
    pub url: Option<String>,
    /// `--token`: token.
    pub token: Option<String>,
}

/// The server and credential a command will use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Name of the configured host, if one was used.
    pub host: Option<String>,
    /// Normalized server URL.
    pub url: String,
    /// Credential for every request.
    pub auth: AuthCredential,
}

impl Connection {
    /// Builds a session for this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a valid http(s) URL.
    pub fn client(&self, options: ClientOptions) -> Result<SonarClient> {
        let client = SonarClient::with_options(&self.url, options)
            .with_context(|| format!("Cannot connect to {}", self.url))?;
        Ok(client.with_auth(self.auth.clone()))
    }
}

/// Resolves the connection from flags, environment and configuration.
///
/// `env` looks up environment variables; pass `|k| std::env::var(k).ok()`
/// in production and a closure over fixed values in tests.
///
/// # Errors
///
/// Returns an error if `--host` or `core.default_host` names an unknown
/// host.
pub fn resolve_connection<F>(config: &Config, overrides: &ConnectionOverrides, env: F) -> Result<Connection>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
    let selected = config.resolve_host(overrides.host.as_deref())?;
    let host_config = selected.map(|(_, h)| h);

    let url = overrides
        .url
        .clone()
        .or_else(|| env(ENV_HOST_URL))
        .or_else(|| host_config.map(|h| h.url.clone()).filter(|u| !u.is_empty()))
        .map(|u| normalize_url(&u))
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let auth = if let Some(token) = overrides.token.clone().or_else(|| env(ENV_TOKEN)) {
        AuthCredential::token(token)
    } else if let Some(user) = env(ENV_USER) {
        AuthCredential::basic(user, env(ENV_PASSWORD).unwrap_or_default())
    } else if let Some(token) = host_config.and_then(|h| h.token.clone()) {
        AuthCredential::token(token)
    } else if let Some(user) = host_config.and_then(|h| h.user.clone()) {
        AuthCredential::basic(user, env(ENV_PASSWORD).unwrap_or_default())
    } else {
        AuthCredential::Anonymous
    };

    tracing::debug!("Using {} with {} credentials", url, auth.kind());
    Ok(Connection {
        host: selected.map(|(name, _)| name.to_string()),
        url,
        auth,
    })
}
