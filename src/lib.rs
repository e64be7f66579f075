//
//  sonar-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # SonarQube CLI Library
//!
//! A typed async client for the SonarQube Web API, and the library behind
//! the `sq` command-line tool.
//!
//! ## Overview
//!
//! Every Web API operation is modelled by an options struct whose fields are
//! checked against a declarative rule table before anything is sent. Valid
//! options become a form or query request, get the session credential
//! attached, and the answer is classified into a decoded result or a typed
//! error.
//!
//! ## Features
//!
//! - **Local validation**: Required fields, length limits, ranges and enum
//!   values rejected before a request is made
//! - **One session, many services**: `client.projects()`, `client.user_tokens()`,
//!   `client.qualitygates()` and more share one connection pool and credential
//! - **Typed errors**: Validation, HTTP status, transport and decode failures
//!   are distinct variants
//! - **Scriptable CLI**: Table output for people, `--json` for tools
//!
//! ## Module Structure
//!
//! - [`api`]: Session, request pipeline and service groups
//! - [`auth`]: Credential strategies (anonymous, Basic, Bearer token)
//! - [`config`]: Configuration file and connection resolution
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sonar_cli::api::services::projects::SearchProjectsOptions;
//! use sonar_cli::api::SonarClient;
//! use sonar_cli::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), sonar_cli::api::ApiError> {
//! let client = SonarClient::new("https://sonar.example.com")?
//!     .with_auth(AuthCredential::token("squ_0123456789abcdef"));
//!
//! let options = SearchProjectsOptions {
//!     q: Some("payments".to_string()),
//!     ..Default::default()
//! };
//! if let Some(result) = client.projects().search(&options).await?.data {
//!     for project in result.components {
//!         println!("{} {}", project.key, project.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the `sq` commands, arguments and subcommands defined using the
/// clap derive API.
pub mod cli;

/// SonarQube Web API client.
///
/// Validation, request building, authentication, transport and response
/// classification, plus one module per web service.
pub mod api;

/// Authentication strategies.
pub mod auth;

/// Configuration management.
///
/// Handles loading and saving of `~/.config/sq/config.toml` and resolving
/// which server and credential a command uses.
pub mod config;

/// Output formatting utilities.
pub mod output;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use sonar_cli::Cli;
///
/// let cli = Cli::parse();
/// // Handle cli.command...
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use sonar_cli::Config;
///
/// let config = Config::load().expect("Failed to load config");
/// if let Some(host) = config.get("default_host") {
///     println!("Default host: {}", host);
/// }
/// ```
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used in the user agent and configuration
/// paths.
///
/// # Value
///
/// `"sq"`
pub const APP_NAME: &str = "sq";

/// Application version constant, taken from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use sonar_cli::VERSION;
///
/// println!("sq version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes so scripts can tell failures apart.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: Server-side issues
///
/// # Example
///
/// ```rust
/// use sonar_cli::api::ApiError;
/// use sonar_cli::exit_codes;
///
/// let err = anyhow::Error::new(ApiError::InvalidUrl("ftp://x".to_string()));
/// assert_eq!(exit_codes::for_error(&err), exit_codes::USAGE);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;

    /// Successful execution.
    ///
    /// # Value
    ///
    /// `0`
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    ///
    /// # Value
    ///
    /// `1`
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// Also returned when options fail local validation, since nothing
    /// was sent to the server.
    ///
    /// # Value
    ///
    /// `2`
    pub const USAGE: i32 = 2;

    /// Authentication required or failed (`401`, `403`).
    ///
    /// # Value
    ///
    /// `4`
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found (`404`).
    ///
    /// # Value
    ///
    /// `8`
    pub const NOT_FOUND: i32 = 8;

    /// Server unavailable (`503`), e.g. while starting or migrating.
    ///
    /// # Value
    ///
    /// `32`
    pub const UNAVAILABLE: i32 = 32;

    /// Picks the exit code for an error returned by a command.
    ///
    /// Looks through the context chain for an [`ApiError`]; anything else
    /// is [`ERROR`].
    pub fn for_error(err: &anyhow::Error) -> i32 {
        let Some(api) = err.chain().find_map(|e| e.downcast_ref::<ApiError>()) else {
            return ERROR;
        };
        match api {
            ApiError::Validation(_) | ApiError::InvalidUrl(_) => USAGE,
            _ if api.is_unavailable() => UNAVAILABLE,
            _ if api.is_not_found() => NOT_FOUND,
            _ => match api.status().map(|s| s.as_u16()) {
                Some(401) | Some(403) => AUTH_ERROR,
                _ => ERROR,
            },
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::api::common::HttpError;
        use anyhow::Context;
        use reqwest::StatusCode;

        fn http(status: u16) -> anyhow::Error {
            let err: ApiError = HttpError::new(StatusCode::from_u16(status).unwrap(), "").into();
            Err::<(), _>(err).context("Request failed").unwrap_err()
        }

        #[test]
        fn test_status_mapping() {
            assert_eq!(for_error(&http(401)), AUTH_ERROR);
            assert_eq!(for_error(&http(403)), AUTH_ERROR);
            assert_eq!(for_error(&http(404)), NOT_FOUND);
            assert_eq!(for_error(&http(503)), UNAVAILABLE);
            assert_eq!(for_error(&http(400)), ERROR);
        }

        #[test]
        fn test_plain_errors() {
            assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
        }
    }
}
