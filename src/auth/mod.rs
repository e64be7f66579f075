//
//  sonar-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module provides the credential strategies a [`SonarClient`] can use
//! when talking to a SonarQube server.
//!
//! ## Supported Authentication Methods
//!
//! - **Anonymous**: No credentials at all. Useful to check what an
//!   unauthenticated visitor can see.
//! - **Basic**: Username and password sent as HTTP Basic authentication.
//! - **Token**: A user, project analysis or global analysis token sent as a
//!   Bearer token.
//!
//! A credential is fixed for the lifetime of a client. To switch strategies,
//! build a new client; the old one stays usable and unchanged.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sonar_cli::api::SonarClient;
//! use sonar_cli::auth::AuthCredential;
//!
//! let admin = SonarClient::new("http://localhost:9000")?
//!     .with_auth(AuthCredential::basic("admin", "admin"));
//!
//! let bot = SonarClient::new("http://localhost:9000")?
//!     .with_auth(AuthCredential::token("squ_0123456789abcdef"));
//! # Ok::<(), sonar_cli::api::ApiError>(())
//! ```
//!
//! [`SonarClient`]: crate::api::SonarClient

use std::fmt;

use reqwest::RequestBuilder;

/// Credential strategy attached to every request of a client.
///
/// # Variants
///
/// - `Anonymous`: no `Authorization` header
/// - `Basic`: HTTP Basic authentication with username and password
/// - `Token`: `Authorization: Bearer <token>`
///
/// # Notes
///
/// - `Debug` output never contains the password or token.
/// - Older SonarQube releases also accept a token as the Basic username with
///   an empty password; use [`AuthCredential::basic`] for those.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthCredential {
    /// No credentials.
    #[default]
    Anonymous,
    /// HTTP Basic authentication.
    Basic {
        /// SonarQube login.
        username: String,
        /// Password for the login.
        password: String,
    },
    /// Bearer token authentication.
    Token {
        /// The token value (usually prefixed `squ_`, `sqa_` or `sqp_`).
        token: String,
    },
}

impl AuthCredential {
    /// Creates a Basic credential.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a Bearer token credential.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token {
            token: token.into(),
        }
    }

    /// Adds the appropriate `Authorization` header to `request`.
    ///
    /// Anonymous credentials leave the request untouched.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Anonymous => request,
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Token { token } => request.bearer_auth(token),
        }
    }

    /// Returns `true` for the anonymous strategy.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Short name of the strategy, for display.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Basic { .. } => "basic",
            Self::Token { .. } => "token",
        }
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Token { token } => f
                .debug_struct("Token")
                .field("token", &redact(token))
                .finish(),
        }
    }
}

/// Keeps the token prefix (`squ_`, `sqa_`, ...) and hides the rest.
fn redact(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{visible}***")
}
