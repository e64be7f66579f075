//
//  sonar-cli
//  api/services/user_tokens.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Personal access tokens (`api/user_tokens`).
//!
//! # Token Types
//!
//! | Type | Scope | Extra field |
//! |------|-------|-------------|
//! | `USER_TOKEN` | Everything the user may do | - |
//! | `GLOBAL_ANALYSIS_TOKEN` | Run analyses on any project | - |
//! | `PROJECT_ANALYSIS_TOKEN` | Run analyses on one project | `projectKey` (required) |
//!
//! The token value is only returned once, by `generate`.
//!
//! # Example
//!
//! ```rust,no_run
//! use sonar_cli::api::SonarClient;
//! use sonar_cli::api::services::user_tokens::GenerateTokenOptions;
//! use sonar_cli::auth::AuthCredential;
//!
//! # async fn example(admin: SonarClient) -> Result<(), sonar_cli::api::ApiError> {
//! let options = GenerateTokenOptions {
//!     name: "ci".to_string(),
//!     ..Default::default()
//! };
//! let generated = admin.user_tokens().generate(&options).await?;
//! if let Some(token) = generated.data {
//!     let ci = admin.clone().with_auth(AuthCredential::token(token.token));
//!     assert!(ci.authentication().validate().await?.data.is_some_and(|v| v.valid));
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, FixedOffset};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::sonar_datetime;
use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Accepted token types.
pub const TOKEN_TYPES: &[&str] = &["USER_TOKEN", "GLOBAL_ANALYSIS_TOKEN", "PROJECT_ANALYSIS_TOKEN"];

/// Options for `POST api/user_tokens/generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateTokenOptions {
    /// Token name, unique per user.
    pub name: String,
    /// Owner; defaults to the session user.
    pub login: Option<String>,
    /// One of [`TOKEN_TYPES`]; the server defaults to `USER_TOKEN`.
    pub token_type: Option<String>,
    /// Project the token is bound to, for project analysis tokens.
    pub project_key: Option<String>,
    /// Expiration date, `YYYY-MM-DD`.
    pub expiration_date: Option<String>,
}

impl Endpoint for GenerateTokenOptions {
    type Output = GeneratedToken;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/user_tokens/generate";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("name", &[Check::Required, Check::MaxLen(100)]),
        FieldRule::new("type", &[Check::OneOf(TOKEN_TYPES)]),
        FieldRule::new(
            "projectKey",
            &[Check::When {
                sibling: "type",
                equals: "PROJECT_ANALYSIS_TOKEN",
                then: &[Check::Required],
            }],
        ),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("name", &self.name)
            .opt("login", self.login.as_ref())
            .opt("type", self.token_type.as_ref())
            .opt("projectKey", self.project_key.as_ref())
            .opt("expirationDate", self.expiration_date.as_ref())
    }
}

/// Options for `POST api/user_tokens/revoke`.
///
/// Revoking a token that does not exist succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevokeTokenOptions {
    /// Token name.
    pub name: String,
    /// Owner; defaults to the session user.
    pub login: Option<String>,
}

impl Endpoint for RevokeTokenOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/user_tokens/revoke";
    const RULES: &'static [FieldRule] = &[FieldRule::new("name", &[Check::Required])];
    const ABSENT_IS_SUCCESS: bool = true;

    fn params(&self) -> Params {
        Params::new()
            .set("name", &self.name)
            .opt("login", self.login.as_ref())
    }
}

/// Options for `GET api/user_tokens/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTokensOptions {
    /// Owner; defaults to the session user.
    pub login: Option<String>,
}

impl Endpoint for SearchTokensOptions {
    type Output = TokenList;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/user_tokens/search";

    fn params(&self) -> Params {
        Params::new().opt("login", self.login.as_ref())
    }
}

/// Response of `api/user_tokens/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedToken {
    /// Owner login.
    pub login: String,
    /// Token name.
    pub name: String,
    /// The secret; never returned again.
    pub token: String,
    /// Token type.
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
    /// Bound project, for project analysis tokens.
    #[serde(default)]
    pub project_key: Option<String>,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "sonar_datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// Project a token is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenProject {
    /// Project key.
    pub key: String,
    /// Project name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A token as listed by `api/user_tokens/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserToken {
    /// Token name.
    pub name: String,
    /// Token type.
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
    /// Bound project, for project analysis tokens.
    #[serde(default)]
    pub project: Option<TokenProject>,
    /// Whether the expiration date has passed.
    #[serde(default)]
    pub is_expired: bool,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "sonar_datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Last time the token was used.
    #[serde(
        default,
        deserialize_with = "sonar_datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_connection_date: Option<DateTime<FixedOffset>>,
}

/// Response of `api/user_tokens/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    /// Owner login.
    pub login: String,
    /// Tokens of the user.
    #[serde(default)]
    pub user_tokens: Vec<UserToken>,
}

/// Handle for `api/user_tokens`.
#[derive(Debug, Clone, Copy)]
pub struct UserTokens<'a> {
    pub(crate) client: &'a SonarClient,
}

impl UserTokens<'_> {
    /// Generates a token and returns its secret.
    pub async fn generate<'o>(
        &self,
        options: impl Into<Option<&'o GenerateTokenOptions>>,
    ) -> Result<ApiResponse<GeneratedToken>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Revokes a token; an unknown token counts as revoked.
    pub async fn revoke<'o>(
        &self,
        options: impl Into<Option<&'o RevokeTokenOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Lists the tokens of a user.
    pub async fn search<'o>(
        &self,
        options: impl Into<Option<&'o SearchTokensOptions>>,
    ) -> Result<ApiResponse<TokenList>, ApiError> {
        self.client.execute(options.into()).await
    }
}
