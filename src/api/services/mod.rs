//
//  sonar-cli
//  api/services/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Service Groups
//!
//! One module per SonarQube web service. Every module follows the same shape:
//!
//! - option structs, each implementing [`Endpoint`](super::endpoint::Endpoint)
//!   with its path, rule table and result type
//! - result types deserialized from the server's JSON
//! - a handle (`Projects<'a>`, `UserTokens<'a>`, ...) borrowing the
//!   [`SonarClient`] and exposing one async method per operation
//!
//! Handles are obtained from accessors on the client:
//!
//! ```rust,no_run
//! use sonar_cli::api::SonarClient;
//!
//! # async fn example(client: SonarClient) -> Result<(), sonar_cli::api::ApiError> {
//! let status = client.system().status().await?;
//! let gates = client.qualitygates().list().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Operation methods take `impl Into<Option<&Options>>`, so both `&options`
//! and `None` are accepted. `None` fails validation for any operation that
//! has a required field.

use super::SonarClient;

pub mod alm_settings;
pub mod analysis_cache;
pub mod authentication;
pub mod hotspots;
pub mod new_code_periods;
pub mod project_branches;
pub mod project_links;
pub mod projects;
pub mod push;
pub mod qualitygates;
pub mod system;
pub mod user_tokens;
pub mod users;

impl SonarClient {
    /// `api/alm_settings`
    pub fn alm_settings(&self) -> alm_settings::AlmSettings<'_> {
        alm_settings::AlmSettings { client: self }
    }

    /// `api/analysis_cache`
    pub fn analysis_cache(&self) -> analysis_cache::AnalysisCache<'_> {
        analysis_cache::AnalysisCache { client: self }
    }

    /// `api/authentication`
    pub fn authentication(&self) -> authentication::Authentication<'_> {
        authentication::Authentication { client: self }
    }

    /// `api/hotspots`
    pub fn hotspots(&self) -> hotspots::Hotspots<'_> {
        hotspots::Hotspots { client: self }
    }

    /// `api/new_code_periods`
    pub fn new_code_periods(&self) -> new_code_periods::NewCodePeriods<'_> {
        new_code_periods::NewCodePeriods { client: self }
    }

    /// `api/project_branches`
    pub fn project_branches(&self) -> project_branches::ProjectBranches<'_> {
        project_branches::ProjectBranches { client: self }
    }

    /// `api/project_links`
    pub fn project_links(&self) -> project_links::ProjectLinks<'_> {
        project_links::ProjectLinks { client: self }
    }

    /// `api/projects`
    pub fn projects(&self) -> projects::Projects<'_> {
        projects::Projects { client: self }
    }

    /// `api/push`
    pub fn push(&self) -> push::Push<'_> {
        push::Push { client: self }
    }

    /// `api/qualitygates`
    pub fn qualitygates(&self) -> qualitygates::QualityGates<'_> {
        qualitygates::QualityGates { client: self }
    }

    /// `api/system`
    pub fn system(&self) -> system::System<'_> {
        system::System { client: self }
    }

    /// `api/user_tokens`
    pub fn user_tokens(&self) -> user_tokens::UserTokens<'_> {
        user_tokens::UserTokens { client: self }
    }

    /// `api/users`
    pub fn users(&self) -> users::Users<'_> {
        users::Users { client: self }
    }
}

/// Serde helpers for SonarQube timestamps.
///
/// The classic web services emit `2024-01-15T10:20:30+0000` (no colon in the
/// offset), which is not RFC 3339; both forms are accepted.
pub(crate) mod sonar_datetime {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer};

    fn parse(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parses_both_offset_styles() {
            let a = parse("2024-01-15T10:20:30+0000").unwrap();
            let b = parse("2024-01-15T10:20:30+00:00").unwrap();
            assert_eq!(a, b);
            assert!(parse("yesterday").is_err());
        }
    }
}
