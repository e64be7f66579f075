//
//  sonar-cli
//  api/services/hotspots.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Security hotspots (`api/hotspots`).
//!
//! A hotspot is security-sensitive code that needs a human review. Reviewing
//! moves it from `TO_REVIEW` to `REVIEWED` with a resolution.

use chrono::{DateTime, FixedOffset};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::sonar_datetime;
use crate::api::common::{ApiError, ApiResponse, PaginationArgs, Paging};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Review states.
pub const STATUSES: &[&str] = &["TO_REVIEW", "REVIEWED"];

/// Resolutions of a reviewed hotspot.
pub const RESOLUTIONS: &[&str] = &["FIXED", "SAFE", "ACKNOWLEDGED"];

/// Options for `GET api/hotspots/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHotspotsOptions {
    /// Project key.
    pub project: String,
    /// Branch name; main branch when unset.
    pub branch: Option<String>,
    /// Review state filter.
    pub status: Option<String>,
    /// Resolution filter, only meaningful for reviewed hotspots.
    pub resolution: Option<String>,
    /// Restrict to these hotspot keys.
    pub hotspots: Vec<String>,
    /// Only hotspots introduced in the new code period.
    pub in_new_code_period: Option<bool>,
    /// Page selection.
    pub pagination: PaginationArgs,
}

impl Endpoint for SearchHotspotsOptions {
    type Output = HotspotSearchResult;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/hotspots/search";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("project", &[Check::Required]),
        FieldRule::new("status", &[Check::OneOf(STATUSES)]),
        FieldRule::new(
            "resolution",
            &[Check::When {
                sibling: "status",
                equals: "REVIEWED",
                then: &[Check::OneOf(RESOLUTIONS)],
            }],
        ),
    ];
    const PAGINATED: bool = true;

    fn params(&self) -> Params {
        Params::new()
            .set("project", &self.project)
            .opt("branch", self.branch.as_ref())
            .opt("status", self.status.as_ref())
            .opt("resolution", self.resolution.as_ref())
            .set("hotspots", &self.hotspots[..])
            .opt("inNewCodePeriod", self.in_new_code_period)
            .extend(self.pagination.params())
    }
}

/// Options for `POST api/hotspots/change_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeStatusOptions {
    /// Hotspot key.
    pub hotspot: String,
    /// New review state.
    pub status: String,
    /// Required when `status` is `REVIEWED`.
    pub resolution: Option<String>,
    /// Review comment.
    pub comment: Option<String>,
}

impl Endpoint for ChangeStatusOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/hotspots/change_status";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("hotspot", &[Check::Required]),
        FieldRule::new("status", &[Check::Required, Check::OneOf(STATUSES)]),
        FieldRule::new(
            "resolution",
            &[Check::When {
                sibling: "status",
                equals: "REVIEWED",
                then: &[Check::Required, Check::OneOf(RESOLUTIONS)],
            }],
        ),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("hotspot", &self.hotspot)
            .set("status", &self.status)
            .opt("resolution", self.resolution.as_ref())
            .opt("comment", self.comment.as_ref())
    }
}

/// A security hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Hotspot key.
    pub key: String,
    /// File component key.
    pub component: String,
    /// Project key.
    pub project: String,
    /// OWASP-style category, e.g. `sql-injection`.
    #[serde(default)]
    pub security_category: Option<String>,
    /// `HIGH`, `MEDIUM` or `LOW`.
    #[serde(default)]
    pub vulnerability_probability: Option<String>,
    /// Review state.
    pub status: String,
    /// Resolution, for reviewed hotspots.
    #[serde(default)]
    pub resolution: Option<String>,
    /// Line in the file.
    #[serde(default)]
    pub line: Option<u32>,
    /// Rule message.
    #[serde(default)]
    pub message: Option<String>,
    /// First detection.
    #[serde(
        default,
        deserialize_with = "sonar_datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<DateTime<FixedOffset>>,
}

/// Response of `api/hotspots/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotSearchResult {
    /// Position in the full result set.
    pub paging: Paging,
    /// Matching hotspots.
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

/// Handle for `api/hotspots`.
#[derive(Debug, Clone, Copy)]
pub struct Hotspots<'a> {
    pub(crate) client: &'a SonarClient,
}

impl Hotspots<'_> {
    /// Searches the hotspots of a project.
    pub async fn search<'o>(
        &self,
        options: impl Into<Option<&'o SearchHotspotsOptions>>,
    ) -> Result<ApiResponse<HotspotSearchResult>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Records a review decision.
    pub async fn change_status<'o>(
        &self,
        options: impl Into<Option<&'o ChangeStatusOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }
}
