//
//  sonar-cli
//  api/services/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project management (`api/projects`).
//!
//! Projects are the top-level analysed components in SonarQube. Creating,
//! deleting and changing the visibility of a project requires the
//! "Administer System" or "Create Projects" permission.
//!
//! # Example
//!
//! ```rust,no_run
//! use sonar_cli::api::SonarClient;
//! use sonar_cli::api::services::projects::{CreateProjectOptions, SearchProjectsOptions};
//!
//! # async fn example(client: SonarClient) -> Result<(), sonar_cli::api::ApiError> {
//! let create = CreateProjectOptions {
//!     name: "Backend".to_string(),
//!     project: "backend".to_string(),
//!     visibility: Some("private".to_string()),
//!     ..Default::default()
//! };
//! client.projects().create(&create).await?;
//!
//! let search = SearchProjectsOptions {
//!     projects: vec!["backend".to_string()],
//!     ..Default::default()
//! };
//! let found = client.projects().search(&search).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, FixedOffset};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::sonar_datetime;
use crate::api::common::{ApiError, ApiResponse, PaginationArgs, Paging};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Accepted project visibilities.
pub const VISIBILITIES: &[&str] = &["private", "public"];

/// Component qualifiers accepted by the project search.
///
/// `TRK` is a project, `VW` a portfolio and `APP` an application.
pub const QUALIFIERS: &[&str] = &["TRK", "VW", "APP"];

/// Options for `POST api/projects/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProjectOptions {
    /// Display name.
    pub name: String,
    /// Project key.
    pub project: String,
    /// `private` or `public`; server default applies when unset.
    pub visibility: Option<String>,
    /// Name of the main branch.
    pub main_branch: Option<String>,
}

impl Endpoint for CreateProjectOptions {
    type Output = CreatedProject;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/projects/create";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("name", &[Check::Required, Check::MaxLen(500)]),
        FieldRule::new("project", &[Check::Required, Check::MaxLen(400)]),
        FieldRule::new("visibility", &[Check::OneOf(VISIBILITIES)]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("name", &self.name)
            .set("project", &self.project)
            .opt("visibility", self.visibility.as_ref())
            .opt("mainBranch", self.main_branch.as_ref())
    }
}

/// Options for `GET api/projects/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchProjectsOptions {
    /// Partial match on key or name.
    pub q: Option<String>,
    /// Restrict to these component qualifiers.
    pub qualifiers: Vec<String>,
    /// Restrict to these project keys.
    pub projects: Vec<String>,
    /// Only projects never analysed.
    pub on_provisioned_only: Option<bool>,
    /// Page selection.
    pub pagination: PaginationArgs,
}

impl Endpoint for SearchProjectsOptions {
    type Output = ProjectSearchResult;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/projects/search";
    const RULES: &'static [FieldRule] = &[FieldRule::new("qualifiers", &[Check::OneOf(QUALIFIERS)])];
    const PAGINATED: bool = true;

    fn params(&self) -> Params {
        Params::new()
            .opt("q", self.q.as_ref())
            .set("qualifiers", &self.qualifiers[..])
            .set("projects", &self.projects[..])
            .opt("onProvisionedOnly", self.on_provisioned_only)
            .extend(self.pagination.params())
    }
}

/// Options for `POST api/projects/delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteProjectOptions {
    /// Project key.
    pub project: String,
}

impl Endpoint for DeleteProjectOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/projects/delete";
    const RULES: &'static [FieldRule] = &[FieldRule::new("project", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("project", &self.project)
    }
}

/// Options for `POST api/projects/bulk_delete`.
///
/// The server requires at least one filter; leaving all of them empty is
/// rejected with a 400.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteProjectsOptions {
    /// Project keys to delete.
    pub projects: Vec<String>,
    /// Partial match on key or name.
    pub q: Option<String>,
    /// Only projects last analysed before this date (`YYYY-MM-DD`).
    pub analyzed_before: Option<String>,
    /// Restrict to these component qualifiers.
    pub qualifiers: Vec<String>,
}

impl Endpoint for BulkDeleteProjectsOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/projects/bulk_delete";
    const RULES: &'static [FieldRule] = &[FieldRule::new("qualifiers", &[Check::OneOf(QUALIFIERS)])];

    fn params(&self) -> Params {
        Params::new()
            .set("projects", &self.projects[..])
            .opt("q", self.q.as_ref())
            .opt("analyzedBefore", self.analyzed_before.as_ref())
            .set("qualifiers", &self.qualifiers[..])
    }
}

/// Options for `POST api/projects/update_key`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectKeyOptions {
    /// Current key.
    pub from: String,
    /// New key.
    pub to: String,
}

impl Endpoint for UpdateProjectKeyOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/projects/update_key";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("from", &[Check::Required]),
        FieldRule::new("to", &[Check::Required, Check::MaxLen(400)]),
    ];

    fn params(&self) -> Params {
        Params::new().set("from", &self.from).set("to", &self.to)
    }
}

/// Options for `POST api/projects/update_visibility`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateVisibilityOptions {
    /// Project key.
    pub project: String,
    /// `private` or `public`.
    pub visibility: String,
}

impl Endpoint for UpdateVisibilityOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/projects/update_visibility";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("project", &[Check::Required]),
        FieldRule::new("visibility", &[Check::Required, Check::OneOf(VISIBILITIES)]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("project", &self.project)
            .set("visibility", &self.visibility)
    }
}

/// A project or other top-level component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Component qualifier (`TRK`, `VW`, `APP`).
    #[serde(default)]
    pub qualifier: Option<String>,
    /// `private` or `public`.
    #[serde(default)]
    pub visibility: Option<String>,
    /// Date of the last analysis, if any.
    #[serde(
        default,
        deserialize_with = "sonar_datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_analysis_date: Option<DateTime<FixedOffset>>,
}

/// Response of `api/projects/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedProject {
    /// The new project.
    pub project: Project,
}

/// Response of `api/projects/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSearchResult {
    /// Position in the full result set.
    pub paging: Paging,
    /// Matching projects.
    #[serde(default)]
    pub components: Vec<Project>,
}

/// Handle for `api/projects`.
#[derive(Debug, Clone, Copy)]
pub struct Projects<'a> {
    pub(crate) client: &'a SonarClient,
}

impl Projects<'_> {
    /// Creates a project.
    pub async fn create<'o>(
        &self,
        options: impl Into<Option<&'o CreateProjectOptions>>,
    ) -> Result<ApiResponse<CreatedProject>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Searches projects; works without options.
    pub async fn search<'o>(
        &self,
        options: impl Into<Option<&'o SearchProjectsOptions>>,
    ) -> Result<ApiResponse<ProjectSearchResult>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Deletes a project and everything analysed for it.
    pub async fn delete<'o>(
        &self,
        options: impl Into<Option<&'o DeleteProjectOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Deletes every project matching the filters.
    pub async fn bulk_delete<'o>(
        &self,
        options: impl Into<Option<&'o BulkDeleteProjectsOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Changes a project key.
    pub async fn update_key<'o>(
        &self,
        options: impl Into<Option<&'o UpdateProjectKeyOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Switches a project between private and public.
    pub async fn update_visibility<'o>(
        &self,
        options: impl Into<Option<&'o UpdateVisibilityOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }
}
