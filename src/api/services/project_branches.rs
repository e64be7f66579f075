//
//  sonar-cli
//  api/services/project_branches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch management (`api/project_branches`).
//!
//! Every project has exactly one main branch. The main branch is always
//! excluded from housekeeping and cannot be deleted; the server answers 400
//! when asked to.

use chrono::{DateTime, FixedOffset};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::sonar_datetime;
use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Options for `GET api/project_branches/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBranchesOptions {
    /// Project key.
    pub project: String,
}

impl Endpoint for ListBranchesOptions {
    type Output = BranchList;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/project_branches/list";
    const RULES: &'static [FieldRule] = &[FieldRule::new("project", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("project", &self.project)
    }
}

/// Options for `POST api/project_branches/delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteBranchOptions {
    /// Project key.
    pub project: String,
    /// Branch name.
    pub branch: String,
}

impl Endpoint for DeleteBranchOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/project_branches/delete";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("project", &[Check::Required]),
        FieldRule::new("branch", &[Check::Required]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("project", &self.project)
            .set("branch", &self.branch)
    }
}

/// Options for `POST api/project_branches/rename`.
///
/// Renames the main branch of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameBranchOptions {
    /// Project key.
    pub project: String,
    /// New name of the main branch.
    pub name: String,
}

impl Endpoint for RenameBranchOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/project_branches/rename";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("project", &[Check::Required]),
        FieldRule::new("name", &[Check::Required, Check::MaxLen(255)]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("project", &self.project)
            .set("name", &self.name)
    }
}

/// Options for `POST api/project_branches/set_automatic_deletion_protection`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionProtectionOptions {
    /// Project key.
    pub project: String,
    /// Branch name.
    pub branch: String,
    /// Whether the branch is protected from automatic deletion.
    pub value: bool,
}

impl Endpoint for DeletionProtectionOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/project_branches/set_automatic_deletion_protection";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("project", &[Check::Required]),
        FieldRule::new("branch", &[Check::Required]),
        FieldRule::new("value", &[Check::Required]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("project", &self.project)
            .set("branch", &self.branch)
            .set("value", self.value)
    }
}

/// Quality gate outcome attached to a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchStatus {
    /// `OK`, `ERROR` or absent when never analysed.
    #[serde(default)]
    pub quality_gate_status: Option<String>,
}

/// A project branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Branch name.
    pub name: String,
    /// Whether this is the main branch.
    #[serde(default)]
    pub is_main: bool,
    /// `BRANCH` (or `LONG`/`SHORT` on old servers).
    #[serde(default, rename = "type")]
    pub branch_type: Option<String>,
    /// Whether housekeeping skips this branch.
    #[serde(default)]
    pub excluded_from_purge: bool,
    /// Quality gate status.
    #[serde(default)]
    pub status: Option<BranchStatus>,
    /// Date of the last analysis.
    #[serde(
        default,
        deserialize_with = "sonar_datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_date: Option<DateTime<FixedOffset>>,
}

/// Response of `api/project_branches/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchList {
    /// Branches of the project, main branch included.
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl BranchList {
    /// The main branch, if the server reported one.
    pub fn main(&self) -> Option<&Branch> {
        self.branches.iter().find(|b| b.is_main)
    }
}

/// Handle for `api/project_branches`.
#[derive(Debug, Clone, Copy)]
pub struct ProjectBranches<'a> {
    pub(crate) client: &'a SonarClient,
}

impl ProjectBranches<'_> {
    /// Lists the branches of a project.
    pub async fn list<'o>(
        &self,
        options: impl Into<Option<&'o ListBranchesOptions>>,
    ) -> Result<ApiResponse<BranchList>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Deletes a non-main branch.
    pub async fn delete<'o>(
        &self,
        options: impl Into<Option<&'o DeleteBranchOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Renames the main branch.
    pub async fn rename<'o>(
        &self,
        options: impl Into<Option<&'o RenameBranchOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Protects a branch from (or exposes it to) automatic deletion.
    pub async fn set_automatic_deletion_protection<'o>(
        &self,
        options: impl Into<Option<&'o DeletionProtectionOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }
}
