//
//  sonar-cli
//  api/services/analysis_cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Incremental analysis cache (`api/analysis_cache`).

use reqwest::Method;

use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::SonarClient;

/// Options for `POST api/analysis_cache/clear`.
///
/// Without options the cache of every project is cleared. Clearing an
/// already empty cache, or the cache of an unknown project, succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearCacheOptions {
    /// Restrict to one project.
    pub project: Option<String>,
    /// Restrict to one branch of `project`.
    pub branch: Option<String>,
}

impl Endpoint for ClearCacheOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/analysis_cache/clear";
    const ABSENT_IS_SUCCESS: bool = true;

    fn params(&self) -> Params {
        Params::new()
            .opt("project", self.project.as_ref())
            .opt("branch", self.branch.as_ref())
    }
}

/// Handle for `api/analysis_cache`.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisCache<'a> {
    pub(crate) client: &'a SonarClient,
}

impl AnalysisCache<'_> {
    /// Clears cached analysis data.
    pub async fn clear<'o>(
        &self,
        options: impl Into<Option<&'o ClearCacheOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }
}
