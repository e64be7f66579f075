//
//  sonar-cli
//  api/services/project_links.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! External links shown on a project's home page (`api/project_links`).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Options for `POST api/project_links/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateLinkOptions {
    /// Project key.
    pub project_key: String,
    /// Link label.
    pub name: String,
    /// Link target.
    pub url: String,
}

impl Endpoint for CreateLinkOptions {
    type Output = CreatedLink;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/project_links/create";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("projectKey", &[Check::Required]),
        FieldRule::new("name", &[Check::Required, Check::MaxLen(128)]),
        FieldRule::new("url", &[Check::Required, Check::MaxLen(2048)]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("projectKey", &self.project_key)
            .set("name", &self.name)
            .set("url", &self.url)
    }
}

/// Options for `GET api/project_links/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLinksOptions {
    /// Project key.
    pub project_key: String,
}

impl Endpoint for SearchLinksOptions {
    type Output = LinkList;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/project_links/search";
    const RULES: &'static [FieldRule] = &[FieldRule::new("projectKey", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("projectKey", &self.project_key)
    }
}

/// Options for `POST api/project_links/delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteLinkOptions {
    /// Link id.
    pub id: String,
}

impl Endpoint for DeleteLinkOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/project_links/delete";
    const RULES: &'static [FieldRule] = &[FieldRule::new("id", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("id", &self.id)
    }
}

/// A project link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    /// Link id.
    pub id: String,
    /// Label; absent for built-in links.
    #[serde(default)]
    pub name: Option<String>,
    /// `homepage`, `ci`, `issue`, `scm` or `custom`.
    #[serde(default, rename = "type")]
    pub link_type: Option<String>,
    /// Target URL.
    pub url: String,
}

/// Response of `api/project_links/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedLink {
    /// The new link.
    pub link: ProjectLink,
}

/// Response of `api/project_links/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkList {
    /// Links of the project.
    #[serde(default)]
    pub links: Vec<ProjectLink>,
}

/// Handle for `api/project_links`.
#[derive(Debug, Clone, Copy)]
pub struct ProjectLinks<'a> {
    pub(crate) client: &'a SonarClient,
}

impl ProjectLinks<'_> {
    /// Adds a custom link to a project.
    pub async fn create<'o>(
        &self,
        options: impl Into<Option<&'o CreateLinkOptions>>,
    ) -> Result<ApiResponse<CreatedLink>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Lists the links of a project.
    pub async fn search<'o>(
        &self,
        options: impl Into<Option<&'o SearchLinksOptions>>,
    ) -> Result<ApiResponse<LinkList>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Deletes a custom link.
    pub async fn delete<'o>(
        &self,
        options: impl Into<Option<&'o DeleteLinkOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoint::prepare;

    #[test]
    fn test_url_length_boundary() {
        let base = "https://ci.example.com/";
        let mut options = CreateLinkOptions {
            project_key: "p1".to_string(),
            name: "CI".to_string(),
            url: format!("{base}{}", "x".repeat(2048 - base.len())),
        };
        assert!(prepare(Some(&options)).is_ok());

        options.url.push('x');
        assert_eq!(prepare(Some(&options)).unwrap_err().field(), Some("url"));
    }

    #[test]
    fn test_name_checked_before_url() {
        let options = CreateLinkOptions {
            project_key: "p1".to_string(),
            name: "n".repeat(129),
            url: String::new(),
        };
        assert_eq!(prepare(Some(&options)).unwrap_err().field(), Some("name"));
    }
}
