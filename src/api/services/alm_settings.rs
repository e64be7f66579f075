//
//  sonar-cli
//  api/services/alm_settings.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! DevOps platform integrations (`api/alm_settings`).
//!
//! An ALM setting stores the credentials SonarQube uses to decorate pull
//! requests and import repositories. Only GitHub creation is exposed here;
//! listing and deletion cover every platform.

use std::fmt;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Options for `POST api/alm_settings/create_github`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CreateGithubOptions {
    /// Unique key of the setting.
    pub key: String,
    /// GitHub API URL, e.g. `https://api.github.com/`.
    pub url: String,
    /// GitHub App id.
    pub app_id: String,
    /// GitHub App client id.
    pub client_id: String,
    /// GitHub App client secret.
    pub client_secret: String,
    /// GitHub App private key (PEM).
    pub private_key: String,
    /// Webhook secret.
    pub webhook_secret: Option<String>,
}

impl fmt::Debug for CreateGithubOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateGithubOptions")
            .field("key", &self.key)
            .field("url", &self.url)
            .field("app_id", &self.app_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("private_key", &"***")
            .finish()
    }
}

impl Endpoint for CreateGithubOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/alm_settings/create_github";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("key", &[Check::Required, Check::MaxLen(200)]),
        FieldRule::new("url", &[Check::Required, Check::MaxLen(2000)]),
        FieldRule::new("appId", &[Check::Required, Check::MaxLen(80)]),
        FieldRule::new("clientId", &[Check::Required, Check::MaxLen(80)]),
        FieldRule::new("clientSecret", &[Check::Required, Check::MaxLen(160)]),
        FieldRule::new("privateKey", &[Check::Required, Check::MaxLen(2500)]),
        FieldRule::new("webhookSecret", &[Check::MaxLen(160)]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("key", &self.key)
            .set("url", &self.url)
            .set("appId", &self.app_id)
            .set("clientId", &self.client_id)
            .set("clientSecret", &self.client_secret)
            .set("privateKey", &self.private_key)
            .opt("webhookSecret", self.webhook_secret.as_ref())
    }
}

/// Options for `GET api/alm_settings/list_definitions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListDefinitions;

impl Endpoint for ListDefinitions {
    type Output = AlmDefinitions;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/alm_settings/list_definitions";

    fn params(&self) -> Params {
        Params::new()
    }
}

/// Options for `POST api/alm_settings/delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteAlmSettingOptions {
    /// Key of the setting.
    pub key: String,
}

impl Endpoint for DeleteAlmSettingOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/alm_settings/delete";
    const RULES: &'static [FieldRule] = &[FieldRule::new("key", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("key", &self.key)
    }
}

/// One configured integration. Secrets are never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlmDefinition {
    /// Key of the setting.
    pub key: String,
    /// Platform URL, when the platform has one.
    #[serde(default)]
    pub url: Option<String>,
    /// GitHub App id.
    #[serde(default)]
    pub app_id: Option<String>,
    /// GitHub App client id.
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Response of `api/alm_settings/list_definitions`, grouped by platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlmDefinitions {
    /// GitHub integrations.
    #[serde(default)]
    pub github: Vec<AlmDefinition>,
    /// GitLab integrations.
    #[serde(default)]
    pub gitlab: Vec<AlmDefinition>,
    /// Azure DevOps integrations.
    #[serde(default)]
    pub azure: Vec<AlmDefinition>,
    /// Bitbucket Server integrations.
    #[serde(default)]
    pub bitbucket: Vec<AlmDefinition>,
    /// Bitbucket Cloud integrations.
    #[serde(default)]
    pub bitbucketcloud: Vec<AlmDefinition>,
}

impl AlmDefinitions {
    /// Iterates every definition with its platform name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AlmDefinition)> {
        let groups: [(&'static str, &Vec<AlmDefinition>); 5] = [
            ("github", &self.github),
            ("gitlab", &self.gitlab),
            ("azure", &self.azure),
            ("bitbucket", &self.bitbucket),
            ("bitbucketcloud", &self.bitbucketcloud),
        ];
        groups
            .into_iter()
            .flat_map(|(alm, defs)| defs.iter().map(move |d| (alm, d)))
    }
}

/// Handle for `api/alm_settings`.
#[derive(Debug, Clone, Copy)]
pub struct AlmSettings<'a> {
    pub(crate) client: &'a SonarClient,
}

impl AlmSettings<'_> {
    /// Registers a GitHub App.
    pub async fn create_github<'o>(
        &self,
        options: impl Into<Option<&'o CreateGithubOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Lists every configured integration.
    pub async fn list_definitions(&self) -> Result<ApiResponse<AlmDefinitions>, ApiError> {
        self.client.execute::<ListDefinitions>(None).await
    }

    /// Deletes an integration.
    pub async fn delete<'o>(
        &self,
        options: impl Into<Option<&'o DeleteAlmSettingOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }
}
