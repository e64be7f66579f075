//
//  sonar-cli
//  api/services/push.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server push (`api/push`).
//!
//! `sonarlint_events` keeps the connection open and sends server-sent events
//! whenever rules, issues or security hotspots of the watched projects
//! change. The client hands back the open body as an
//! [`EventStream`](crate::api::stream::EventStream).

use reqwest::Method;

use crate::api::common::ApiError;
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::stream::EventStream;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Options for `GET api/push/sonarlint_events`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SonarLintEventsOptions {
    /// Projects to watch.
    pub project_keys: Vec<String>,
    /// Languages to watch, e.g. `java`, `py`.
    pub languages: Vec<String>,
}

impl Endpoint for SonarLintEventsOptions {
    type Output = NoContent;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/push/sonarlint_events";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("projectKeys", &[Check::Required]),
        FieldRule::new("languages", &[Check::Required]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("projectKeys", &self.project_keys[..])
            .set("languages", &self.languages[..])
    }
}

/// Handle for `api/push`.
#[derive(Debug, Clone, Copy)]
pub struct Push<'a> {
    pub(crate) client: &'a SonarClient,
}

impl Push<'_> {
    /// Subscribes to SonarLint events; returns once the server accepts.
    pub async fn sonarlint_events<'o>(
        &self,
        options: impl Into<Option<&'o SonarLintEventsOptions>>,
    ) -> Result<EventStream, ApiError> {
        self.client.stream(options.into()).await
    }
}
