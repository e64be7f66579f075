//
//  sonar-cli
//  api/services/system.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server state (`api/system`).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::Endpoint;
use crate::api::request::Params;
use crate::api::SonarClient;

/// `GET api/system/status`; answered without authentication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status;

impl Endpoint for Status {
    type Output = SystemStatus;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/system/status";

    fn params(&self) -> Params {
        Params::new()
    }
}

/// `GET api/system/health`; needs an admin or the system passcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Health;

impl Endpoint for Health {
    type Output = SystemHealth;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/system/health";

    fn params(&self) -> Params {
        Params::new()
    }
}

/// Response of `api/system/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Server id.
    #[serde(default)]
    pub id: Option<String>,
    /// Server version.
    #[serde(default)]
    pub version: Option<String>,
    /// `UP`, `STARTING`, `DB_MIGRATION_NEEDED`, `DOWN`, ...
    pub status: String,
}

impl SystemStatus {
    /// Whether the server accepts requests.
    pub fn is_up(&self) -> bool {
        self.status == "UP"
    }
}

/// A reason the server is not green.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCause {
    /// Human readable cause.
    pub message: String,
}

/// Response of `api/system/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemHealth {
    /// `GREEN`, `YELLOW` or `RED`.
    pub health: String,
    /// Reasons for a non-green state.
    #[serde(default)]
    pub causes: Vec<HealthCause>,
}

/// Handle for `api/system`.
#[derive(Debug, Clone, Copy)]
pub struct System<'a> {
    pub(crate) client: &'a SonarClient,
}

impl System<'_> {
    /// Reports the server version and lifecycle state.
    pub async fn status(&self) -> Result<ApiResponse<SystemStatus>, ApiError> {
        self.client.execute::<Status>(None).await
    }

    /// Reports the health of every node.
    pub async fn health(&self) -> Result<ApiResponse<SystemHealth>, ApiError> {
        self.client.execute::<Health>(None).await
    }
}
