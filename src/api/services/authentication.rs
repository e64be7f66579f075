//
//  sonar-cli
//  api/services/authentication.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Credential checks (`api/authentication`).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::SonarClient;

/// `GET api/authentication/validate`.
///
/// Takes no parameters; the answer describes the credential of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateCredentials;

impl Endpoint for ValidateCredentials {
    type Output = Validation;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/authentication/validate";

    fn params(&self) -> Params {
        Params::new()
    }
}

/// `POST api/authentication/logout`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logout;

impl Endpoint for Logout {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/authentication/logout";

    fn params(&self) -> Params {
        Params::new()
    }
}

/// Response of `api/authentication/validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Whether the session credential was accepted.
    pub valid: bool,
}

/// Handle for `api/authentication`.
#[derive(Debug, Clone, Copy)]
pub struct Authentication<'a> {
    pub(crate) client: &'a SonarClient,
}

impl Authentication<'_> {
    /// Checks the session credential.
    ///
    /// Invalid credentials are reported as `valid: false` with a 200; the
    /// call only fails when the server cannot be reached.
    pub async fn validate(&self) -> Result<ApiResponse<Validation>, ApiError> {
        self.client.execute::<ValidateCredentials>(None).await
    }

    /// Ends the server-side session of the credential.
    pub async fn logout(&self) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute::<Logout>(None).await
    }
}
