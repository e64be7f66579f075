//
//  sonar-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the SonarQube Web API
//!
//! This module provides the types shared by every operation: the error
//! taxonomy, the response envelope and the status classifier.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`HttpError`] - A completed round trip that ended with a non-2xx status
//! - [`ApiResponse`] - Status code plus the optionally decoded result
//! - Pagination types (re-exported from [`pagination`] submodule)
//!
//! # Error Taxonomy
//!
//! | Variant | Raised when | Response available |
//! |---------|-------------|--------------------|
//! | `Validation` | Options rejected before sending | No |
//! | `Http` | Server answered with a non-2xx status | Yes |
//! | `Transport` | The round trip could not complete | No |
//! | `Decode` | A 2xx body did not match the result type | Status only |
//! | `Stream` | An open event stream was malformed | No |
//!
//! # Example
//!
//! ```rust
//! use sonar_cli::api::common::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     match err {
//!         ApiError::Validation(_) => "rejected locally, nothing was sent",
//!         ApiError::Http(e) if e.status.as_u16() == 503 => "server busy, try later",
//!         ApiError::Http(_) => "rejected by the server",
//!         _ => "request failed",
//!     }
//! }
//! ```

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::validate::ValidationError;

mod pagination;

pub use pagination::*;

/// Unified error type for all SonarQube API operations.
///
/// # Notes
///
/// - `Transport` converts automatically from `reqwest::Error`
/// - `Validation` converts automatically from [`ValidationError`]
/// - Nothing is retried; every error reaches the caller unmodified
#[derive(Error, Debug)]
pub enum ApiError {
    /// Options were rejected before any request was built.
    #[error("Invalid options: {0}")]
    Validation(#[from] ValidationError),

    /// The server answered with a non-success status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request could not be completed (DNS, refused connection, timeout).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response body could not be decoded.
    #[error("Could not decode {status} response: {source}")]
    Decode {
        /// Status of the response whose body failed to decode.
        status: StatusCode,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// An open event stream carried bytes that are not valid server-sent
    /// events.
    #[error("Malformed event stream: {0}")]
    Stream(String),

    /// The configured server URL is unusable.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status associated with the error, when a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => Some(e.status),
            Self::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server's error response, if the failure came from one.
    pub fn response(&self) -> Option<&HttpError> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(e) => e.field(),
            _ => None,
        }
    }

    /// Checks whether the request was rejected before being sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Checks for a `404 Not Found` response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Checks for a `503 Service Unavailable` response.
    ///
    /// SonarQube answers 503 while it is still indexing; callers usually treat
    /// it as "skip and retry later". The client itself never retries.
    pub fn is_unavailable(&self) -> bool {
        self.status() == Some(StatusCode::SERVICE_UNAVAILABLE)
    }
}

/// A completed round trip that ended with a non-2xx status.
///
/// The status and raw body are preserved so callers can inspect them even on
/// the error path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("API error ({status}){}", format_messages(.messages))]
pub struct HttpError {
    /// Response status.
    pub status: StatusCode,
    /// Messages extracted from the server's error document.
    pub messages: Vec<String>,
    /// Raw response body.
    pub body: String,
}

impl HttpError {
    /// Builds an error from a status and raw body, extracting server messages.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let messages = parse_error_messages(&body);
        Self {
            status,
            messages,
            body,
        }
    }

    /// First server message, if any.
    pub fn message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }
}

fn format_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}

/// Extracts human readable messages from a SonarQube error body.
///
/// SonarQube's classic web services return errors as:
/// ```json
/// {"errors": [{"msg": "Human readable message"}]}
/// ```
///
/// The `api/v2` services return:
/// ```json
/// {"message": "Human readable message"}
/// ```
///
/// Anything else yields no messages; the raw body stays on the error.
pub fn parse_error_messages(body: &str) -> Vec<String> {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return Vec::new();
    };

    if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
        let messages: Vec<String> = errors
            .iter()
            .filter_map(|e| {
                e.get("msg")
                    .or_else(|| e.get("message"))
                    .and_then(|m| m.as_str())
            })
            .map(str::to_string)
            .collect();
        if !messages.is_empty() {
            return messages;
        }
    }

    json.get("message")
        .and_then(|m| m.as_str())
        .map(|m| vec![m.to_string()])
        .unwrap_or_default()
}

/// Status code plus the optionally decoded result of an operation.
///
/// `data` is `None` for `204 No Content`, for empty bodies, and for `404`
/// answers to operations whose absent target counts as success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response status.
    #[serde(with = "status_code")]
    pub status: StatusCode,

    /// Decoded body.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Consumes the envelope and returns the decoded body.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Checks whether the response carried no body.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

/// Maps a completed response onto the error taxonomy.
///
/// # Parameters
///
/// * `status` - Response status
/// * `body` - Raw response body
/// * `absent_is_success` - Whether `404` counts as success for this operation
///
/// # Errors
///
/// Returns [`ApiError::Http`] for non-2xx statuses and [`ApiError::Decode`] for
/// success bodies that do not match `T`.
pub fn classify<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    absent_is_success: bool,
) -> Result<ApiResponse<T>, ApiError> {
    if status == StatusCode::NOT_FOUND && absent_is_success {
        tracing::debug!("Treating 404 as success for idempotent operation");
        return Ok(ApiResponse { status, data: None });
    }

    if !status.is_success() {
        return Err(HttpError::new(status, String::from_utf8_lossy(body)).into());
    }

    Ok(ApiResponse {
        status,
        data: decode(status, body)?,
    })
}

/// Decodes a success body; empty bodies and `204` produce `None`.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<Option<T>, ApiError> {
    if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|source| ApiError::Decode { status, source })
}

mod status_code {
    use reqwest::StatusCode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(status.as_u16())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusCode, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code).map_err(serde::de::Error::custom)
    }
}
