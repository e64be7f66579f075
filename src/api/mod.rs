//
//  sonar-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides a typed client for the SonarQube Web API.
//!
//! ## Architecture
//!
//! Every operation runs through one shared pipeline:
//!
//! ```text
//! options ─▶ validate ─▶ build request ─▶ attach auth ─▶ send ─▶ decode / classify
//! ```
//!
//! - [`validate`]: Declarative rule tables and their interpreter
//! - [`request`]: Parameter maps, path substitution and body encoding
//! - [`endpoint`]: The [`Endpoint`](endpoint::Endpoint) trait tying an option model to an operation
//! - [`client`]: The [`SonarClient`] session and executor
//! - [`stream`]: Open response bodies of streaming operations
//! - [`common`]: Error taxonomy, response envelope and pagination
//! - [`services`]: One module per SonarQube web service
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sonar_cli::api::SonarClient;
//! use sonar_cli::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), sonar_cli::api::ApiError> {
//! let client = SonarClient::new("http://localhost:9000")?
//!     .with_auth(AuthCredential::token("squ_0123456789abcdef"));
//!
//! let validation = client.authentication().validate().await?;
//! println!("valid: {:?}", validation.data.map(|v| v.valid));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`ApiError`]:
//!
//! - `Validation`: options rejected locally; nothing was sent
//! - `Http`: the server answered with a non-2xx status (400, 401, 403, 404, 503, ...)
//! - `Transport`: the round trip failed
//! - `Decode`: a success body did not match the result type

/// The [`SonarClient`] session and executor.
pub mod client;

/// Error taxonomy, response envelope and pagination types.
pub mod common;

/// The per-operation [`Endpoint`](endpoint::Endpoint) trait.
pub mod endpoint;

/// Request parameters and encoding.
pub mod request;

/// Service groups (`api/projects`, `api/user_tokens`, ...).
pub mod services;

/// Streaming response bodies.
pub mod stream;

/// Declarative option validation.
pub mod validate;

/// Re-export of the session type.
pub use client::SonarClient;

/// Re-export of common API types.
///
/// - [`ApiError`]: Error type for API operations
/// - [`ApiResponse`]: Status plus decoded body
pub use common::{ApiError, ApiResponse};
