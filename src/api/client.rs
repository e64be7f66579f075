//
//  sonar-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the SonarQube Web API
//!
//! This module provides [`SonarClient`], the session every operation runs
//! through. A call walks the same pipeline regardless of the operation:
//!
//! 1. validate the option model against its rule table
//! 2. build method, path, query and body
//! 3. attach the session credential
//! 4. perform exactly one round trip
//! 5. decode the body or classify the failure
//!
//! ## Features
//!
//! - One pooled `reqwest::Client` per session, cheap to clone
//! - Streams use a second client without an overall timeout
//! - Immutable sessions: changing credentials builds a new value
//! - Configurable timeout and User-Agent
//! - No retries, no caching
//! - Streaming operations hand back the open body as an [`EventStream`]

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use url::Url;

use super::common::{classify, ApiError, ApiResponse, HttpError};
use super::endpoint::{prepare, Endpoint};
use super::request::PreparedRequest;
use super::stream::EventStream;
use crate::auth::AuthCredential;

/// Transport settings applied when a session is built.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sonar_cli::api::client::ClientOptions;
///
/// let options = ClientOptions {
///     timeout: Some(Duration::from_secs(10)),
///     ..Default::default()
/// };
/// assert!(options.user_agent.starts_with("sq/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Overall request timeout; `None` waits indefinitely.
    ///
    /// Streaming operations only use it as the connect timeout, so an open
    /// stream is never cut off by it.
    pub timeout: Option<Duration>,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("{}/{}", crate::APP_NAME, crate::VERSION),
        }
    }
}

/// The session used for every SonarQube Web API call.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use sonar_cli::api::SonarClient;
/// use sonar_cli::auth::AuthCredential;
///
/// let client = SonarClient::new("http://localhost:9000")?
///     .with_auth(AuthCredential::token("squ_0123456789abcdef"));
/// # Ok::<(), sonar_cli::api::ApiError>(())
/// ```
///
/// # Calling Operations
///
/// Service groups are reached through accessors such as
/// [`SonarClient::projects`]; each returns a short-lived handle borrowing the
/// session:
///
/// ```rust,no_run
/// use sonar_cli::api::SonarClient;
/// use sonar_cli::api::services::projects::CreateProjectOptions;
///
/// # async fn example(client: SonarClient) -> Result<(), sonar_cli::api::ApiError> {
/// let options = CreateProjectOptions {
///     name: "My Project".to_string(),
///     project: "my-project".to_string(),
///     ..Default::default()
/// };
/// let created = client.projects().create(&options).await?;
/// println!("{:?}", created.data);
/// # Ok(())
/// # }
/// ```
///
/// # Notes
///
/// - `Clone` shares the underlying connection pool.
/// - Concurrent calls on one session are independent of each other.
#[derive(Debug, Clone)]
pub struct SonarClient {
    /// The underlying HTTP client
    http: Client,
    /// Client for streaming operations; no overall timeout
    stream_http: Client,
    /// Server root, always ending with `/`
    base_url: Url,
    /// Credential attached to every request
    auth: AuthCredential,
}

impl SonarClient {
    /// Creates an anonymous session with default [`ClientOptions`].
    ///
    /// # Parameters
    ///
    /// * `base_url` - Server root, e.g. `https://sonar.example.com` or
    ///   `https://example.com/sonarqube` when served under a context path
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the URL does not parse or is not
    /// `http`/`https`, and [`ApiError::Transport`] if the HTTP client cannot
    /// be created.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Creates an anonymous session with explicit transport settings.
    ///
    /// # Errors
    ///
    /// Same as [`SonarClient::new`].
    pub fn with_options(base_url: &str, options: ClientOptions) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;

        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        let mut stream_builder = Client::builder().user_agent(options.user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
            stream_builder = stream_builder.connect_timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            stream_http: stream_builder.build()?,
            base_url,
            auth: AuthCredential::Anonymous,
        })
    }

    /// Returns a session using `auth` for every request.
    ///
    /// The connection pool and base URL carry over; `self` is consumed, so a
    /// session never changes credentials after it has been handed out.
    /// Clone first to keep the old credential around.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sonar_cli::api::SonarClient;
    /// use sonar_cli::auth::AuthCredential;
    ///
    /// let admin = SonarClient::new("http://localhost:9000")?
    ///     .with_auth(AuthCredential::basic("admin", "admin"));
    /// let bot = admin.clone().with_auth(AuthCredential::token("squ_abc"));
    /// assert_eq!(admin.auth().kind(), "basic");
    /// assert_eq!(bot.auth().kind(), "token");
    /// # Ok::<(), sonar_cli::api::ApiError>(())
    /// ```
    pub fn with_auth(self, auth: AuthCredential) -> Self {
        Self { auth, ..self }
    }

    /// Server root this session talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Credential attached to every request.
    pub fn auth(&self) -> &AuthCredential {
        &self.auth
    }

    /// Runs one operation through the full pipeline.
    ///
    /// # Type Parameters
    ///
    /// * `E` - The operation, carrying its path, rules and result type
    ///
    /// # Parameters
    ///
    /// * `options` - The option model; `None` is accepted only when the
    ///   operation has no required field
    ///
    /// # Returns
    ///
    /// The response status and the decoded body (`None` for empty bodies and
    /// for absent targets of idempotent operations).
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] before anything is sent
    /// - [`ApiError::Transport`] if the round trip fails
    /// - [`ApiError::Http`] for non-2xx answers
    /// - [`ApiError::Decode`] for 2xx bodies that do not match `E::Output`
    pub async fn execute<E: Endpoint>(
        &self,
        options: Option<&E>,
    ) -> Result<ApiResponse<E::Output>, ApiError> {
        let response = self.request::<E>(&self.http, options)?.send().await?;
        let (status, body) = read_body(response).await?;
        tracing::debug!("{} {} -> {} ({} bytes)", E::METHOD, E::PATH, status, body.len());

        classify(status, &body, E::ABSENT_IS_SUCCESS)
    }

    /// Runs a streaming operation and returns once the headers arrive.
    ///
    /// The body stays open inside the returned [`EventStream`] for as long
    /// as the caller keeps reading; dropping the stream closes the
    /// connection. The session timeout only bounds connecting.
    ///
    /// # Errors
    ///
    /// Same as [`SonarClient::execute`], except that success bodies are never
    /// decoded here.
    pub async fn stream<E: Endpoint>(&self, options: Option<&E>) -> Result<EventStream, ApiError> {
        let response = self
            .request::<E>(&self.stream_http, options)?
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        let status = response.status();
        tracing::debug!("{} {} -> {} (streaming)", E::METHOD, E::PATH, status);

        if !status.is_success() {
            let (status, body) = read_body(response).await?;
            return Err(HttpError::new(status, String::from_utf8_lossy(&body)).into());
        }

        Ok(EventStream::new(response))
    }

    /// Sends a request for an arbitrary path without an option model.
    ///
    /// Authentication, status classification and decoding behave exactly as
    /// in [`SonarClient::execute`]; only validation is skipped.
    ///
    /// # Parameters
    ///
    /// * `method` - HTTP method
    /// * `path` - Path relative to the server root, e.g. `api/server/version`
    /// * `params` - Query pairs for `GET`/`DELETE`, form body otherwise
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use reqwest::Method;
    /// use sonar_cli::api::SonarClient;
    ///
    /// # async fn example(client: SonarClient) -> Result<(), sonar_cli::api::ApiError> {
    /// let params = vec![("ps".to_string(), "5".to_string())];
    /// let response = client.raw(Method::GET, "api/languages/list", params).await?;
    /// println!("{}", response.data.unwrap_or_default());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn raw(
        &self,
        method: Method,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let prepared = PreparedRequest::build_raw(&self.base_url, method, path, params);
        tracing::debug!("{} {}", prepared.method, prepared.url);

        let request = self.auth.apply_to_request(prepared.into_builder(&self.http));
        let response = request.send().await?;
        let (status, body) = read_body(response).await?;
        tracing::debug!("-> {} ({} bytes)", status, body.len());

        if status.is_success() && !body.is_empty() && serde_json::from_slice::<Value>(&body).is_err() {
            // Plain text answers (api/system/ping) are wrapped instead of failing.
            return Ok(ApiResponse {
                status,
                data: Some(Value::String(String::from_utf8_lossy(&body).into_owned())),
            });
        }

        classify(status, &body, false)
    }

    /// Validates, builds and authenticates; shared by both call styles.
    fn request<E: Endpoint>(
        &self,
        http: &Client,
        options: Option<&E>,
    ) -> Result<RequestBuilder, ApiError> {
        let params = prepare(options)?;
        let prepared =
            PreparedRequest::build(&self.base_url, E::METHOD, E::PATH, E::ENCODING, params)?;
        tracing::debug!("{} {}", prepared.method, prepared.url);

        Ok(self.auth.apply_to_request(prepared.into_builder(http)))
    }
}

/// Reads a whole body. An error status survives a failed read, with an
/// empty body.
async fn read_body(response: Response) -> Result<(StatusCode, Vec<u8>), ApiError> {
    let status = response.status();
    match response.bytes().await {
        Ok(body) => Ok((status, body.to_vec())),
        Err(e) if !status.is_success() => {
            tracing::warn!("Could not read the {} response body: {}", status, e);
            Ok((status, Vec::new()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Parses a server root and makes sure relative paths resolve beneath it.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{raw}: unsupported scheme '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{raw}: not a base URL")));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
