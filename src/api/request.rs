//
//  sonar-cli
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Building
//!
//! This module turns a validated option model into a concrete HTTP request:
//! method, resolved URL, query pairs and an optional body.
//!
//! ## Overview
//!
//! Option models expose their fields through [`Params`], an ordered map from
//! SonarQube parameter name to [`ParamValue`]. Unset fields never make it into
//! the map, so they are never sent and the server keeps its own defaults.
//!
//! | Method | [`BodyEncoding`] | Where params go |
//! |--------|------------------|-----------------|
//! | `GET` / `DELETE` / `HEAD` | any | query string |
//! | `POST` / `PUT` / `PATCH` | `Query` | query string |
//! | `POST` / `PUT` / `PATCH` | `Form` | `application/x-www-form-urlencoded` body |
//! | `POST` / `PUT` / `PATCH` | `Json` | JSON object body |
//!
//! Path placeholders (`api/v2/users-management/users/{id}`) are filled from
//! params of the same name, which are then removed from the query/body.
//!
//! ## Example
//!
//! ```rust
//! use reqwest::Method;
//! use sonar_cli::api::request::{BodyEncoding, Params, PreparedRequest};
//! use url::Url;
//!
//! let base = Url::parse("https://sonar.example.com/").unwrap();
//! let params = Params::new()
//!     .set("project", "my-project")
//!     .opt("ps", Some(50u32))
//!     .opt::<&str>("q", None);
//!
//! let request = PreparedRequest::build(
//!     &base,
//!     Method::GET,
//!     "api/projects/search",
//!     BodyEncoding::Form,
//!     params,
//! )
//! .unwrap();
//!
//! assert_eq!(request.url.as_str(), "https://sonar.example.com/api/projects/search");
//! assert_eq!(request.query.len(), 2);
//! ```

use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Map, Value};
use url::Url;

use super::validate::ValidationError;

/// How parameters of a write operation are carried on the wire.
///
/// Read operations (`GET`, `DELETE`, `HEAD`) always use the query string; the
/// encoding only matters for methods that can carry a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    /// Parameters go into the query string even for `POST`.
    Query,
    /// Parameters go into an `application/x-www-form-urlencoded` body.
    ///
    /// This is what the classic `api/*` web services expect.
    #[default]
    Form,
    /// Parameters are serialized as a flat JSON object (`api/v2/*`).
    Json,
}

/// A single parameter value.
///
/// Values are rendered to strings for query and form encoding. Lists are
/// comma-joined, which is how SonarQube accepts multi-valued parameters such
/// as `projects=a,b,c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Free text.
    Text(String),
    /// An integer (page numbers, day counts, ...).
    Int(i64),
    /// A boolean, rendered as `true` / `false`.
    Bool(bool),
    /// A list of strings, rendered comma-separated.
    List(Vec<String>),
}

impl ParamValue {
    /// Renders the value the way it appears on the wire.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(","),
        }
    }

    /// Returns `true` if the value has no content.
    ///
    /// Empty values are treated as "not set" and never stored in [`Params`].
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Int(_) | Self::Bool(_) => false,
        }
    }

    /// Compares the rendered value against `expected`.
    pub fn matches(&self, expected: &str) -> bool {
        match self {
            Self::Text(s) => s == expected,
            other => other.render() == expected,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Int(n) => Value::from(*n),
            Self::Bool(b) => Value::Bool(*b),
            Self::List(items) => Value::from(items.clone()),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[String]> for ParamValue {
    fn from(value: &[String]) -> Self {
        Self::List(value.to_vec())
    }
}

/// Ordered parameter map produced by an option model.
///
/// Insertion order is preserved so the generated query string is stable,
/// which keeps request matching in tests and server logs predictable.
///
/// # Example
///
/// ```rust
/// use sonar_cli::api::request::{ParamValue, Params};
///
/// let params = Params::new()
///     .set("name", "Sonar way")
///     .set("description", "")          // empty, skipped
///     .opt("isDefault", Some(true));
///
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("isDefault"), Some(&ParamValue::Bool(true)));
/// assert!(params.get("description").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(&'static str, ParamValue)>,
}

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value` unless the value is empty.
    ///
    /// Setting a name twice replaces the earlier value in place.
    pub fn set<V: Into<ParamValue>>(mut self, name: &'static str, value: V) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Sets `name` only when `value` is `Some` and non-empty.
    pub fn opt<V: Into<ParamValue>>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    /// Merges every entry of `other` into this map.
    pub fn extend(mut self, other: Params) -> Self {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
        self
    }

    fn insert(&mut self, name: &'static str, value: ParamValue) {
        if value.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Removes and returns a parameter.
    pub fn take(&mut self, name: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(n, _)| *n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of set parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    /// Renders every parameter to a `(name, value)` string pair.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(n, v)| ((*n).to_string(), v.render()))
            .collect()
    }

    /// Renders the parameters as a flat JSON object.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(n, v)| ((*n).to_string(), v.to_json()))
            .collect();
        Value::Object(map)
    }
}

/// Body of a prepared request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// Form-encoded pairs.
    Form(Vec<(String, String)>),
    /// JSON document.
    Json(Value),
}

/// A fully resolved request, ready to be handed to the transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL with path placeholders substituted.
    pub url: Url,
    /// Query pairs, in parameter order.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

impl PreparedRequest {
    /// Builds a request from a base URL, a path template and parameters.
    ///
    /// # Parameters
    ///
    /// * `base` - Server root, e.g. `https://sonar.example.com/`
    /// * `method` - HTTP method of the operation
    /// * `path` - Path template relative to the base, e.g. `api/projects/create`
    /// * `encoding` - Where write operations put their parameters
    /// * `params` - Validated parameters
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] if a `{placeholder}` in the path has
    /// no matching parameter.
    pub fn build(
        base: &Url,
        method: Method,
        path: &'static str,
        encoding: BodyEncoding,
        mut params: Params,
    ) -> Result<Self, ValidationError> {
        let mut segments = Vec::new();
        for segment in path.trim_start_matches('/').split('/') {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = params
                        .take(name)
                        .ok_or(ValidationError::Required { field: name })?;
                    segments.push(value.render());
                }
                None => segments.push(segment.to_string()),
            }
        }

        Ok(Self::assemble(method, join_segments(base, &segments), encoding, params))
    }

    /// Builds a request for an arbitrary path without placeholder handling.
    ///
    /// Used by raw passthrough requests where no option model exists, so the
    /// parameter names are only known at runtime.
    pub fn build_raw(base: &Url, method: Method, path: &str, pairs: Vec<(String, String)>) -> Self {
        let segments: Vec<String> = path
            .trim_start_matches('/')
            .split('/')
            .map(str::to_string)
            .collect();
        let url = join_segments(base, &segments);

        let carries_body = !matches!(method, Method::GET | Method::DELETE | Method::HEAD);
        let (query, body) = if carries_body && !pairs.is_empty() {
            (Vec::new(), RequestBody::Form(pairs))
        } else if carries_body {
            (Vec::new(), RequestBody::Empty)
        } else {
            (pairs, RequestBody::Empty)
        };

        Self {
            method,
            url,
            query,
            body,
        }
    }

    fn assemble(method: Method, url: Url, encoding: BodyEncoding, params: Params) -> Self {
        let carries_body = !matches!(method, Method::GET | Method::DELETE | Method::HEAD);
        let (query, body) = match (carries_body, encoding) {
            (false, _) | (true, BodyEncoding::Query) => (params.to_pairs(), RequestBody::Empty),
            (true, BodyEncoding::Form) if params.is_empty() => (Vec::new(), RequestBody::Empty),
            (true, BodyEncoding::Form) => (Vec::new(), RequestBody::Form(params.to_pairs())),
            (true, BodyEncoding::Json) => (Vec::new(), RequestBody::Json(params.to_json())),
        };

        Self {
            method,
            url,
            query,
            body,
        }
    }

    /// Converts the prepared request into a `reqwest` builder on `http`.
    pub fn into_builder(self, http: &Client) -> RequestBuilder {
        let mut request = http.request(self.method, self.url);
        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        match self.body {
            RequestBody::Empty => request,
            RequestBody::Form(pairs) => request.form(&pairs),
            RequestBody::Json(value) => request.json(&value),
        }
    }
}

/// Appends percent-encoded `segments` to the path of `base`.
fn join_segments(base: &Url, segments: &[String]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments.iter().filter(|s| !s.is_empty()));
    }
    url
}
