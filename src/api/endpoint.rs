//
//  sonar-cli
//  api/endpoint.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Endpoint Definitions
//!
//! An [`Endpoint`] ties an option model to everything the shared pipeline
//! needs to know about one Web API operation: method, path, rule table,
//! pagination, body encoding and the decoded result type.
//!
//! Service modules implement this trait once per operation; the client never
//! special-cases individual operations.
//!
//! ## Example
//!
//! ```rust
//! use reqwest::Method;
//! use serde::Deserialize;
//! use sonar_cli::api::endpoint::Endpoint;
//! use sonar_cli::api::request::Params;
//! use sonar_cli::api::validate::{Check, FieldRule};
//!
//! #[derive(Debug, Default)]
//! struct ShowGate {
//!     name: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct Gate {
//!     name: String,
//! }
//!
//! impl Endpoint for ShowGate {
//!     type Output = Gate;
//!     const METHOD: Method = Method::GET;
//!     const PATH: &'static str = "api/qualitygates/show";
//!     const RULES: &'static [FieldRule] = &[FieldRule::new("name", &[Check::Required])];
//!
//!     fn params(&self) -> Params {
//!         Params::new().set("name", &self.name)
//!     }
//! }
//! ```

use reqwest::Method;
use serde::de::DeserializeOwned;

use super::common::PAGINATION_RULES;
use super::request::{BodyEncoding, Params};
use super::validate::{has_required, validate_params, FieldRule, ValidationError};

/// Result type for operations that answer with no meaningful body.
///
/// Accepts any JSON the server might still send (`{}` for example) without
/// failing to decode.
pub type NoContent = serde::de::IgnoredAny;

/// One Web API operation.
pub trait Endpoint {
    /// Decoded result of a successful call.
    type Output: DeserializeOwned;

    /// HTTP method.
    const METHOD: Method;

    /// Path relative to the server root; may contain `{placeholders}`.
    const PATH: &'static str;

    /// Declarative field constraints.
    const RULES: &'static [FieldRule] = &[];

    /// Whether the option model embeds [`PaginationArgs`](super::common::PaginationArgs).
    const PAGINATED: bool = false;

    /// Encoding for write operations.
    const ENCODING: BodyEncoding = BodyEncoding::Form;

    /// Whether a `404` still means the operation reached its goal.
    ///
    /// True for clear/revoke/dismiss style operations whose target being
    /// absent is the desired end state.
    const ABSENT_IS_SUCCESS: bool = false;

    /// Exposes the option model as wire parameters.
    fn params(&self) -> Params;
}

/// Validates an optional option model and returns its parameters.
///
/// A missing model is rejected only when the operation has a required field;
/// otherwise it behaves like an empty model.
///
/// # Errors
///
/// Returns [`ValidationError::MissingOptions`] for a missing model on an
/// operation with required fields, or the first rule violation.
pub fn prepare<E: Endpoint>(options: Option<&E>) -> Result<Params, ValidationError> {
    let params = match options {
        Some(options) => options.params(),
        None if has_required(E::RULES) => return Err(ValidationError::MissingOptions),
        None => Params::new(),
    };

    validate_params(&params, E::RULES)?;
    if E::PAGINATED {
        validate_params(&params, PAGINATION_RULES)?;
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::PaginationArgs;
    use crate::api::validate::Check;

    #[derive(Debug, Default)]
    struct Search {
        q: Option<String>,
        pagination: PaginationArgs,
    }

    impl Endpoint for Search {
        type Output = NoContent;
        const METHOD: Method = Method::GET;
        const PATH: &'static str = "api/things/search";
        const RULES: &'static [FieldRule] = &[FieldRule::new("q", &[Check::MaxLen(3)])];
        const PAGINATED: bool = true;

        fn params(&self) -> Params {
            Params::new()
                .opt("q", self.q.as_deref())
                .extend(self.pagination.params())
        }
    }

    #[derive(Debug, Default)]
    struct Create {
        name: String,
    }

    impl Endpoint for Create {
        type Output = NoContent;
        const METHOD: Method = Method::POST;
        const PATH: &'static str = "api/things/create";
        const RULES: &'static [FieldRule] = &[FieldRule::new("name", &[Check::Required])];

        fn params(&self) -> Params {
            Params::new().set("name", &self.name)
        }
    }

    #[test]
    fn test_missing_options_rejected_when_required_fields_exist() {
        assert_eq!(prepare::<Create>(None), Err(ValidationError::MissingOptions));
    }

    #[test]
    fn test_missing_options_allowed_without_required_fields() {
        assert_eq!(prepare::<Search>(None), Ok(Params::new()));
    }

    #[test]
    fn test_empty_model_reports_field() {
        let err = prepare(Some(&Create::default())).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "name" });
    }

    #[test]
    fn test_pagination_rules_applied() {
        let ok = Search {
            pagination: PaginationArgs::new(1, 500),
            ..Default::default()
        };
        assert!(prepare(Some(&ok)).is_ok());

        let too_big = Search {
            pagination: PaginationArgs::new(1, 1000),
            ..Default::default()
        };
        assert_eq!(prepare(Some(&too_big)).unwrap_err().field(), Some("ps"));
    }
}
