//
//  sonar-cli
//  api/validate.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Option Validation
//!
//! Every operation declares its constraints as a `const` table of
//! [`FieldRule`]s. A single interpreter, [`validate_params`], evaluates that
//! table against the [`Params`] produced by the option model before any
//! request is built.
//!
//! ## Rule Kinds
//!
//! | [`Check`] | Meaning |
//! |-----------|---------|
//! | `Required` | The field must be present and non-empty |
//! | `MaxLen(n)` | At most `n` characters (inclusive) |
//! | `Range { min, max }` | Integer value within `min..=max` |
//! | `OneOf(&[..])` | Value must be a member of a fixed set |
//! | `When { sibling, equals, then }` | Apply `then` only if `sibling == equals` |
//!
//! ## Evaluation Order
//!
//! 1. Unconditional checks, table order. For each field `Required` runs first,
//!    so an empty value reports "missing" rather than "invalid format".
//! 2. Conditional (`When`) checks, table order, after every unconditional
//!    check has passed.
//!
//! The first failure is returned; validation never touches the network.
//!
//! ## Example
//!
//! ```rust
//! use sonar_cli::api::request::Params;
//! use sonar_cli::api::validate::{validate_params, Check, FieldRule, ValidationError};
//!
//! const RULES: &[FieldRule] = &[
//!     FieldRule::new("name", &[Check::Required, Check::MaxLen(5)]),
//!     FieldRule::new("visibility", &[Check::OneOf(&["private", "public"])]),
//! ];
//!
//! let ok = Params::new().set("name", "abcde");
//! assert!(validate_params(&ok, RULES).is_ok());
//!
//! let long = Params::new().set("name", "abcdef");
//! assert_eq!(
//!     validate_params(&long, RULES).unwrap_err().field(),
//!     Some("name")
//! );
//! ```

use thiserror::Error;

use super::request::{ParamValue, Params};

/// A single constraint on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Field must be set.
    Required,
    /// Maximum length in characters, inclusive.
    MaxLen(usize),
    /// Inclusive integer range.
    Range {
        /// Lowest accepted value.
        min: i64,
        /// Highest accepted value.
        max: i64,
    },
    /// Allowed values, compared case-sensitively.
    OneOf(&'static [&'static str]),
    /// Checks applied only when `sibling` currently equals `equals`.
    ///
    /// A `Required` inside `then` reports [`ValidationError::RequiredWhen`].
    /// Nested `When` checks inside `then` are ignored.
    When {
        /// Name of the controlling field.
        sibling: &'static str,
        /// Value of the controlling field that activates `then`.
        equals: &'static str,
        /// Checks to apply to this field.
        then: &'static [Check],
    },
}

/// Constraints attached to one field of an option model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Wire name of the field.
    pub field: &'static str,
    /// Checks, in evaluation order.
    pub checks: &'static [Check],
}

impl FieldRule {
    /// Creates a rule; usable in `const` tables.
    pub const fn new(field: &'static str, checks: &'static [Check]) -> Self {
        Self { field, checks }
    }

    fn is_required(&self) -> bool {
        self.checks.iter().any(|c| matches!(c, Check::Required))
    }
}

/// Returns `true` if any rule unconditionally requires its field.
///
/// An operation with such a rule cannot be called without an option model.
pub fn has_required(rules: &[FieldRule]) -> bool {
    rules.iter().any(FieldRule::is_required)
}

/// Reason an option model was rejected before any request was sent.
///
/// Every variant except [`MissingOptions`](Self::MissingOptions) names the
/// offending field, available through [`field`](Self::field).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No option model was supplied for an operation with required fields.
    #[error("options are required")]
    MissingOptions,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required {
        /// Offending field.
        field: &'static str,
    },

    /// A field is required because a sibling holds a particular value.
    #[error("{field} is required when {sibling} is {equals}")]
    RequiredWhen {
        /// Offending field.
        field: &'static str,
        /// Controlling field.
        sibling: &'static str,
        /// Controlling value.
        equals: &'static str,
    },

    /// Text longer than the field allows.
    #[error("{field} must be at most {max} characters long (got {actual})")]
    TooLong {
        /// Offending field.
        field: &'static str,
        /// Maximum length.
        max: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Number outside the accepted range.
    #[error("{field} must be between {min} and {max} (got {actual})")]
    OutOfRange {
        /// Offending field.
        field: &'static str,
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
        /// Value supplied.
        actual: i64,
    },

    /// A numeric field holds something that is not an integer.
    #[error("{field} must be a number (got {value:?})")]
    NotANumber {
        /// Offending field.
        field: &'static str,
        /// Value supplied.
        value: String,
    },

    /// Value outside the allowed set.
    #[error("{field} must be one of [{}] (got {value:?})", .allowed.join(", "))]
    InvalidEnum {
        /// Offending field.
        field: &'static str,
        /// Allowed values.
        allowed: &'static [&'static str],
        /// Value supplied.
        value: String,
    },
}

impl ValidationError {
    /// Name of the field that failed, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingOptions => None,
            Self::Required { field }
            | Self::RequiredWhen { field, .. }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::NotANumber { field, .. }
            | Self::InvalidEnum { field, .. } => Some(*field),
        }
    }
}

/// Validates `params` against `rules`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, following the order
/// described in the module documentation.
pub fn validate_params(params: &Params, rules: &[FieldRule]) -> Result<(), ValidationError> {
    for rule in rules {
        let value = params.get(rule.field);
        if rule.is_required() && value.is_none() {
            return Err(ValidationError::Required { field: rule.field });
        }
        if let Some(value) = value {
            for check in rule.checks {
                apply(rule.field, check, value)?;
            }
        }
    }

    for rule in rules {
        for check in rule.checks {
            let Check::When {
                sibling,
                equals,
                then,
            } = *check
            else {
                continue;
            };
            if !params.get(sibling).is_some_and(|v| v.matches(equals)) {
                continue;
            }
            match params.get(rule.field) {
                None if then.contains(&Check::Required) => {
                    return Err(ValidationError::RequiredWhen {
                        field: rule.field,
                        sibling,
                        equals,
                    });
                }
                None => {}
                Some(value) => {
                    for inner in then {
                        apply(rule.field, inner, value)?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Applies a single value check. `Required` and `When` are handled by the
/// caller and pass here.
fn apply(field: &'static str, check: &Check, value: &ParamValue) -> Result<(), ValidationError> {
    match *check {
        Check::Required | Check::When { .. } => Ok(()),
        Check::MaxLen(max) => {
            let actual = match value {
                ParamValue::List(items) => items.iter().map(|i| i.chars().count()).max().unwrap_or(0),
                other => other.render().chars().count(),
            };
            if actual > max {
                Err(ValidationError::TooLong { field, max, actual })
            } else {
                Ok(())
            }
        }
        Check::Range { min, max } => {
            let actual = match value {
                ParamValue::Int(n) => *n,
                ParamValue::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                    ValidationError::NotANumber {
                        field,
                        value: s.clone(),
                    }
                })?,
                other => {
                    return Err(ValidationError::NotANumber {
                        field,
                        value: other.render(),
                    })
                }
            };
            if actual < min || actual > max {
                Err(ValidationError::OutOfRange {
                    field,
                    min,
                    max,
                    actual,
                })
            } else {
                Ok(())
            }
        }
        Check::OneOf(allowed) => {
            let invalid = match value {
                ParamValue::List(items) => items.iter().find(|i| !allowed.contains(&i.as_str())).cloned(),
                other => {
                    let rendered = other.render();
                    (!allowed.contains(&rendered.as_str())).then_some(rendered)
                }
            };
            match invalid {
                Some(value) => Err(ValidationError::InvalidEnum {
                    field,
                    allowed,
                    value,
                }),
                None => Ok(()),
            }
        }
    }
}
