//
//  sonar-cli
//  api/services/new_code_periods.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! New code definitions (`api/new_code_periods`).
//!
//! The definition can be set globally, per project or per branch. What the
//! `value` field means depends on `type`:
//!
//! | Type | `value` |
//! |------|---------|
//! | `PREVIOUS_VERSION` | not used |
//! | `NUMBER_OF_DAYS` | required, integer in `1..=90` |
//! | `REFERENCE_BRANCH` | required, branch name |
//! | `SPECIFIC_ANALYSIS` | required, analysis key (branch level only) |

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Accepted new code definition types.
pub const PERIOD_TYPES: &[&str] = &[
    "SPECIFIC_ANALYSIS",
    "PREVIOUS_VERSION",
    "NUMBER_OF_DAYS",
    "REFERENCE_BRANCH",
];

/// Options for `POST api/new_code_periods/set`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetPeriodOptions {
    /// Project key; global setting when unset.
    pub project: Option<String>,
    /// Branch name; project setting when unset.
    pub branch: Option<String>,
    /// One of [`PERIOD_TYPES`].
    pub period_type: String,
    /// Type-dependent value.
    pub value: Option<String>,
}

impl Endpoint for SetPeriodOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/new_code_periods/set";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("type", &[Check::Required, Check::OneOf(PERIOD_TYPES)]),
        FieldRule::new(
            "value",
            &[
                Check::When {
                    sibling: "type",
                    equals: "NUMBER_OF_DAYS",
                    then: &[Check::Required, Check::Range { min: 1, max: 90 }],
                },
                Check::When {
                    sibling: "type",
                    equals: "REFERENCE_BRANCH",
                    then: &[Check::Required, Check::MaxLen(255)],
                },
                Check::When {
                    sibling: "type",
                    equals: "SPECIFIC_ANALYSIS",
                    then: &[Check::Required, Check::MaxLen(40)],
                },
            ],
        ),
    ];

    fn params(&self) -> Params {
        Params::new()
            .opt("project", self.project.as_ref())
            .opt("branch", self.branch.as_ref())
            .set("type", &self.period_type)
            .opt("value", self.value.as_ref())
    }
}

/// Scope selector shared by `show` and `unset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodScope {
    /// Project key; global setting when unset.
    pub project: Option<String>,
    /// Branch name; project setting when unset.
    pub branch: Option<String>,
}

impl PeriodScope {
    fn params(&self) -> Params {
        Params::new()
            .opt("project", self.project.as_ref())
            .opt("branch", self.branch.as_ref())
    }
}

/// Options for `GET api/new_code_periods/show`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowPeriodOptions {
    /// Setting to read.
    pub scope: PeriodScope,
}

impl Endpoint for ShowPeriodOptions {
    type Output = NewCodePeriod;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/new_code_periods/show";

    fn params(&self) -> Params {
        self.scope.params()
    }
}

/// Options for `POST api/new_code_periods/unset`.
///
/// Without options the global setting is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsetPeriodOptions {
    /// Setting to reset.
    pub scope: PeriodScope,
}

impl Endpoint for UnsetPeriodOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/new_code_periods/unset";

    fn params(&self) -> Params {
        self.scope.params()
    }
}

/// Options for `GET api/new_code_periods/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPeriodsOptions {
    /// Project key.
    pub project: String,
}

impl Endpoint for ListPeriodsOptions {
    type Output = PeriodList;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/new_code_periods/list";
    const RULES: &'static [FieldRule] = &[FieldRule::new("project", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("project", &self.project)
    }
}

/// A new code definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCodePeriod {
    /// Project key, absent for the global setting.
    #[serde(default)]
    pub project_key: Option<String>,
    /// Branch name, absent above branch level.
    #[serde(default)]
    pub branch_key: Option<String>,
    /// Definition type.
    #[serde(rename = "type")]
    pub period_type: String,
    /// Type-dependent value.
    #[serde(default)]
    pub value: Option<String>,
    /// Whether the setting is inherited from a wider scope.
    #[serde(default)]
    pub inherited: bool,
}

/// Response of `api/new_code_periods/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodList {
    /// One entry per branch.
    #[serde(default)]
    pub new_code_periods: Vec<NewCodePeriod>,
}

/// Handle for `api/new_code_periods`.
#[derive(Debug, Clone, Copy)]
pub struct NewCodePeriods<'a> {
    pub(crate) client: &'a SonarClient,
}

impl NewCodePeriods<'_> {
    /// Sets a new code definition.
    pub async fn set<'o>(
        &self,
        options: impl Into<Option<&'o SetPeriodOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Shows the effective definition for a scope.
    pub async fn show<'o>(
        &self,
        options: impl Into<Option<&'o ShowPeriodOptions>>,
    ) -> Result<ApiResponse<NewCodePeriod>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Resets a definition to the inherited one.
    pub async fn unset<'o>(
        &self,
        options: impl Into<Option<&'o UnsetPeriodOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Lists the definitions of every branch of a project.
    pub async fn list<'o>(
        &self,
        options: impl Into<Option<&'o ListPeriodsOptions>>,
    ) -> Result<ApiResponse<PeriodList>, ApiError> {
        self.client.execute(options.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoint::prepare;
    use crate::api::validate::ValidationError;

    fn set(period_type: &str, value: Option<&str>) -> SetPeriodOptions {
        SetPeriodOptions {
            project: Some("p1".to_string()),
            period_type: period_type.to_string(),
            value: value.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_previous_version_needs_no_value() {
        assert!(prepare(Some(&set("PREVIOUS_VERSION", None))).is_ok());
    }

    #[test]
    fn test_number_of_days_requires_number() {
        assert_eq!(
            prepare(Some(&set("NUMBER_OF_DAYS", None))),
            Err(ValidationError::RequiredWhen {
                field: "value",
                sibling: "type",
                equals: "NUMBER_OF_DAYS",
            })
        );
        assert!(matches!(
            prepare(Some(&set("NUMBER_OF_DAYS", Some("thirty")))),
            Err(ValidationError::NotANumber { field: "value", .. })
        ));
        assert!(matches!(
            prepare(Some(&set("NUMBER_OF_DAYS", Some("91")))),
            Err(ValidationError::OutOfRange { field: "value", .. })
        ));
        assert!(prepare(Some(&set("NUMBER_OF_DAYS", Some("30")))).is_ok());
    }

    #[test]
    fn test_reference_branch_takes_free_text() {
        assert!(prepare(Some(&set("REFERENCE_BRANCH", Some("develop")))).is_ok());
        assert_eq!(
            prepare(Some(&set("REFERENCE_BRANCH", None))).unwrap_err().field(),
            Some("value")
        );
    }

    #[test]
    fn test_type_checked_before_value() {
        let err = prepare(Some(&set("LAST_WEEK", Some("x")))).unwrap_err();
        assert_eq!(err.field(), Some("type"));
    }

    #[test]
    fn test_unset_allows_missing_options() {
        assert!(prepare::<UnsetPeriodOptions>(None).unwrap().is_empty());
        assert!(prepare::<ShowPeriodOptions>(None).is_ok());
        assert_eq!(
            prepare::<ListPeriodsOptions>(None),
            Err(ValidationError::MissingOptions)
        );
    }
}
