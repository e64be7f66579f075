//
//  sonar-cli
//  api/services/qualitygates.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Quality gates (`api/qualitygates`).
//!
//! A quality gate is a named set of conditions on metrics; a project passes
//! when none of its conditions is breached.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResponse};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Comparison operators accepted in a condition.
pub const OPERATORS: &[&str] = &["LT", "GT"];

/// Options for `POST api/qualitygates/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateGateOptions {
    /// Gate name.
    pub name: String,
}

impl Endpoint for CreateGateOptions {
    type Output = QualityGate;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/qualitygates/create";
    const RULES: &'static [FieldRule] = &[FieldRule::new("name", &[Check::Required, Check::MaxLen(100)])];

    fn params(&self) -> Params {
        Params::new().set("name", &self.name)
    }
}

/// `GET api/qualitygates/list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListGates;

impl Endpoint for ListGates {
    type Output = GateList;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/qualitygates/list";

    fn params(&self) -> Params {
        Params::new()
    }
}

/// Options for `GET api/qualitygates/show`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowGateOptions {
    /// Gate name.
    pub name: String,
}

impl Endpoint for ShowGateOptions {
    type Output = QualityGate;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/qualitygates/show";
    const RULES: &'static [FieldRule] = &[FieldRule::new("name", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("name", &self.name)
    }
}

/// Options for `POST api/qualitygates/destroy`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestroyGateOptions {
    /// Gate name.
    pub name: String,
}

impl Endpoint for DestroyGateOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/qualitygates/destroy";
    const RULES: &'static [FieldRule] = &[FieldRule::new("name", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("name", &self.name)
    }
}

/// Options for `POST api/qualitygates/select`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectGateOptions {
    /// Gate name.
    pub gate_name: String,
    /// Project key.
    pub project_key: String,
}

impl Endpoint for SelectGateOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/qualitygates/select";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("gateName", &[Check::Required, Check::MaxLen(100)]),
        FieldRule::new("projectKey", &[Check::Required]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("gateName", &self.gate_name)
            .set("projectKey", &self.project_key)
    }
}

/// Options for `POST api/qualitygates/deselect`.
///
/// The project falls back to the default gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeselectGateOptions {
    /// Project key.
    pub project_key: String,
}

impl Endpoint for DeselectGateOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/qualitygates/deselect";
    const RULES: &'static [FieldRule] = &[FieldRule::new("projectKey", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new().set("projectKey", &self.project_key)
    }
}

/// Options for `POST api/qualitygates/create_condition`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateConditionOptions {
    /// Gate name.
    pub gate_name: String,
    /// Metric key, e.g. `new_coverage`.
    pub metric: String,
    /// `LT` or `GT`.
    pub op: Option<String>,
    /// Threshold that breaches the condition.
    pub error: String,
}

impl Endpoint for CreateConditionOptions {
    type Output = Condition;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/qualitygates/create_condition";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("gateName", &[Check::Required]),
        FieldRule::new("metric", &[Check::Required]),
        FieldRule::new("op", &[Check::OneOf(OPERATORS)]),
        FieldRule::new("error", &[Check::Required, Check::MaxLen(64)]),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("gateName", &self.gate_name)
            .set("metric", &self.metric)
            .opt("op", self.op.as_ref())
            .set("error", &self.error)
    }
}

/// A gate condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition id.
    pub id: String,
    /// Metric key.
    pub metric: String,
    /// Comparison operator.
    #[serde(default)]
    pub op: Option<String>,
    /// Error threshold.
    pub error: String,
}

/// A quality gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityGate {
    /// Gate name.
    pub name: String,
    /// Whether new projects use this gate.
    #[serde(default)]
    pub is_default: bool,
    /// Whether the gate is built in and read-only.
    #[serde(default)]
    pub is_built_in: bool,
    /// Conditions, when the server includes them.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Response of `api/qualitygates/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateList {
    /// All gates.
    #[serde(default)]
    pub qualitygates: Vec<QualityGate>,
}

impl GateList {
    /// The gate new projects receive.
    pub fn default_gate(&self) -> Option<&QualityGate> {
        self.qualitygates.iter().find(|g| g.is_default)
    }
}

/// Handle for `api/qualitygates`.
#[derive(Debug, Clone, Copy)]
pub struct QualityGates<'a> {
    pub(crate) client: &'a SonarClient,
}

impl QualityGates<'_> {
    /// Creates an empty gate.
    pub async fn create<'o>(
        &self,
        options: impl Into<Option<&'o CreateGateOptions>>,
    ) -> Result<ApiResponse<QualityGate>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Lists every gate.
    pub async fn list(&self) -> Result<ApiResponse<GateList>, ApiError> {
        self.client.execute::<ListGates>(None).await
    }

    /// Shows one gate with its conditions.
    pub async fn show<'o>(
        &self,
        options: impl Into<Option<&'o ShowGateOptions>>,
    ) -> Result<ApiResponse<QualityGate>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Deletes a gate.
    pub async fn destroy<'o>(
        &self,
        options: impl Into<Option<&'o DestroyGateOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Assigns a gate to a project.
    pub async fn select<'o>(
        &self,
        options: impl Into<Option<&'o SelectGateOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Returns a project to the default gate.
    pub async fn deselect<'o>(
        &self,
        options: impl Into<Option<&'o DeselectGateOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Adds a condition to a gate.
    pub async fn create_condition<'o>(
        &self,
        options: impl Into<Option<&'o CreateConditionOptions>>,
    ) -> Result<ApiResponse<Condition>, ApiError> {
        self.client.execute(options.into()).await
    }
}
