//
//  sonar-cli
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Calls any SonarQube Web API endpoint through the configured session,
//! similar to `gh api` for GitHub. Useful for endpoints no other command
//! covers, and for debugging.
//!
//! ## Examples
//!
//! ```bash
//! # Server version
//! sq api api/server/version
//!
//! # Search with query parameters
//! sq api api/issues/search -F componentKeys=my-app -F ps=5
//!
//! # Set a project tag with POST (fields are form-encoded)
//! sq api -X POST api/project_tags/set -F project=my-app -F tags=backend
//! ```

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use reqwest::Method;
use serde_json::Value;

use crate::output::write_json;

use super::GlobalOptions;

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API path relative to the server root (e.g., api/projects/search)
    pub endpoint: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request parameters as key=value (can be specified multiple times)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Print the response status before the body
    #[arg(long, short = 'i')]
    pub include: bool,

    /// Suppress output (only fail on error)
    #[arg(long)]
    pub silent: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let method = self.parse_method()?;
        let (path, mut params) = split_query(&self.endpoint);
        for field in &self.field {
            params.push(parse_field(field)?);
        }

        let client = global.client()?;
        let response = client.raw(method, path, params).await?;

        if self.include && !self.silent {
            println!("{} {}", style("HTTP").dim(), response.status);
        }
        if self.silent {
            return Ok(());
        }

        match response.data {
            Some(Value::String(text)) => println!("{}", text),
            Some(value) => write_json(&value)?,
            None => {}
        }
        Ok(())
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "HEAD" => Ok(Method::HEAD),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }
}

/// Splits `api/x?a=1&b=2` into the path and its decoded query pairs.
fn split_query(endpoint: &str) -> (&str, Vec<(String, String)>) {
    match endpoint.split_once('?') {
        Some((path, query)) => (
            path,
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        ),
        None => (endpoint, Vec::new()),
    }
}

fn parse_field(field: &str) -> Result<(String, String)> {
    match field.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("Invalid field format: {}. Expected key=value", field),
    }
}
