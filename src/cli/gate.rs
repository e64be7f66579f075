//
//  sonar-cli
//  cli/gate.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Quality gate commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::services::qualitygates::{CreateGateOptions, QualityGate};
use crate::output::{format_bool, print_field, TableOutput, TableRow};

use super::GlobalOptions;

/// Manage quality gates
#[derive(Args, Debug)]
pub struct GateCommand {
    #[command(subcommand)]
    pub command: GateSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GateSubcommand {
    /// List quality gates
    #[command(visible_alias = "ls")]
    List,

    /// Create a quality gate
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Gate name
    pub name: String,
}

impl TableRow for QualityGate {
    const HEADERS: &'static [&'static str] = &["NAME", "DEFAULT", "BUILT-IN", "CONDITIONS"];

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            format_bool(self.is_default, color),
            format_bool(self.is_built_in, color),
            self.conditions.len().to_string(),
        ]
    }
}

impl TableOutput for QualityGate {
    fn print_table(&self, color: bool) {
        print_field("Name", &self.name, color);
        print_field("Default", &format_bool(self.is_default, color), color);
        for condition in &self.conditions {
            let op = condition.op.as_deref().unwrap_or("?");
            print_field(
                "Condition",
                &format!("{} {} {}", condition.metric, op, condition.error),
                color,
            );
        }
    }
}

impl GateCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            GateSubcommand::List => self.list(global).await,
            GateSubcommand::Create(args) => self.create(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let gates = client
            .qualitygates()
            .list()
            .await?
            .into_data()
            .map(|list| list.qualitygates)
            .unwrap_or_default();

        global.writer().write_list(&gates, "No quality gates found.")
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let options = CreateGateOptions {
            name: args.name.clone(),
        };
        let gate = client
            .qualitygates()
            .create(&options)
            .await?
            .into_data()
            .context("Server returned no gate")?;

        let writer = global.writer();
        writer.write(&gate)?;
        writer.write_success(&format!("Created quality gate '{}'", gate.name));
        Ok(())
    }
}
