//
//  sonar-cli
//  cli/branch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::services::project_branches::{Branch, DeleteBranchOptions, ListBranchesOptions};
use crate::output::{format_bool, format_date, format_status, TableRow};

use super::GlobalOptions;

/// Manage project branches
#[derive(Args, Debug)]
pub struct BranchCommand {
    #[command(subcommand)]
    pub command: BranchSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BranchSubcommand {
    /// List the branches of a project
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Delete a branch (the main branch cannot be deleted)
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project key
    #[arg(long, short = 'p')]
    pub project: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Branch name
    pub branch: String,

    /// Project key
    #[arg(long, short = 'p')]
    pub project: String,
}

impl TableRow for Branch {
    const HEADERS: &'static [&'static str] = &["NAME", "QUALITY GATE", "ANALYZED", "KEEP"];

    fn row(&self, color: bool) -> Vec<String> {
        let name = match (self.is_main, color) {
            (true, true) => format!("{} {}", style(&self.name).bold(), style("(main)").dim()),
            (true, false) => format!("{} (main)", self.name),
            (false, _) => self.name.clone(),
        };
        let gate = self
            .status
            .as_ref()
            .and_then(|s| s.quality_gate_status.as_deref())
            .map(|s| format_status(s, color))
            .unwrap_or_else(|| "-".to_string());
        vec![
            name,
            gate,
            format_date(self.analysis_date.as_ref()),
            format_bool(self.excluded_from_purge, color),
        ]
    }
}

impl BranchCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            BranchSubcommand::List(args) => self.list(args, global).await,
            BranchSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let options = ListBranchesOptions {
            project: args.project.clone(),
        };
        let branches = client
            .project_branches()
            .list(&options)
            .await?
            .into_data()
            .map(|list| list.branches)
            .unwrap_or_default();

        global.writer().write_list(&branches, "No branches found.")
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let options = DeleteBranchOptions {
            project: args.project.clone(),
            branch: args.branch.clone(),
        };
        client.project_branches().delete(&options).await?;

        global.writer().write_success(&format!(
            "Deleted branch {} of {}",
            args.branch, args.project
        ));
        Ok(())
    }
}
