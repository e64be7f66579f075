//
//  sonar-cli
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::api::common::PaginationArgs;
use crate::api::services::projects::{
    CreateProjectOptions, DeleteProjectOptions, Project, SearchProjectsOptions, VISIBILITIES,
};
use crate::output::{format_date, print_field, TableOutput, TableRow};

use super::GlobalOptions;

/// Manage projects
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create a project
    Create(CreateArgs),

    /// Delete a project
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter on key or name
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Maximum number of projects to list (1-500)
    #[arg(long, short = 'l', default_value = "25")]
    pub limit: u32,

    /// Page to show
    #[arg(long, default_value = "1")]
    pub page: u32,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project key
    #[arg(long, short = 'k')]
    pub key: String,

    /// Project name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Visibility (private or public)
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(VISIBILITIES.iter().copied()))]
    pub visibility: Option<String>,

    /// Name of the main branch
    #[arg(long)]
    pub main_branch: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project key
    pub project: String,

    /// Skip the confirmation check
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl TableRow for Project {
    const HEADERS: &'static [&'static str] = &["KEY", "NAME", "VISIBILITY", "LAST ANALYSIS"];

    fn row(&self, color: bool) -> Vec<String> {
        let visibility = self.visibility.as_deref().unwrap_or("-");
        let visibility = match (visibility, color) {
            ("private", true) => style(visibility).yellow().to_string(),
            ("public", true) => style(visibility).green().to_string(),
            _ => visibility.to_string(),
        };
        vec![
            self.key.clone(),
            self.name.clone(),
            visibility,
            format_date(self.last_analysis_date.as_ref()),
        ]
    }
}

impl TableOutput for Project {
    fn print_table(&self, color: bool) {
        print_field("Key", &self.key, color);
        print_field("Name", &self.name, color);
        print_field("Visibility", self.visibility.as_deref().unwrap_or("-"), color);
    }
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List(args) => self.list(args, global).await,
            ProjectSubcommand::Create(args) => self.create(args, global).await,
            ProjectSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    /// List projects
    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let options = SearchProjectsOptions {
            q: args.query.clone(),
            pagination: PaginationArgs::new(args.page, args.limit),
            ..Default::default()
        };

        let result = client
            .projects()
            .search(&options)
            .await?
            .into_data()
            .context("Server returned an empty project list")?;

        let writer = global.writer();
        writer.write_list(&result.components, "No projects found.")?;

        if !global.json && !result.components.is_empty() {
            println!(
                "Showing {} of {} project(s)",
                result.components.len(),
                result.paging.total
            );
            if let Some(next) = result.paging.next_page() {
                println!("Use --page {} for more", next);
            }
        }
        Ok(())
    }

    /// Create a project
    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let options = CreateProjectOptions {
            name: args.name.clone(),
            project: args.key.clone(),
            visibility: args.visibility.clone(),
            main_branch: args.main_branch.clone(),
        };

        let created = client
            .projects()
            .create(&options)
            .await?
            .into_data()
            .context("Server returned no project")?;

        let writer = global.writer();
        writer.write(&created.project)?;
        writer.write_success(&format!("Created project {}", created.project.key));
        Ok(())
    }

    /// Delete a project
    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        if !args.yes {
            bail!(
                "Deleting '{}' removes all of its analyses. Re-run with --yes to confirm.",
                args.project
            );
        }

        let client = global.client()?;
        let options = DeleteProjectOptions {
            project: args.project.clone(),
        };
        client.projects().delete(&options).await?;

        global
            .writer()
            .write_success(&format!("Deleted project {}", args.project));
        Ok(())
    }
}
