//
//  sonar-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod branch;
mod config;
mod events;
mod gate;
mod project;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use branch::BranchCommand;
pub use config::ConfigCommand;
pub use events::EventsCommand;
pub use gate::GateCommand;
pub use project::ProjectCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::SonarClient;
use crate::config::{resolve_connection, Config, Connection, ConnectionOverrides};
use crate::output::OutputWriter;

/// SonarQube CLI - Work with SonarQube from the command line
#[derive(Parser, Debug)]
#[command(
    name = "sq",
    version,
    about = "Work with SonarQube from the command line",
    long_about = "sq is a CLI for the SonarQube Web API.\n\n\
                  It manages projects, branches, quality gates and tokens, and can call any endpoint directly.",
    propagate_version = true,
    after_help = "Use 'sq <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Name of a host from the config file
    #[arg(long, global = true, env = "SQ_HOST")]
    pub host: Option<String>,

    /// Server URL (overrides SONAR_HOST_URL and the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// User token (overrides SONAR_TOKEN and the config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            host: self.host.clone(),
            url: self.url.clone(),
            token: self.token.clone(),
        }
    }

    /// Resolves the server and credential from flags, environment and config.
    pub fn connection(&self, config: &Config) -> Result<Connection> {
        resolve_connection(config, &self.overrides(), |key| std::env::var(key).ok())
    }

    /// Loads the config file and builds a session for the selected server.
    pub fn client(&self) -> Result<SonarClient> {
        let config = Config::load()?;
        self.connection(&config)?.client(config.client_options())
    }

    /// Writer for the selected output format.
    pub fn writer(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check credentials and manage user tokens
    Auth(AuthCommand),

    /// Manage projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Manage project branches
    Branch(BranchCommand),

    /// Manage quality gates
    Gate(GateCommand),

    /// Follow SonarLint events for projects
    Events(EventsCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}
