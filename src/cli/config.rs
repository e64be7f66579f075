//
//  sonar-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Keys are `timeout_secs`, `default_host` and `hosts.<name>.<field>`;
//! `--host <name>` lets host fields be written as just `url`, `user` or
//! `token`.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde_json::json;

use crate::config::Config;
use crate::output::write_json;

use super::GlobalOptions;

/// Fields of a `[hosts.<name>]` table.
const HOST_KEYS: &[&str] = &["url", "user", "token"];

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,

    /// Read a field of this host
    #[arg(long = "for-host", short = 'H')]
    pub for_host: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,

    /// Write a field of this host
    #[arg(long = "for-host", short = 'H')]
    pub for_host: Option<String>,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    /// Get a configuration value
    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let key = full_key(&args.key, args.for_host.as_deref())?;
        let value = config.get(&key);

        if global.json {
            write_json(&json!({ "key": key, "value": value }))?;
        } else if let Some(v) = value {
            println!("{}", v);
        }
        Ok(())
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        let key = full_key(&args.key, args.for_host.as_deref())?;

        if !config.set(&key, args.value.clone()) {
            bail!(
                "Invalid key or value: {}. Valid keys: timeout_secs, default_host, hosts.<name>.{{{}}}",
                key,
                HOST_KEYS.join(",")
            );
        }
        config.save()?;

        if global.json {
            write_json(&json!({ "key": key, "value": config.get(&key) }))?;
        } else {
            println!("{} Set {}", style("✓").green(), key);
        }
        Ok(())
    }

    /// Show configuration file path
    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let config_path = Config::config_path()?;

        if global.json {
            write_json(&json!({
                "path": config_path.display().to_string(),
                "exists": config_path.is_file(),
            }))?;
        } else {
            println!("{}", config_path.display());
        }
        Ok(())
    }
}

/// Expands `url` with `--for-host work` into `hosts.work.url`.
fn full_key(key: &str, host: Option<&str>) -> Result<String> {
    match host {
        None => Ok(key.to_string()),
        Some(host) if HOST_KEYS.contains(&key) => Ok(format!("hosts.{host}.{key}")),
        Some(_) => bail!(
            "Invalid host key: {}. Valid keys: {}",
            key,
            HOST_KEYS.join(", ")
        ),
    }
}
