//
//  sonar-cli
//  cli/events.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Follow SonarLint push events
//!
//! Keeps `api/push/sonarlint_events` open and prints each event as it
//! arrives, until the server closes the stream or the user interrupts.
//! With `--json` every event is one compact JSON line.

use std::io;

use anyhow::Result;
use clap::Args;
use console::style;

use crate::api::services::push::SonarLintEventsOptions;
use crate::api::stream::ServerEvent;
use crate::output::{write_json_line, OutputWriter};

use super::GlobalOptions;

/// Follow SonarLint events for projects
#[derive(Args, Debug)]
pub struct EventsCommand {
    /// Project key to watch (can be specified multiple times)
    #[arg(long = "project", short = 'p', required = true)]
    pub projects: Vec<String>,

    /// Language to watch, e.g. java or py (can be specified multiple times)
    #[arg(long = "language", short = 'l', required = true)]
    pub languages: Vec<String>,
}

impl EventsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let options = SonarLintEventsOptions {
            project_keys: self.projects.clone(),
            languages: self.languages.clone(),
        };
        let mut events = client.push().sonarlint_events(&options).await?;

        let writer = global.writer();
        writer.write_info(&format!(
            "Listening for events on {} (Ctrl+C to stop)",
            self.projects.join(", ")
        ));

        while let Some(event) = events.next_event().await? {
            print_event(&writer, &event)?;
        }
        Ok(())
    }
}

fn print_event(writer: &OutputWriter, event: &ServerEvent) -> Result<()> {
    if writer.is_json() {
        write_json_line(&mut io::stdout().lock(), event)
    } else {
        println!("{} {}", style(&event.event).cyan().bold(), event.data);
        Ok(())
    }
}
