//
//  sonar-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Renders command results for the `sq` binary in one of two formats:
//!
//! - **Table format**: Human-readable output for interactive terminal use
//! - **JSON format**: Machine-readable output for scripting (`--json`)
//!
//! ## Architecture
//!
//! - [`table`]: Table building and cell formatting using `comfy_table`
//! - [`json`]: JSON serialization using `serde_json`
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: The available formats
//! - [`OutputWriter`]: Main entry point for writing results and messages
//! - [`TableOutput`]: Types that render as a block of fields
//! - [`TableRow`]: Types that render as one row of a list table
//!
//! ## Example
//!
//! ```rust,ignore
//! use sonar_cli::output::OutputWriter;
//!
//! let writer = OutputWriter::from_flag(global.json);
//! writer.write_list(&branches)?;
//! writer.write_success("Branch deleted");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// Output formats supported by [`OutputWriter`].
///
/// The default is [`OutputFormat::Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables and field lists.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// A unified output writer for command results and status messages.
///
/// Results go to stdout in the configured format. Errors and warnings
/// always go to stderr so `sq ... --json | jq` keeps working.
///
/// # Notes
///
/// Color output is detected from the terminal. Colors are disabled when
/// output is piped or `NO_COLOR` is set.
#[derive(Debug, Clone, Copy)]
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer with the given format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Creates a writer from the global `--json` flag.
    pub fn from_flag(json: bool) -> Self {
        Self::new(if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    /// Returns the configured format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Checks if the writer produces JSON.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes a single value.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
        }
    }

    /// Writes a list of values as one table, or as a JSON array.
    ///
    /// An empty list prints `empty` instead of a header-only table.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T], empty: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values),
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info(empty);
                } else {
                    build_list_table(values, self.color).print();
                }
                Ok(())
            }
        }
    }

    /// Writes an error message to stderr, prefixed with `error:`.
    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    /// Writes a warning message to stderr, prefixed with `warning:`.
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Writes an informational message.
    ///
    /// Suppressed in JSON mode so stdout stays parseable.
    pub fn write_info(&self, msg: &str) {
        if !self.is_json() {
            println!("{}", msg);
        }
    }

    /// Writes a success message prefixed with a check mark.
    ///
    /// Suppressed in JSON mode so stdout stays parseable.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.is_json() {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Types that render as a block of labelled fields.
///
/// # Example
///
/// ```rust,ignore
/// use sonar_cli::output::{print_field, print_header, TableOutput};
///
/// impl TableOutput for SystemStatus {
///     fn print_table(&self, color: bool) {
///         print_header("Server");
///         print_field("Version", &self.version, color);
///         print_field("Status", &format_status(&self.status, color), color);
///     }
/// }
/// ```
pub trait TableOutput {
    /// Renders the value; `color` tells whether styling is allowed.
    fn print_table(&self, color: bool);
}

/// Types that render as one row of a list table.
pub trait TableRow {
    /// Column titles, in row order.
    const HEADERS: &'static [&'static str];

    /// Cell contents for this value, in [`TableRow::HEADERS`] order.
    fn row(&self, color: bool) -> Vec<String>;
}

/// Builds the table [`OutputWriter::write_list`] prints.
pub fn build_list_table<T: TableRow>(values: &[T], color: bool) -> TableBuilder {
    TableBuilder::new()
        .color(color)
        .headers(T::HEADERS.iter().copied())
        .rows(values.iter().map(|v| v.row(color)))
}

/// Prints a bold header with a dashed underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line; the key is dimmed when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
