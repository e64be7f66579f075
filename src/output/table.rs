//
//  sonar-cli
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Utilities for tabular terminal output, built on `comfy_table`, plus the
//! cell formatters shared by every command: quality gate and health
//! statuses, booleans, dates and long values.
//!
//! ## Example
//!
//! ```rust
//! use sonar_cli::output::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .color(false)
//!     .headers(["KEY", "NAME"])
//!     .row(["my-app", "My App"])
//!     .build();
//! assert!(table.to_string().contains("my-app"));
//! ```

use chrono::{DateTime, FixedOffset};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates a table with UTF-8 borders that fits the terminal width.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for tables with a fluent API.
///
/// Headers are cyan when color is enabled. Color support is detected on
/// creation; use [`TableBuilder::color`] to override it.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Overrides color detection.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the header row. Call [`TableBuilder::color`] first if you
    /// override it.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    /// Adds one row.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    /// Adds several rows.
    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(Into::into).collect();
            self.table.add_row(row);
        }
        self
    }

    /// Prints the table to stdout.
    pub fn print(self) {
        println!("{}", self.table);
    }

    /// Returns the underlying table.
    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a SonarQube status by meaning.
///
/// - **Green**: `OK`, `UP`, `GREEN`, `PASSED`
/// - **Red**: `ERROR`, `DOWN`, `RED`, `FAILED`
/// - **Yellow**: `WARN`, `YELLOW`, `TO_REVIEW`, `STARTING`, `RESTARTING`,
///   `DB_MIGRATION_NEEDED`, `DB_MIGRATION_RUNNING`
/// - **Blue**: `REVIEWED`, `FIXED`, `SAFE`, `ACKNOWLEDGED`
///
/// Matching ignores case; other values are returned unchanged.
///
/// # Example
///
/// ```rust
/// use sonar_cli::output::format_status;
///
/// assert_eq!(format_status("OK", false), "OK");
/// ```
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_uppercase().as_str() {
        "OK" | "UP" | "GREEN" | "PASSED" => style(status).green().to_string(),
        "ERROR" | "DOWN" | "RED" | "FAILED" => style(status).red().to_string(),
        "WARN" | "YELLOW" | "TO_REVIEW" | "STARTING" | "RESTARTING" | "DB_MIGRATION_NEEDED"
        | "DB_MIGRATION_RUNNING" => style(status).yellow().to_string(),
        "REVIEWED" | "FIXED" | "SAFE" | "ACKNOWLEDGED" => style(status).blue().to_string(),
        _ => status.to_string(),
    }
}

/// Formats a boolean as `Yes` / `No`.
pub fn format_bool(value: bool, color: bool) -> String {
    use console::style;
    match (value, color) {
        (true, true) => style("Yes").green().to_string(),
        (false, true) => style("No").dim().to_string(),
        (true, false) => "Yes".to_string(),
        (false, false) => "No".to_string(),
    }
}

/// Formats an optional timestamp as `YYYY-MM-DD HH:MM`, or `-`.
///
/// ```rust
/// use chrono::DateTime;
/// use sonar_cli::output::format_date;
///
/// let at = DateTime::parse_from_rfc3339("2024-05-01T09:30:00+02:00").ok();
/// assert_eq!(format_date(at.as_ref()), "2024-05-01 09:30");
/// assert_eq!(format_date(None), "-");
/// ```
pub fn format_date(value: Option<&DateTime<FixedOffset>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncates `s` to at most `max_len` characters, ending in `...` when cut.
///
/// Counts characters, not bytes, so multi-byte names are never split.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
