// crates/coinage-cli/src/output.rs
//
// Output formatting utilities for the Coinage CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    /// Parse a config value; anything other than "json" means table.
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Print rows in the requested format.
pub fn print_rows<T: Tabled + Serialize>(format: OutputFormat, rows: &[T]) {
    match format {
        OutputFormat::Table => println!("{}", format_table(rows)),
        OutputFormat::Json => println!("{}", format_json(&rows)),
    }
}
