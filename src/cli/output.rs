//! Output formatting utilities
//!
//! Renders display records as JSON, an aligned table or plain text.

use crate::cli::args::OutputFormat;
use crate::domain::Record;
use std::io::{self, Write};

/// Returned for an empty table
pub const NO_DATA: &str = "No data";

/// Format and print records based on the selected format
pub fn print_output(records: &[Record], format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let rendered = format_output(records, format)?;
    writeln!(handle, "{}", rendered)?;
    Ok(())
}

/// Render records in the selected format
pub fn format_output(records: &[Record], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records),
        OutputFormat::Table => Ok(format_table(records)),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

/// Render records as a fixed-width table
///
/// The first record's keys define the columns. Each column is as wide as its
/// longest cell or header; keys missing from later records render empty.
pub fn format_table(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return NO_DATA.to_string();
    };

    let columns: Vec<&str> = first.keys().collect();
    let widths: Vec<usize> = columns
        .iter()
        .map(|col| {
            records
                .iter()
                .map(|r| r.get(col).unwrap_or("").chars().count())
                .fold(col.chars().count(), usize::max)
        })
        .collect();

    let header = join_row(columns.iter().copied(), &widths);
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(header);
    lines.push(separator);
    for record in records {
        lines.push(join_row(
            columns.iter().map(|col| record.get(col).unwrap_or("")),
            &widths,
        ));
    }

    lines.join("\n")
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    let mut out = String::with_capacity(cell.len() + width.saturating_sub(len));
    out.push_str(cell);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

/// Render records as plain text, one per line
pub fn format_text(records: &[Record]) -> String {
    if records.is_empty() {
        return "[]".to_string();
    }
    records
        .iter()
        .map(Record::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
