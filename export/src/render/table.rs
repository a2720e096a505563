//! Printable plain-text report.

use super::{write_atomic, ReportHeader};
use crate::error::{ExportError, Result};
use lotorder_engine::RosterTable;
use std::fs;
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Render the report: letterhead, title, timestamp, then the roster table.
pub fn render(header: &ReportHeader, table: &RosterTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.header().into_iter().map(str::to_string));
    for row in table.rows() {
        builder.push_record(row.cells().iter().cloned());
    }

    let mut grid = builder.build();
    grid.with(Style::modern());

    let mut out = String::new();
    for line in &header.letterhead {
        out.push_str(line);
        out.push('\n');
    }
    if !header.letterhead.is_empty() {
        out.push('\n');
    }
    out.push_str(&header.title);
    out.push('\n');
    out.push_str(&header.generated_line());
    out.push_str("\n\n");
    out.push_str(&grid.to_string());
    out.push('\n');
    out
}

/// Render and write the report to `path`.
pub fn write(path: &Path, header: &ReportHeader, table: &RosterTable) -> Result<()> {
    let text = render(header, table);
    write_atomic(path, |staging| {
        fs::write(staging, text.as_bytes()).map_err(|e| ExportError::io(staging, e))
    })
}
