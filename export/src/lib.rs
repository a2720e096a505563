//! Roster Export - renders ordered lot rosters for printing.
//!
//! Reads an [`ExportRequest`] snapshot, orders its lots with the
//! lotorder-engine, projects the result once into a [`RosterTable`], and
//! writes a printable text report plus a spreadsheet from that one table.

pub mod config;
pub mod error;
pub mod render;

pub use config::{Config, ConfigError};
pub use error::{ExportError, Result};

use crate::render::ReportHeader;
use chrono::{DateTime, Utc};
use lotorder_engine::{ExportRequest, PlacementSummary, RosterTable, StandardColumns};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// What a run produced. Printed as JSON by the binary for the calling host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub rows: usize,
    pub summary: PlacementSummary,
    pub table_path: PathBuf,
    pub spreadsheet_path: PathBuf,
    pub generated_at: DateTime<Utc>,
}

/// Load the request named by the configuration and apply its overrides.
pub fn load_request(config: &Config) -> Result<ExportRequest> {
    let json = fs::read_to_string(&config.input).map_err(|e| ExportError::io(&config.input, e))?;
    let mut request = ExportRequest::from_json(&json)?;
    tracing::debug!(
        "Loaded {}: {} lots, {} canonical entries",
        config.input.display(),
        request.lots.len(),
        request.canonical.len()
    );

    if let Some(title) = &config.title {
        request.title = Some(title.clone());
    }
    if let Some(policy) = config.normalization {
        request.options = request.options.with_normalization(policy);
    }

    Ok(request)
}

/// Order the request and write both artifacts.
pub fn export(config: &Config, request: &ExportRequest) -> Result<ExportReport> {
    let placements = request.placements()?;
    let summary = PlacementSummary::from_placements(&placements);

    tracing::info!(
        "Ordered {} lots: {} matched, {} overflow, {} unranked, {} unparsed lot numbers",
        summary.total(),
        summary.matched,
        summary.overflow,
        summary.unranked,
        summary.unparsed_numbers
    );
    if !summary.unranked_teams.is_empty() {
        tracing::warn!(
            "Teams missing from the canonical list: {}",
            summary.unranked_teams.join(", ")
        );
    }

    let ordered: Vec<_> = placements.iter().map(|p| p.lot).collect();
    let table = RosterTable::project(&ordered, &StandardColumns::new());

    fs::create_dir_all(&config.output_dir).map_err(|e| ExportError::io(&config.output_dir, e))?;

    let header = ReportHeader::new(request.title_or_default())
        .with_letterhead(render::load_letterhead(config.letterhead.as_deref()));

    let table_path = config.table_path();
    render::table::write(&table_path, &header, &table)?;
    tracing::info!("Wrote report to {}", table_path.display());

    let spreadsheet_path = config.spreadsheet_path();
    render::spreadsheet::write(&spreadsheet_path, &table)?;
    tracing::info!("Wrote spreadsheet to {}", spreadsheet_path.display());

    Ok(ExportReport {
        rows: table.len(),
        summary,
        table_path,
        spreadsheet_path,
        generated_at: header.generated_at,
    })
}

/// Full run: load the request, then export it.
pub fn run(config: &Config) -> Result<ExportReport> {
    let request = load_request(config)?;
    export(config, &request)
}
