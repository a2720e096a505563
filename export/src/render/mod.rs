//! Artifact rendering.
//!
//! Both artifacts are rendered from the same [`RosterTable`], so the printed
//! report and the spreadsheet always carry the same rows in the same order.
//!
//! [`RosterTable`]: lotorder_engine::RosterTable

pub mod spreadsheet;
pub mod table;

use crate::error::{ExportError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp format used on the printed report.
pub const GENERATED_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Context printed above the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportHeader {
    pub letterhead: Vec<String>,
    pub title: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            letterhead: Vec::new(),
            title: title.into(),
            generated_at: Utc::now(),
        }
    }

    pub fn with_letterhead(mut self, lines: Vec<String>) -> Self {
        self.letterhead = lines;
        self
    }

    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    pub fn generated_line(&self) -> String {
        format!("Generated {}", self.generated_at.format(GENERATED_FORMAT))
    }
}

/// Read the letterhead text, if one is configured.
///
/// A missing or unreadable letterhead is logged and skipped; it never
/// blocks the roster itself.
pub fn load_letterhead(path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        return Vec::new();
    };

    match fs::read_to_string(path) {
        Ok(text) => text
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect(),
        Err(err) => {
            tracing::warn!(
                "Letterhead {} could not be read, continuing without it: {}",
                path.display(),
                err
            );
            Vec::new()
        }
    }
}

/// Sibling path an artifact is staged at before it is moved into place.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write an artifact through a staging file so a failed run never leaves a
/// partial file at `path`.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let staging = staging_path(path);

    if let Err(err) = write(&staging) {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }

    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        ExportError::io(path, e)
    })
}
