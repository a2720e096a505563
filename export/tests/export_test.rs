//! End-to-end tests for roster-export
//!
//! Each test writes a request into a temp directory, runs the export, and
//! reads the artifacts back.

use lotorder_engine::{Error, NormalizationPolicy};
use roster_export::config::Config;
use roster_export::error::ExportError;
use roster_export::render::spreadsheet::SHEET_NAME;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_request(dir: &Path, request: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("request.json");
    fs::write(&path, request.to_string()).unwrap();
    path
}

fn config_for(dir: &TempDir, request: &serde_json::Value) -> Config {
    Config {
        input: write_request(dir.path(), request),
        output_dir: dir.path().join("out"),
        output_stem: "roster".into(),
        title: None,
        letterhead: None,
        normalization: None,
    }
}

fn festival_request() -> serde_json::Value {
    json!({
        "formatVersion": 1,
        "title": "Quiz Prelims",
        "canonical": ["Physics", "Chemistry", "Physics"],
        "lots": [
            {"id": "phy-5", "teamName": "Physics", "teamId": "PHY", "lotNumber": "5",
             "payload": {"command": "Hall A"}},
            {"id": "chem-1", "teamName": "Chemistry", "teamId": "CHE", "lotNumber": 1},
            {"id": "phy-2", "teamName": "physics", "teamId": "PHY", "lotNumber": "2"},
            {"id": "zoo", "teamName": "Zoology", "teamId": "ZOO", "lotNumber": "N/A"}
        ]
    })
}

/// Data rows of the text report, as trimmed cell values.
fn report_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| line.starts_with('│'))
        .map(|line| {
            line.trim_matches('│')
                .split('│')
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .skip(1)
        .collect()
}

/// Data rows of the spreadsheet.
fn spreadsheet_rows(path: &Path, rows: usize) -> Vec<Vec<String>> {
    let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
    let sheet = book.get_sheet_by_name(SHEET_NAME).unwrap();

    (2..rows + 2)
        .map(|row| {
            ["A", "B", "C", "D", "E"]
                .iter()
                .map(|col| sheet.get_value(format!("{}{}", col, row).as_str()))
                .collect()
        })
        .collect()
}

// ============================================================================
// Lockstep
// ============================================================================

#[test]
fn both_artifacts_carry_the_same_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir, &festival_request());

    let report = roster_export::run(&config).unwrap();
    assert_eq!(report.rows, 4);

    let text = fs::read_to_string(&report.table_path).unwrap();
    let from_report = report_rows(&text);
    let from_sheet = spreadsheet_rows(&report.spreadsheet_path, report.rows);

    assert_eq!(from_report.len(), 4);
    assert_eq!(from_report, from_sheet);

    let teams: Vec<_> = from_sheet.iter().map(|row| row[1].as_str()).collect();
    assert_eq!(teams, vec!["physics", "Chemistry", "Physics", "Zoology"]);
    assert_eq!(from_sheet[2][3], "Hall A");
}

#[test]
fn numeric_looking_cells_stay_text_in_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let request = json!({
        "canonical": ["Physics", "Chemistry"],
        "lots": [
            {"id": "p", "teamName": "Physics", "teamId": "0042", "lotNumber": "007"},
            {"id": "c", "teamName": "Chemistry", "teamId": "1e3", "lotNumber": "12"}
        ]
    });
    let config = config_for(&dir, &request);

    let report = roster_export::run(&config).unwrap();
    let text = fs::read_to_string(&report.table_path).unwrap();
    let from_report = report_rows(&text);
    let from_sheet = spreadsheet_rows(&report.spreadsheet_path, report.rows);

    assert_eq!(from_report, from_sheet);
    assert_eq!(from_sheet[0][0], "007");
    assert_eq!(from_sheet[0][2], "0042");
    assert_eq!(from_sheet[1][2], "1e3");
}

#[test]
fn header_row_names_every_column() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir, &festival_request());
    let report = roster_export::run(&config).unwrap();

    let book = umya_spreadsheet::reader::xlsx::read(&report.spreadsheet_path).unwrap();
    let sheet = book.get_sheet_by_name(SHEET_NAME).unwrap();

    let header: Vec<_> = ["A", "B", "C", "D", "E"]
        .iter()
        .map(|col| sheet.get_value(format!("{}1", col).as_str()))
        .collect();
    assert_eq!(
        header,
        vec!["Lot Number", "Team Name", "Team ID", "Command", "Signature"]
    );
}

#[test]
fn summary_counts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir, &festival_request());
    let report = roster_export::run(&config).unwrap();

    assert_eq!(report.summary.matched, 3);
    assert_eq!(report.summary.overflow, 0);
    assert_eq!(report.summary.unranked, 1);
    assert_eq!(report.summary.unranked_teams, vec!["Zoology"]);

    let printed = serde_json::to_value(&report).unwrap();
    assert_eq!(printed["rows"], 4);
    assert_eq!(printed["summary"]["unrankedTeams"], json!(["Zoology"]));
    assert!(printed["generatedAt"].is_string());
}

// ============================================================================
// Report Header
// ============================================================================

#[test]
fn letterhead_and_title_override() {
    let dir = tempfile::tempdir().unwrap();
    let letterhead = dir.path().join("letterhead.txt");
    fs::write(&letterhead, "Govt. Arts College\nAnnual Fest\n").unwrap();

    let mut config = config_for(&dir, &festival_request());
    config.letterhead = Some(letterhead);
    config.title = Some("Quiz Finals".into());

    let report = roster_export::run(&config).unwrap();
    let text = fs::read_to_string(&report.table_path).unwrap();

    assert!(text.starts_with("Govt. Arts College\nAnnual Fest\n\nQuiz Finals\nGenerated "));
}

#[test]
fn missing_letterhead_does_not_block_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&dir, &festival_request());
    config.letterhead = Some(dir.path().join("no-such-letterhead.txt"));

    let report = roster_export::run(&config).unwrap();
    let text = fs::read_to_string(&report.table_path).unwrap();

    assert!(text.starts_with("Quiz Prelims\nGenerated "));
    assert_eq!(report_rows(&text).len(), 4);
}

#[test]
fn default_title() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = festival_request();
    request.as_object_mut().unwrap().remove("title");
    let config = config_for(&dir, &request);

    let report = roster_export::run(&config).unwrap();
    let text = fs::read_to_string(&report.table_path).unwrap();
    assert!(text.starts_with("Lot Roster\n"));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn normalization_override() {
    let dir = tempfile::tempdir().unwrap();
    let request = json!({
        "canonical": ["Botany", "Zoology"],
        "lots": [
            {"id": "z", "teamName": "Zoology", "lotNumber": "1"},
            {"id": "b", "teamName": "  Botany ", "lotNumber": "1"}
        ]
    });

    let config = config_for(&dir, &request);
    let strict = roster_export::run(&config).unwrap();
    assert_eq!(strict.summary.unranked, 1);

    let mut config = config_for(&dir, &request);
    config.normalization = Some(NormalizationPolicy::CaseFoldTrim);
    let lenient = roster_export::run(&config).unwrap();
    assert_eq!(lenient.summary.unranked, 0);

    let rows = spreadsheet_rows(&lenient.spreadsheet_path, 2);
    assert_eq!(rows[0][1].trim(), "Botany");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn null_lots_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir, &json!({"canonical": ["Physics"], "lots": null}));

    let err = roster_export::run(&config).unwrap_err();
    assert!(matches!(err, ExportError::Engine(Error::MissingLots)));
    assert!(!config.table_path().exists());
    assert!(!config.spreadsheet_path().exists());
}

#[test]
fn empty_canonical_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir, &json!({"canonical": [], "lots": []}));

    let err = roster_export::run(&config).unwrap_err();
    assert!(matches!(err, ExportError::Engine(Error::EmptyCanonical)));
}

#[test]
fn future_format_version_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = festival_request();
    request["formatVersion"] = json!(99);
    let config = config_for(&dir, &request);

    let err = roster_export::run(&config).unwrap_err();
    assert!(matches!(err, ExportError::Engine(Error::InvalidRequest(_))));
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&dir, &festival_request());
    config.input = dir.path().join("absent.json");

    let err = roster_export::run(&config).unwrap_err();
    assert!(matches!(err, ExportError::Io { .. }));
}

#[test]
fn no_staging_files_remain() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir, &festival_request());
    roster_export::run(&config).unwrap();

    let mut names: Vec<_> = fs::read_dir(&config.output_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["roster.txt", "roster.xlsx"]);
}
