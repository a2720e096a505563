//! Spreadsheet (.xlsx) export.

use super::write_atomic;
use crate::error::{ExportError, Result};
use lotorder_engine::RosterTable;
use std::path::Path;
use umya_spreadsheet::Spreadsheet;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Roster";

/// Build a workbook holding the roster: bold header on row 1, data below.
pub fn build(table: &RosterTable) -> Result<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| ExportError::Spreadsheet("new workbook has no sheet".into()))?;
    sheet.set_name(SHEET_NAME);

    for (idx, column) in table.columns().iter().enumerate() {
        let col = column_letter(idx + 1);
        let address = format!("{}1", col);
        sheet
            .get_cell_mut(address.as_str())
            .set_value_string(column.title.as_str());
        sheet
            .get_style_mut(address.as_str())
            .get_font_mut()
            .set_bold(true);
        sheet.get_column_dimension_mut(col.as_str()).set_width(column.width);
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = row_idx + 2;
        for (col_idx, value) in row.cells().iter().enumerate() {
            let address = format!("{}{}", column_letter(col_idx + 1), row_num);
            // Cells are text; "007" must not become the number 7.
            sheet
                .get_cell_mut(address.as_str())
                .set_value_string(value.as_str());
        }
    }

    Ok(book)
}

/// Build and write the workbook to `path`.
pub fn write(path: &Path, table: &RosterTable) -> Result<()> {
    let book = build(table)?;
    write_atomic(path, |staging| {
        umya_spreadsheet::writer::xlsx::write(&book, staging)
            .map_err(|e| ExportError::Spreadsheet(e.to_string()))
    })
}

/// Spreadsheet column letter for a 1-based index (1 -> A, 27 -> AA).
fn column_letter(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
