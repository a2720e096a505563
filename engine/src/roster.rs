//! Row projection shared by every roster artifact.
//!
//! Both the printable report and the spreadsheet are rendered from one
//! [`RosterTable`]. The table is built once by calling a single
//! [`Projection`] on each ordered lot, so the two artifacts always have the
//! same row count, row order and cell values.

use crate::Lot;
use serde::{Deserialize, Serialize};

/// A roster column: display title and preferred spreadsheet width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub title: String,
    /// Width in spreadsheet character units
    pub width: f64,
}

impl Column {
    pub fn new(title: impl Into<String>, width: f64) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

/// Display cells for one lot, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow(pub Vec<String>);

impl RosterRow {
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }
}

/// Turns a lot into display cells.
pub trait Projection<P> {
    /// Column set, in display order.
    fn columns(&self) -> Vec<Column>;

    /// Cells for one lot. Must produce one cell per column.
    fn project(&self, lot: &Lot<P>) -> RosterRow;
}

/// `Lot Number | Team Name | Team ID | Command | Signature`.
///
/// `Command` comes from a string field of a JSON object payload (named
/// `command` unless configured otherwise). `Signature` is always blank; it is
/// signed by hand on the printed sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardColumns {
    command_field: String,
}

impl StandardColumns {
    pub const LOT_NUMBER: usize = 0;
    pub const TEAM_NAME: usize = 1;
    pub const TEAM_ID: usize = 2;
    pub const COMMAND: usize = 3;
    pub const SIGNATURE: usize = 4;

    pub fn new() -> Self {
        Self::with_command_field("command")
    }

    pub fn with_command_field(field: impl Into<String>) -> Self {
        Self {
            command_field: field.into(),
        }
    }
}

impl Default for StandardColumns {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection<serde_json::Value> for StandardColumns {
    fn columns(&self) -> Vec<Column> {
        vec![
            Column::new("Lot Number", 12.0),
            Column::new("Team Name", 32.0),
            Column::new("Team ID", 14.0),
            Column::new("Command", 24.0),
            Column::new("Signature", 28.0),
        ]
    }

    fn project(&self, lot: &Lot<serde_json::Value>) -> RosterRow {
        let command = lot
            .payload
            .get(&self.command_field)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();

        RosterRow(vec![
            lot.lot_number.clone().unwrap_or_default(),
            lot.team_name.clone(),
            lot.team_id.clone(),
            command.to_string(),
            String::new(),
        ])
    }
}

/// Header plus projected rows, ready for any renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterTable {
    columns: Vec<Column>,
    rows: Vec<RosterRow>,
}

impl RosterTable {
    /// Project an ordered lot sequence, row for row.
    ///
    /// Rows are padded or cut to the column count so every renderer sees a
    /// rectangular table.
    pub fn project<P, J>(ordered: &[&Lot<P>], projection: &J) -> Self
    where
        J: Projection<P> + ?Sized,
    {
        let columns = projection.columns();
        let width = columns.len();
        let rows = ordered
            .iter()
            .map(|lot| {
                let RosterRow(mut cells) = projection.project(lot);
                cells.resize(width, String::new());
                RosterRow(cells)
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column titles.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.title.as_str()).collect()
    }

    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Lot> {
        vec![
            Lot::new("a", "Physics", Some("2"))
                .with_team_id("PHY-2")
                .with_payload(json!({"command": "Hall A", "contestants": ["Asha"]})),
            Lot::new("b", "Chemistry", None).with_team_id("CHE-1"),
        ]
    }

    #[test]
    fn standard_projection() {
        let lots = sample();
        let columns = StandardColumns::new();

        let row = columns.project(&lots[0]);
        assert_eq!(row.cells(), &["2", "Physics", "PHY-2", "Hall A", ""]);

        let row = columns.project(&lots[1]);
        assert_eq!(row.cell(StandardColumns::LOT_NUMBER), Some(""));
        assert_eq!(row.cell(StandardColumns::COMMAND), Some(""));
        assert_eq!(row.cell(StandardColumns::SIGNATURE), Some(""));
    }

    #[test]
    fn custom_command_field() {
        let lot = Lot::new("a", "Physics", Some("1")).with_payload(json!({"venue": "Lab 3"}));
        let row = StandardColumns::with_command_field("venue").project(&lot);
        assert_eq!(row.cell(StandardColumns::COMMAND), Some("Lab 3"));
    }

    #[test]
    fn non_string_command_is_blank() {
        let lot = Lot::new("a", "Physics", Some("1")).with_payload(json!({"command": 4}));
        let row = StandardColumns::new().project(&lot);
        assert_eq!(row.cell(StandardColumns::COMMAND), Some(""));
    }

    #[test]
    fn table_keeps_order_and_header() {
        let lots = sample();
        let ordered: Vec<&Lot> = vec![&lots[1], &lots[0]];
        let table = RosterTable::project(&ordered, &StandardColumns::new());

        assert_eq!(
            table.header(),
            vec!["Lot Number", "Team Name", "Team ID", "Command", "Signature"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].cell(StandardColumns::TEAM_NAME), Some("Chemistry"));
        assert_eq!(table.rows()[1].cell(StandardColumns::TEAM_NAME), Some("Physics"));
    }

    struct ShortProjection;

    impl Projection<()> for ShortProjection {
        fn columns(&self) -> Vec<Column> {
            vec![Column::new("Team", 20.0), Column::new("Notes", 20.0)]
        }

        fn project(&self, lot: &Lot<()>) -> RosterRow {
            RosterRow(vec![lot.team_name.clone()])
        }
    }

    #[test]
    fn rows_are_padded_to_column_count() {
        let lots: Vec<Lot<()>> = vec![Lot::new("a", "Botany", None)];
        let ordered: Vec<&Lot<()>> = lots.iter().collect();
        let table = RosterTable::project(&ordered, &ShortProjection);

        assert_eq!(table.rows()[0].cells(), &["Botany", ""]);
    }

    #[test]
    fn empty_table() {
        let ordered: Vec<&Lot> = Vec::new();
        let table = RosterTable::project(&ordered, &StandardColumns::new());
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 5);
    }
}
