//! Tabular query results and the CSV export artifact.

use itertools::Itertools as _;
use serde_json::Value;

/// Result of one executed query: a column list plus rows normalized to it.
///
/// Rows are stored positionally; `from_positional` guarantees every row has
/// exactly `columns.len()` cells, so lookups and exports never have to
/// defend against ragged input again.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: u64,
    pub exec_time_ms: u64,
}

impl ResultSet {
    /// Build from the backend's positional representation.
    ///
    /// Cells are zipped against `columns` by position. A short row is padded
    /// with JSON null; values beyond the column list are ignored.
    pub fn from_positional(
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
        row_count: u64,
        exec_time_ms: u64,
    ) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self {
            columns,
            rows,
            row_count,
            exec_time_ms,
        }
    }

    /// Cell lookup by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)
    }

    /// Rows as ordered (column, value) records.
    pub fn labeled_rows(&self) -> impl Iterator<Item = Vec<(&str, &Value)>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(String::as_str).zip(row).collect())
    }

    /// Export as CSV: comma-joined header, then one line per row with each
    /// cell JSON-stringified. JSON string quoting is what keeps cells
    /// containing commas or quotes round-trip safe; null cells export as the
    /// empty string.
    pub fn to_csv(&self) -> String {
        let header = self.columns.iter().join(",");
        let body = self
            .rows
            .iter()
            .map(|row| row.iter().map(csv_cell).join(","));
        std::iter::once(header).chain(body).join("\n")
    }
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("\"\""),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Render one cell for the terminal grid: nulls show as `NULL`, strings
/// render unquoted, everything else keeps its JSON form.
pub fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("NULL"),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
