//! Table data models shared by every extraction tier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single raw row. `None` is an absent cell.
pub type RawRow = Vec<Option<String>>;

/// The ragged cell matrix produced by an extraction tier.
///
/// Row 0 is a header row when the tier knows one (the bank statement tier
/// always emits one, the whitespace tier never does).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a table where every cell is present.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }

    /// Append a row of present cells.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row.into_iter().map(Some).collect());
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A table counts as present only when it has more than one row.
    pub fn has_data(&self) -> bool {
        self.rows.len() > 1
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Text of the cell at `(row, col)`, if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

/// A sanitized, rectangular table ready for output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column labels: the promoted header row, or positional labels `0..n`.
    pub columns: Vec<String>,
    /// Data rows, each exactly `columns.len()` wide.
    pub rows: Vec<Vec<String>>,
    /// Whether `columns` came from a promoted header row.
    pub header_promoted: bool,
}

impl Table {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Cell text at `(row, col)` of the data rows.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Turn the table back into a raw matrix, re-emitting a promoted header as row 0.
    ///
    /// A table with positional labels and no rows keeps its width as one
    /// row of absent cells, which sanitizing drops again.
    pub fn to_raw(&self) -> RawTable {
        let mut raw = RawTable::new();
        if self.header_promoted {
            raw.push_row(self.columns.clone());
        } else if self.rows.is_empty() && !self.columns.is_empty() {
            raw.rows.push(vec![None; self.columns.len()]);
        }
        for row in &self.rows {
            raw.push_row(row.clone());
        }
        raw
    }

    /// Rows including the column labels as the first line, for writers.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.columns.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

/// The strategy that produced a page's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Tables detected by the document layer from ruled lines.
    Structural,
    /// Bank statement transaction lines.
    BankStatement,
    /// Columns inferred from whitespace alignment.
    Whitespace,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Structural => "structural",
            Tier::BankStatement => "bank_statement",
            Tier::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The winning tier's tables for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTables {
    /// Page number (1-indexed).
    pub page: u32,
    pub tier: Tier,
    pub tables: Vec<RawTable>,
}

/// Per-page summary of what the pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReport {
    /// Page number (1-indexed).
    pub page: u32,
    /// Winning tier, `None` when no tier produced a table.
    pub tier: Option<Tier>,
    /// Number of tables the page contributed.
    pub tables: usize,
}

/// A page the document layer could not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageError {
    pub page: u32,
    pub message: String,
}

/// Result of a whole extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Sanitized tables in page order.
    pub tables: Vec<Table>,
    /// True iff `tables` is non-empty.
    pub success: bool,
    /// One report per page that was read.
    pub pages: Vec<PageReport>,
    /// Pages skipped under the isolate failure policy.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<PageError>,
}

impl ExtractionOutcome {
    /// The all-or-nothing failure result: no tables, no partial reports.
    pub fn failed(error: PageError) -> Self {
        Self {
            tables: Vec::new(),
            success: false,
            pages: Vec::new(),
            errors: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_data_requires_more_than_header() {
        let mut table = RawTable::from_rows([["Date", "Description"]]);
        assert!(!table.has_data());

        table.push_row(vec!["01-Jan-2024".to_string(), "Opening".to_string()]);
        assert!(table.has_data());
        assert_eq!(table.width(), 2);
        assert_eq!(table.cell(1, 1), Some("Opening"));
    }

    #[test]
    fn test_to_raw_reemits_promoted_header() {
        let table = Table {
            columns: vec!["NAME".to_string(), "QTY".to_string()],
            rows: vec![vec!["Apple".to_string(), "3".to_string()]],
            header_promoted: true,
        };

        let raw = table.to_raw();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.cell(0, 0), Some("NAME"));
        assert_eq!(raw.cell(1, 1), Some("3"));
    }

    #[test]
    fn test_to_raw_keeps_width_of_empty_table() {
        let table = Table {
            columns: vec!["0".to_string(), "1".to_string()],
            rows: Vec::new(),
            header_promoted: false,
        };

        let raw = table.to_raw();
        assert_eq!(raw.rows, vec![vec![None, None]]);
        assert_eq!(raw.width(), 2);
    }

    #[test]
    fn test_records_starts_with_columns() {
        let table = Table {
            columns: vec!["0".to_string(), "1".to_string()],
            rows: vec![vec!["a".to_string(), "b".to_string()]],
            header_promoted: false,
        };

        let records: Vec<&[String]> = table.records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0][1], "1");
        assert_eq!(records[1][0], "a");
    }
}
