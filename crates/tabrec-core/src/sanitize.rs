//! Table cleanup before output.

use crate::models::table::{RawTable, Table};

/// A cell is missing when it is absent or empty.
fn is_missing(cell: &Option<String>) -> bool {
    cell.as_deref().is_none_or(str::is_empty)
}

/// Upper-case test: at least one cased character and no lower-case ones.
/// `"ACCT NO."` and `"DATE 2024"` pass, `"2024"` and `"Date"` do not.
pub fn is_upper(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Normalize a raw table.
///
/// Rows are padded to the widest row, rows with every cell missing are
/// dropped, remaining missing cells become empty strings, and a first row
/// whose present cells are all upper-case becomes the column labels.
pub fn sanitize(raw: &RawTable) -> Table {
    let width = raw.width();

    let kept: Vec<&Vec<Option<String>>> = raw
        .rows
        .iter()
        .filter(|row| !row.iter().all(is_missing))
        .collect();

    let promote = kept.first().is_some_and(|first| {
        first
            .iter()
            .filter(|cell| !is_missing(cell))
            .all(|cell| cell.as_deref().is_some_and(is_upper))
    });

    let mut rows: Vec<Vec<String>> = kept
        .into_iter()
        .map(|row| {
            let mut cells: Vec<String> = row
                .iter()
                .map(|cell| cell.clone().unwrap_or_default())
                .collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();

    let columns = if promote {
        rows.remove(0)
    } else {
        (0..width).map(|i| i.to_string()).collect()
    };

    Table {
        columns,
        rows,
        header_promoted: promote,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_upper() {
        assert!(is_upper("DATE"));
        assert!(is_upper("ACCT NO."));
        assert!(is_upper("DATE 2024"));
        assert!(!is_upper("Date"));
        assert!(!is_upper("2024"));
        assert!(!is_upper(""));
    }

    #[test]
    fn test_drops_blank_rows_and_fills_missing() {
        let raw = RawTable {
            rows: vec![
                vec![Some("a".into()), None, Some("c".into())],
                vec![None, Some(String::new()), None],
                vec![Some("d".into())],
            ],
        };

        let table = sanitize(&raw);
        assert!(!table.header_promoted);
        assert_eq!(table.columns, strings(&["0", "1", "2"]));
        assert_eq!(
            table.rows,
            vec![strings(&["a", "", "c"]), strings(&["d", "", ""])]
        );
    }

    #[test]
    fn test_promotes_upper_case_header() {
        let raw = RawTable {
            rows: vec![
                vec![None, Some("NAME".into()), Some("QTY".into())],
                vec![Some("1".into()), Some("Apple".into()), Some("3".into())],
            ],
        };

        let table = sanitize(&raw);
        assert!(table.header_promoted);
        assert_eq!(table.columns, strings(&["", "NAME", "QTY"]));
        assert_eq!(table.rows, vec![strings(&["1", "Apple", "3"])]);
    }

    #[test]
    fn test_lower_case_cell_blocks_promotion() {
        let raw = RawTable::from_rows([vec!["DATE", "Description"], vec!["01-Jan-2024", "Fee"]]);

        let table = sanitize(&raw);
        assert!(!table.header_promoted);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], strings(&["DATE", "Description"]));
    }

    #[test]
    fn test_promotion_checks_first_kept_row() {
        let raw = RawTable {
            rows: vec![
                vec![None, None],
                vec![Some("ITEM".into()), Some("TOTAL".into())],
                vec![Some("Tea".into()), Some("4.00".into())],
            ],
        };

        let table = sanitize(&raw);
        assert!(table.header_promoted);
        assert_eq!(table.columns, strings(&["ITEM", "TOTAL"]));
        assert_eq!(table.rows, vec![strings(&["Tea", "4.00"])]);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            RawTable {
                rows: vec![
                    vec![Some("ITEM".into()), None, Some("TOTAL".into())],
                    vec![None, None],
                    vec![Some("Tea".into()), Some("x2".into())],
                ],
            },
            RawTable::from_rows([
                vec!["Date", "Description", "Debit", "Credit", "Balance"],
                vec!["01-Jan-2024", "Salary Credit", "", "1,000.00", "5,000.00"],
            ]),
            RawTable::new(),
            RawTable {
                rows: vec![vec![None, None], vec![Some(String::new())]],
            },
        ];

        for raw in &inputs {
            let once = sanitize(raw);
            let twice = sanitize(&once.to_raw());
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_empty_table() {
        let table = sanitize(&RawTable::new());
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
        assert!(!table.header_promoted);
    }
}
