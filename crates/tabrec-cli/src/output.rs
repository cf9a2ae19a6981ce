//! Rendering and writing extracted tables.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use tracing::debug;

use tabrec_core::models::config::OutputFormat;
use tabrec_core::models::statement::{STATEMENT_HEADER, Transaction};
use tabrec_core::models::table::{ExtractionOutcome, Table};
use tabrec_core::statement::rules::format_amount;

/// File extension for a rendered format.
pub fn extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    }
}

pub fn render(
    outcome: &ExtractionOutcome,
    format: OutputFormat,
    delimiter: char,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => {
            let blocks = outcome
                .tables
                .iter()
                .map(|table| table_csv(table, delimiter))
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(blocks.join("\n"))
        }
        OutputFormat::Text => Ok(format_text(&outcome.tables)),
    }
}

/// One table as CSV, column labels first.
pub fn table_csv(table: &Table, delimiter: char) -> anyhow::Result<String> {
    if !delimiter.is_ascii() {
        anyhow::bail!("CSV delimiter must be an ASCII character, got {:?}", delimiter);
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .from_writer(vec![]);

    for record in table.records() {
        wtr.write_record(record)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Debit and credit totals when the table has the bank statement header,
/// either promoted or as its first data row.
pub fn statement_totals(table: &Table) -> Option<(Decimal, Decimal)> {
    let header_present = is_statement_header(&table.columns)
        || table.rows.first().is_some_and(|row| is_statement_header(row));
    if !header_present {
        return None;
    }

    let transactions: Vec<Transaction> = table
        .rows
        .iter()
        .filter_map(|row| Transaction::from_row(row))
        .collect();

    let debit = transactions
        .iter()
        .filter_map(Transaction::debit_amount)
        .sum::<Decimal>();
    let credit = transactions
        .iter()
        .filter_map(Transaction::credit_amount)
        .sum::<Decimal>();

    Some((debit, credit))
}

fn is_statement_header(cells: &[String]) -> bool {
    cells.iter().map(String::as_str).eq(STATEMENT_HEADER)
}

fn format_text(tables: &[Table]) -> String {
    let mut output = String::new();

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!(
            "Table {} ({} columns, {} rows)\n",
            i + 1,
            table.num_cols(),
            table.num_rows()
        ));

        let widths: Vec<usize> = (0..table.num_cols())
            .map(|col| {
                table
                    .records()
                    .filter_map(|record| record.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for record in table.records() {
            let line: String = record
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}  ", cell, width = width))
                .collect();
            output.push_str(line.trim_end());
            output.push('\n');
        }

        if let Some((debit, credit)) = statement_totals(table) {
            output.push_str(&format!("  Total debit:  {}\n", format_amount(debit)));
            output.push_str(&format!("  Total credit: {}\n", format_amount(credit)));
        }
    }

    output
}

/// Write `content` to `path` through a temporary file in the same directory.
/// The temporary file is removed unless the write succeeds.
pub fn write_atomic(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote output to {}", path.display());
    Ok(())
}

/// Write each table to `table_<n>.csv` under `dir`, `n` starting at 1.
pub fn write_table_csvs(
    dir: &Path,
    tables: &[Table],
    delimiter: char,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(tables.len());
    for (i, table) in tables.iter().enumerate() {
        let path = dir.join(format!("table_{}.csv", i + 1));
        write_atomic(&path, table_csv(table, delimiter)?.as_bytes())?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(columns: &[&str], rows: &[&[&str]], header_promoted: bool) -> Table {
        Table {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
            header_promoted,
        }
    }

    fn statement() -> Table {
        table(
            &["0", "1", "2", "3", "4"],
            &[
                &["Date", "Description", "Debit", "Credit", "Balance"],
                &["", "Account Number", "1234567890", "", ""],
                &["01-Jan-2024", "Salary Credit", "", "1,000.00", "5,000.00"],
                &["02-Jan-2024", "ATM Withdrawal", "500.00", "", ""],
                &["03-Jan-2024", "Card fee", "1,250.50", "", "3,249.50Dr"],
            ],
            false,
        )
    }

    #[test]
    fn test_table_csv() {
        let t = table(&["ITEM", "NOTE"], &[&["Tea", "hot, sweet"]], true);
        assert_eq!(table_csv(&t, ',').unwrap(), "ITEM,NOTE\nTea,\"hot, sweet\"\n");
        assert_eq!(table_csv(&t, ';').unwrap(), "ITEM;NOTE\nTea;hot, sweet\n");
        assert!(table_csv(&t, '§').is_err());
    }

    #[test]
    fn test_statement_totals() {
        let (debit, credit) = statement_totals(&statement()).unwrap();
        assert_eq!(format_amount(debit), "1,750.50");
        assert_eq!(format_amount(credit), "1,000.00");

        let plain = table(&["0", "1"], &[&["a", "b"]], false);
        assert_eq!(statement_totals(&plain), None);
    }

    #[test]
    fn test_text_output() {
        let outcome = ExtractionOutcome {
            tables: vec![table(&["ITEM", "QTY"], &[&["Apples", "3"]], true)],
            success: true,
            ..Default::default()
        };

        let text = render(&outcome, OutputFormat::Text, ',').unwrap();
        assert_eq!(text, "Table 1 (2 columns, 1 rows)\nITEM    QTY\nApples  3\n");

        let outcome = ExtractionOutcome {
            tables: vec![statement()],
            success: true,
            ..Default::default()
        };
        let text = render(&outcome, OutputFormat::Text, ',').unwrap();
        assert!(text.contains("  Total debit:  1,750.50\n"));
        assert!(text.contains("  Total credit: 1,000.00\n"));
    }

    #[test]
    fn test_write_atomic_leaves_only_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("tables.json");

        write_atomic(&path, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_table_csvs() {
        let dir = tempfile::tempdir().unwrap();
        let tables = vec![
            table(&["0", "1"], &[&["a", "b"]], false),
            table(&["X"], &[&["1"]], true),
        ];

        let written = write_table_csvs(dir.path(), &tables, ',').unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[1].ends_with("table_2.csv"));
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "0,1\na,b\n");
    }
}
