use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATEMENT: &str = "\
XYZ BANK NAME LIMITED
Account No : 1234567890
01-Jan-2024  Salary Credit  1,000.00  5,000.00
02-Jan-2024  ATM Withdrawal  500.00
Page No 1
";

const ALIGNED: &str = "\
Region   Q1    Q2    Q3
North    10    12    15
South    8     9     11
";

/// A `tabrec` command isolated from the user's config directory.
fn tabrec(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tabrec").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("HOME", home.path());
    cmd
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_extract_text_file_as_json() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "statement.txt", STATEMENT);

    tabrec(&home)
        .args(["extract", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("\"tier\": \"bank_statement\""))
        .stdout(predicate::str::contains("Salary Credit"))
        .stdout(predicate::str::contains("XYZ BANK").not());
}

#[test]
fn test_extract_text_format_shows_totals() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "statement.txt", STATEMENT);

    tabrec(&home)
        .args(["extract", &input, "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Table 1 (5 columns, 4 rows)"))
        .stdout(predicate::str::contains("Total debit:  500.00"))
        .stdout(predicate::str::contains("Total credit: 1,000.00"));
}

#[test]
fn test_extract_from_stdin_as_csv() {
    let home = TempDir::new().unwrap();

    tabrec(&home)
        .args(["extract", "-", "--format", "csv"])
        .write_stdin(ALIGNED)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0,1,2,3,4\n"))
        .stdout(predicate::str::contains(",North,10,12,15\n"));
}

#[test]
fn test_extract_output_dir_writes_one_csv_per_table() {
    let home = TempDir::new().unwrap();
    let text = format!("{}\x0c{}", STATEMENT, ALIGNED);
    let input = write_fixture(home.path(), "two_pages.txt", &text);
    let out_dir = home.path().join("tables");

    tabrec(&home)
        .args(["extract", &input, "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 tables"));

    let first = fs::read_to_string(out_dir.join("table_1.csv")).unwrap();
    assert!(first.starts_with("0,1,2,3,4\nDate,Description,Debit,Credit,Balance\n"));
    assert!(out_dir.join("table_2.csv").exists());
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 2);
}

#[test]
fn test_extract_output_file() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "aligned.txt", ALIGNED);
    let output = home.path().join("out.json");

    tabrec(&home)
        .args(["extract", &input, "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["tables"][0]["rows"][1][1], "North");
}

#[test]
fn test_method_flag_restricts_tiers() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "aligned.txt", ALIGNED);

    tabrec(&home)
        .args(["extract", &input, "--method", "bank-statement"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tables were detected"));
}

#[test]
fn test_extract_missing_file() {
    let home = TempDir::new().unwrap();

    tabrec(&home)
        .args(["extract", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_rejects_unknown_extension() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "table.docx", ALIGNED);

    tabrec(&home)
        .args(["extract", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format: docx"));
}

#[test]
fn test_extract_invalid_pdf() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "broken.pdf", "not a pdf");

    tabrec(&home)
        .args(["extract", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse PDF"));
}

#[test]
fn test_config_show_defaults() {
    let home = TempDir::new().unwrap();

    tabrec(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"failure_policy\": \"abort\""))
        .stdout(predicate::str::contains("\"sample_lines\": 10"));
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("tabrec.json");
    let config = config.to_str().unwrap();

    tabrec(&home)
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    tabrec(&home)
        .args(["--config", config, "config", "set", "extraction.failure_policy", "isolate"])
        .assert()
        .success();

    tabrec(&home)
        .args(["--config", config, "config", "get", "extraction.failure_policy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isolate\""));

    tabrec(&home)
        .args(["--config", config, "config", "set", "extraction.method", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for extraction.method"));

    tabrec(&home)
        .args(["--config", config, "config", "get", "extraction.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_batch_with_summary() {
    let home = TempDir::new().unwrap();
    let docs = home.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    write_fixture(&docs, "a_statement.txt", STATEMENT);
    write_fixture(&docs, "b_aligned.txt", ALIGNED);
    write_fixture(&docs, "c_letter.txt", "Dear customer,\nThank you.\n");
    let out_dir = home.path().join("out");
    let pattern = format!("{}/*.txt", docs.display());

    tabrec(&home)
        .args(["batch", &pattern, "--continue-on-error", "--summary", "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("c_letter.txt: No tables were detected"));

    assert!(out_dir.join("a_statement.json").exists());
    assert!(out_dir.join("b_aligned.json").exists());
    assert!(!out_dir.join("c_letter.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,tables,pages,page_errors,processing_time_ms,error\n"));
    assert!(summary.contains("c_letter.txt,error,"));
}

#[test]
fn test_batch_stops_on_first_error() {
    let home = TempDir::new().unwrap();
    write_fixture(home.path(), "letter.txt", "Dear customer,\nThank you.\n");
    let pattern = format!("{}/*.txt", home.path().display());

    tabrec(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tables were detected"));
}

#[test]
fn test_batch_summary_keeps_error_cause() {
    let home = TempDir::new().unwrap();
    let docs = home.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    write_fixture(&docs, "a_broken.pdf", "not a pdf");
    write_fixture(&docs, "b_aligned.txt", ALIGNED);
    let pattern = format!("{}/*", docs.display());

    tabrec(&home)
        .args(["batch", &pattern, "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a_broken.pdf: Extraction failed for"))
        .stdout(predicate::str::contains("failed to parse PDF"));
}

#[test]
fn test_extract_metadata_only_page() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(
        home.path(),
        "header.txt",
        "Account No : 1234567890\nInterest Rate : 3.5% per annum\n",
    );

    tabrec(&home)
        .args(["extract", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tier\": \"bank_statement\""))
        .stdout(predicate::str::contains("3.5% per annum"));
}
