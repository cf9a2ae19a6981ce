//! Common regex patterns for bank statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Posting date: 01-Jan-2024
    pub static ref STATEMENT_DATE: Regex = Regex::new(
        r"\d{2}-[A-Za-z]{3}-\d{4}"
    ).unwrap();

    // Transaction lines, most specific first.
    // date, description, amount, balance (optional Dr/Cr suffix)
    pub static ref TX_WITH_BALANCE: Regex = Regex::new(
        r"(\d{2}-[A-Za-z]{3}-\d{4})\s+(.*?)(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)\s+(\d{1,3}(?:,\d{3})*(?:\.\d{2})?(?:Dr|Cr)?)"
    ).unwrap();

    // date, description, amount
    pub static ref TX_WITH_AMOUNT: Regex = Regex::new(
        r"(\d{2}-[A-Za-z]{3}-\d{4})\s+(.*?)(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)"
    ).unwrap();

    // date, description
    pub static ref TX_DESCRIPTION_ONLY: Regex = Regex::new(
        r"(\d{2}-[A-Za-z]{3}-\d{4})\s+([A-Za-z].*)"
    ).unwrap();

    // Printed amounts: 1,000.00 or 5,000.00Cr
    pub static ref AMOUNT: Regex = Regex::new(
        r"^(\d{1,3}(?:,\d{3})*|\d+)(?:\.(\d{2}))?(Dr|Cr)?$"
    ).unwrap();

    // Header metadata
    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(
        r"Account\s+No\s*:\s*([0-9]+)"
    ).unwrap();

    pub static ref ACCOUNT_NAME: Regex = Regex::new(
        r"A/C\s+Name\s*:\s*(.+)"
    ).unwrap();

    pub static ref ACCOUNT_HOLDER: Regex = Regex::new(
        r"A/C\s+Holder\s*:\s*(.+)"
    ).unwrap();

    pub static ref OPEN_DATE: Regex = Regex::new(
        r"Open\s+Date\s*:\s*(.+)"
    ).unwrap();

    pub static ref INTEREST_RATE: Regex = Regex::new(
        r"Interest\s+Rate\s*:\s*(.+)"
    ).unwrap();

    pub static ref STATEMENT_PERIOD: Regex = Regex::new(
        r"Statement\s+of\s+account\s+for\s+the\s+period\s+of\s+(.+)"
    ).unwrap();
}
