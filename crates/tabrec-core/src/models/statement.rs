//! Bank statement data models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statement::rules::amounts::{parse_amount, parse_balance};

/// Fixed header of a bank statement table.
pub const STATEMENT_HEADER: [&str; 5] = ["Date", "Description", "Debit", "Credit", "Balance"];

/// One transaction line of a bank statement.
///
/// All fields keep the text as printed; typed accessors parse on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Posting date, e.g. `01-Jan-2024`.
    pub date: String,
    pub description: String,
    /// Debit amount, empty when the amount was routed to credit.
    pub debit: String,
    /// Credit amount, empty when the amount was routed to debit.
    pub credit: String,
    /// Running balance, possibly suffixed with `Dr`/`Cr`.
    pub balance: String,
}

impl Transaction {
    /// The five cells in header order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.description.clone(),
            self.debit.clone(),
            self.credit.clone(),
            self.balance.clone(),
        ]
    }

    /// Rebuild a transaction from a row in header order. Returns `None` on a
    /// row with the wrong width or an injected metadata row (empty date).
    pub fn from_row(row: &[String]) -> Option<Self> {
        match row {
            [date, description, debit, credit, balance] if !date.is_empty() => Some(Self {
                date: date.clone(),
                description: description.clone(),
                debit: debit.clone(),
                credit: credit.clone(),
                balance: balance.clone(),
            }),
            _ => None,
        }
    }

    /// Parsed posting date. `None` for shapes like `31-Foo-2024` that pass
    /// the line pattern but are not calendar dates.
    pub fn posting_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%d-%b-%Y").ok()
    }

    /// Parsed debit amount.
    pub fn debit_amount(&self) -> Option<Decimal> {
        parse_amount(&self.debit)
    }

    /// Parsed credit amount.
    pub fn credit_amount(&self) -> Option<Decimal> {
        parse_amount(&self.credit)
    }

    /// Parsed balance with its side marker.
    pub fn balance_value(&self) -> Option<(Decimal, BalanceSide)> {
        parse_balance(&self.balance)
    }
}

/// Side marker printed after a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSide {
    /// `Dr` suffix.
    Debit,
    /// `Cr` suffix.
    Credit,
    /// No suffix.
    Unmarked,
}

/// Labels the metadata extractor knows about, in injection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataLabel {
    AccountNumber,
    AccountName,
    AccountHolder,
    OpenDate,
    InterestRate,
    StatementPeriod,
}

impl MetadataLabel {
    /// Every label in pattern order.
    pub const ALL: [MetadataLabel; 6] = [
        MetadataLabel::AccountNumber,
        MetadataLabel::AccountName,
        MetadataLabel::AccountHolder,
        MetadataLabel::OpenDate,
        MetadataLabel::InterestRate,
        MetadataLabel::StatementPeriod,
    ];

    /// Human-readable label written into tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataLabel::AccountNumber => "Account Number",
            MetadataLabel::AccountName => "Account Name",
            MetadataLabel::AccountHolder => "Account Holder",
            MetadataLabel::OpenDate => "Open Date",
            MetadataLabel::InterestRate => "Interest Rate",
            MetadataLabel::StatementPeriod => "Statement Period",
        }
    }
}

impl fmt::Display for MetadataLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
