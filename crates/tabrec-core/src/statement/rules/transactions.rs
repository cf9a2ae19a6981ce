//! Transaction line matching for bank statements.

use regex::{Captures, Regex};

use super::patterns::{STATEMENT_DATE, TX_DESCRIPTION_ONLY, TX_WITH_AMOUNT, TX_WITH_BALANCE};
use crate::models::statement::Transaction;

/// Tokens in a description that route the amount to the credit column.
pub const CREDIT_TOKENS: [&str; 2] = ["Cr", "Credit"];

/// Which fields a transaction pattern captures after date and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLayout {
    /// Amount and running balance.
    AmountAndBalance,
    /// Amount only.
    Amount,
    /// No amount.
    DescriptionOnly,
}

/// One entry of the matching cascade.
pub struct TransactionRule {
    pattern: &'static Regex,
    layout: FieldLayout,
}

impl TransactionRule {
    pub fn layout(&self) -> FieldLayout {
        self.layout
    }

    /// Build the transaction from a match of this rule's pattern.
    fn build(&self, caps: &Captures<'_>) -> Transaction {
        let date = caps[1].to_string();
        let description = caps[2].trim().to_string();

        let amount = match self.layout {
            FieldLayout::AmountAndBalance | FieldLayout::Amount => caps[3].trim().to_string(),
            FieldLayout::DescriptionOnly => String::new(),
        };
        let balance = match self.layout {
            FieldLayout::AmountAndBalance => caps[4].trim().to_string(),
            FieldLayout::Amount | FieldLayout::DescriptionOnly => String::new(),
        };

        // The side is decided from the description text alone.
        let (debit, credit) = if is_credit_description(&description) {
            (String::new(), amount)
        } else {
            (amount, String::new())
        };

        Transaction {
            date,
            description,
            debit,
            credit,
            balance,
        }
    }
}

/// Whether a description marks its amount as a credit.
pub fn is_credit_description(description: &str) -> bool {
    CREDIT_TOKENS.iter().any(|token| description.contains(token))
}

/// Ordered transaction pattern cascade, most specific first.
pub struct TransactionMatcher {
    rules: Vec<TransactionRule>,
}

impl TransactionMatcher {
    pub fn new() -> Self {
        Self {
            rules: vec![
                TransactionRule {
                    pattern: &TX_WITH_BALANCE,
                    layout: FieldLayout::AmountAndBalance,
                },
                TransactionRule {
                    pattern: &TX_WITH_AMOUNT,
                    layout: FieldLayout::Amount,
                },
                TransactionRule {
                    pattern: &TX_DESCRIPTION_ONLY,
                    layout: FieldLayout::DescriptionOnly,
                },
            ],
        }
    }

    pub fn rules(&self) -> &[TransactionRule] {
        &self.rules
    }

    /// Match a single line. The first rule whose match also passes the
    /// date-format check wins; later rules are not tried.
    pub fn match_line(&self, line: &str) -> Option<(FieldLayout, Transaction)> {
        self.rules.iter().find_map(|rule| {
            let caps = rule.pattern.captures(line)?;
            let span = caps.get(0)?.as_str();
            if !STATEMENT_DATE.is_match(span) {
                return None;
            }
            Some((rule.layout, rule.build(&caps)))
        })
    }

    /// Match every line in order, skipping lines no rule accepts.
    pub fn match_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Transaction> {
        lines
            .iter()
            .filter_map(|line| self.match_line(line.as_ref()).map(|(_, tx)| tx))
            .collect()
    }
}

impl Default for TransactionMatcher {
    fn default() -> Self {
        Self::new()
    }
}
