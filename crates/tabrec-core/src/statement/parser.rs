//! Bank statement parser combining noise filtering, transaction matching
//! and header metadata.

use tracing::{debug, trace};

use super::rules::{LineClassifier, MetadataExtractor, StatementMetadata, TransactionMatcher};
use crate::engine::TableExtractor;
use crate::models::statement::{STATEMENT_HEADER, Transaction};
use crate::models::table::{RawTable, Tier};

/// Everything the parser found on one page.
#[derive(Debug, Clone, Default)]
pub struct StatementParse {
    /// Matched transactions in line order.
    pub transactions: Vec<Transaction>,
    /// Header metadata in label order.
    pub metadata: StatementMetadata,
    /// Lines skipped as boilerplate.
    pub noise_lines: usize,
}

impl StatementParse {
    /// Header, then one `["", label, value, "", ""]` row per metadata entry,
    /// then the transactions. `None` when nothing followed the header.
    pub fn into_table(self) -> Option<RawTable> {
        let mut table = RawTable::new();
        table.push_row(STATEMENT_HEADER.iter().map(|h| h.to_string()).collect());

        for (label, value) in self.metadata {
            table.push_row(vec![
                String::new(),
                label.as_str().to_string(),
                value,
                String::new(),
                String::new(),
            ]);
        }

        for tx in &self.transactions {
            table.push_row(tx.to_row());
        }

        table.has_data().then_some(table)
    }
}

/// Bank statement parser.
pub struct BankStatementParser {
    classifier: LineClassifier,
    matcher: TransactionMatcher,
    metadata: MetadataExtractor,
}

impl BankStatementParser {
    /// Create a parser with the default noise markers.
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
            matcher: TransactionMatcher::new(),
            metadata: MetadataExtractor::new(),
        }
    }

    /// Use a custom line classifier.
    pub fn with_classifier(mut self, classifier: LineClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Parse a page. Noise lines never reach the matcher; metadata is read
    /// from every line.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> StatementParse {
        let mut transactions = Vec::new();
        let mut noise_lines = 0;

        for line in lines {
            let line = line.as_ref();
            if self.classifier.is_noise(line) {
                noise_lines += 1;
                trace!("Skipping noise line: {}", line);
                continue;
            }
            if let Some((layout, tx)) = self.matcher.match_line(line) {
                trace!("Matched {:?}: {}", layout, line);
                transactions.push(tx);
            }
        }

        let metadata = self.metadata.extract(lines);

        debug!(
            "Bank statement parse: {} transactions, {} metadata fields, {} noise lines",
            transactions.len(),
            metadata.len(),
            noise_lines
        );

        StatementParse {
            transactions,
            metadata,
            noise_lines,
        }
    }
}

impl Default for BankStatementParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for BankStatementParser {
    fn tier(&self) -> Tier {
        Tier::BankStatement
    }

    fn extract(&self, lines: &[String]) -> Option<RawTable> {
        self.parse(lines).into_table()
    }
}
