//! Labeled account metadata from statement header lines.

use indexmap::IndexMap;
use regex::Regex;

use super::patterns::{
    ACCOUNT_HOLDER, ACCOUNT_NAME, ACCOUNT_NUMBER, INTEREST_RATE, OPEN_DATE, STATEMENT_PERIOD,
};
use crate::models::statement::MetadataLabel;

/// Extracted metadata, keyed in [`MetadataLabel::ALL`] order.
pub type StatementMetadata = IndexMap<MetadataLabel, String>;

/// Metadata extractor over the fixed label set.
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    fn pattern(label: MetadataLabel) -> &'static Regex {
        match label {
            MetadataLabel::AccountNumber => &ACCOUNT_NUMBER,
            MetadataLabel::AccountName => &ACCOUNT_NAME,
            MetadataLabel::AccountHolder => &ACCOUNT_HOLDER,
            MetadataLabel::OpenDate => &OPEN_DATE,
            MetadataLabel::InterestRate => &INTEREST_RATE,
            MetadataLabel::StatementPeriod => &STATEMENT_PERIOD,
        }
    }

    /// Every label found in `line`. Labels are not mutually exclusive.
    pub fn extract_line(&self, line: &str) -> Vec<(MetadataLabel, String)> {
        MetadataLabel::ALL
            .iter()
            .filter_map(|&label| {
                Self::pattern(label)
                    .captures(line)
                    .map(|caps| (label, caps[1].trim().to_string()))
            })
            .collect()
    }

    /// Scan all lines. The last matching line wins for each label.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> StatementMetadata {
        let mut found: Vec<Option<String>> = vec![None; MetadataLabel::ALL.len()];

        for line in lines {
            for (label, value) in self.extract_line(line.as_ref()) {
                found[label as usize] = Some(value);
            }
        }

        MetadataLabel::ALL
            .iter()
            .zip(found)
            .filter_map(|(&label, value)| value.map(|v| (label, v)))
            .collect()
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}
