//! Column inference from whitespace alignment.
//!
//! Fallback tier for pages with no structural table and no bank statement
//! lines. Column boundaries are estimated from where words start on the
//! first sampled lines, then every non-empty line is cut at those offsets.
//! Offsets count characters, not bytes.
//!
//! The estimate assumes boundaries are stable across the sample. Narrative
//! text before the table skews it; that is a known limitation.

use tracing::debug;

use crate::engine::TableExtractor;
use crate::models::config::WhitespaceConfig;
use crate::models::table::{RawTable, Tier};

/// Character offsets at which maximal runs of non-whitespace begin.
pub fn word_starts(line: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut prev_is_space = true;

    for (i, c) in line.chars().enumerate() {
        let is_space = c.is_whitespace();
        if !is_space && prev_is_space {
            starts.push(i);
        }
        prev_is_space = is_space;
    }

    starts
}

/// Per-page column split offsets, frozen once inferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBoundarySet {
    offsets: Vec<usize>,
}

impl ColumnBoundarySet {
    /// Average the i-th word start over every sample that has one.
    pub fn from_samples(samples: &[Vec<usize>]) -> Option<Self> {
        let max_len = samples.iter().map(Vec::len).max()?;

        let offsets = (0..max_len)
            .filter_map(|i| {
                let column: Vec<usize> = samples.iter().filter_map(|s| s.get(i).copied()).collect();
                if column.is_empty() {
                    None
                } else {
                    Some(column.iter().sum::<usize>() / column.len())
                }
            })
            .collect();

        Some(Self { offsets })
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Cut `line` at the boundaries.
    ///
    /// Each boundary closes the cell started at the previous one. A boundary
    /// past the end of the line yields an empty cell. Whatever follows the
    /// last boundary becomes one trailing cell.
    pub fn slice(&self, line: &str) -> Vec<String> {
        let chars: Vec<char> = line.chars().collect();
        let len = chars.len();
        let mut row = Vec::with_capacity(self.offsets.len() + 1);
        let mut last = 0;

        for &boundary in &self.offsets {
            if boundary > len {
                row.push(String::new());
                continue;
            }
            // Averaged boundaries are not guaranteed to increase.
            let cell = if boundary >= last {
                trimmed(&chars[last..boundary])
            } else {
                String::new()
            };
            row.push(cell);
            last = boundary;
        }

        if last < len {
            row.push(trimmed(&chars[last..]));
        }

        row
    }
}

fn trimmed(chars: &[char]) -> String {
    chars.iter().collect::<String>().trim().to_string()
}

/// Whitespace column inferencer.
pub struct WhitespaceInferencer {
    sample_lines: usize,
    min_word_starts: usize,
}

impl WhitespaceInferencer {
    /// Sample 10 lines, keep lines with at least 4 words.
    pub fn new() -> Self {
        Self::from_config(&WhitespaceConfig::default())
    }

    pub fn from_config(config: &WhitespaceConfig) -> Self {
        Self {
            sample_lines: config.sample_lines,
            min_word_starts: config.min_word_starts,
        }
    }

    /// Infer boundaries from the first non-empty lines of a page.
    pub fn infer_boundaries<S: AsRef<str>>(&self, lines: &[S]) -> Option<ColumnBoundarySet> {
        let samples: Vec<Vec<usize>> = lines
            .iter()
            .map(AsRef::as_ref)
            .filter(|line| !line.trim().is_empty())
            .take(self.sample_lines)
            .map(word_starts)
            .filter(|starts| starts.len() >= self.min_word_starts)
            .collect();

        if samples.is_empty() {
            debug!("No sampled line has {} or more words", self.min_word_starts);
            return None;
        }

        let boundaries = ColumnBoundarySet::from_samples(&samples)?;
        debug!(
            "Inferred {} column boundaries from {} sampled lines: {:?}",
            boundaries.offsets.len(),
            samples.len(),
            boundaries.offsets
        );
        Some(boundaries)
    }

    /// Slice every non-empty line of the page with one boundary set.
    pub fn infer<S: AsRef<str>>(&self, lines: &[S]) -> Option<RawTable> {
        let boundaries = self.infer_boundaries(lines)?;

        let mut table = RawTable::new();
        for line in lines.iter().map(AsRef::as_ref) {
            if line.trim().is_empty() {
                continue;
            }
            table.push_row(boundaries.slice(line));
        }

        if table.is_empty() { None } else { Some(table) }
    }
}

impl Default for WhitespaceInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for WhitespaceInferencer {
    fn tier(&self) -> Tier {
        Tier::Whitespace
    }

    fn extract(&self, lines: &[String]) -> Option<RawTable> {
        self.infer(lines)
    }
}
