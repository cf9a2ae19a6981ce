//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabrecError};

/// Main configuration for the tabrec pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabrecConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Table extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Try to open encrypted PDFs with the empty password.
    pub decrypt_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            decrypt_empty_password: true,
        }
    }
}

/// Which tiers the engine may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Structural, then bank statement, then whitespace.
    #[default]
    Automatic,
    /// Only tables detected by the document layer.
    Structural,
    /// Only bank statement transaction lines.
    BankStatement,
    /// Only whitespace column inference.
    Whitespace,
}

/// What to do when the document layer fails on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abandon the whole job: no tables, failure.
    #[default]
    Abort,
    /// Record the page error and continue with the next page.
    Isolate,
}

/// Table extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Tier selection.
    pub method: ExtractionMethod,

    /// Document-layer failure handling.
    pub failure_policy: FailurePolicy,

    /// Extra noise markers, appended to the built-in set.
    pub noise_markers: Vec<String>,

    /// Whitespace column inference settings.
    pub whitespace: WhitespaceConfig,
}

/// Whitespace column inference configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitespaceConfig {
    /// Number of leading non-empty lines sampled for boundaries.
    pub sample_lines: usize,

    /// Minimum word starts for a sampled line to count as tabular.
    pub min_word_starts: usize,
}

impl Default for WhitespaceConfig {
    fn default() -> Self {
        Self {
            sample_lines: 10,
            min_word_starts: 4,
        }
    }
}

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Field delimiter for CSV output.
    pub csv_delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            csv_delimiter: ',',
        }
    }
}

impl TabrecConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| TabrecError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| TabrecError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TabrecConfig =
            serde_json::from_str(r#"{"extraction": {"method": "bank_statement"}}"#).unwrap();

        assert_eq!(config.extraction.method, ExtractionMethod::BankStatement);
        assert_eq!(config.extraction.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.extraction.whitespace.sample_lines, 10);
        assert_eq!(config.extraction.whitespace.min_word_starts, 4);
        assert_eq!(config.output.csv_delimiter, ',');
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = TabrecConfig::default();
        config.extraction.failure_policy = FailurePolicy::Isolate;
        config.extraction.noise_markers.push("Continued".to_string());
        config.save(&path).unwrap();

        let loaded = TabrecConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_reports_io_and_parse_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = TabrecConfig::from_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(TabrecError::Io(_))));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"extraction\": {\"method\": \"sideways\"}}").unwrap();
        let err = TabrecConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, TabrecError::Config(_)));
        assert!(err.to_string().starts_with("configuration error: "));
    }
}
