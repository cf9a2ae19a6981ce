//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use tabrec_core::models::config::{
    ExtractionMethod, FailurePolicy, OutputFormat, TabrecConfig,
};
use tabrec_core::models::table::ExtractionOutcome;
use tabrec_core::pdf::{PdfExtractor, TextSource};
use tabrec_core::{ExtractionError, TableEngine, TabrecError};

/// Output format flag.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// CSV output, one block per table
    Csv,
    /// Aligned plain text with statement totals
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

/// Extraction method flag.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum MethodArg {
    /// Structural, then bank statement, then whitespace
    Automatic,
    /// Only tables found by the document layer
    Structural,
    /// Only bank statement transaction lines
    BankStatement,
    /// Only whitespace column inference
    Whitespace,
}

impl From<MethodArg> for ExtractionMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Automatic => ExtractionMethod::Automatic,
            MethodArg::Structural => ExtractionMethod::Structural,
            MethodArg::BankStatement => ExtractionMethod::BankStatement,
            MethodArg::Whitespace => ExtractionMethod::Whitespace,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabrec")
        .join("config.json")
}

/// Load the config from `--config`, else the default location, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TabrecConfig> {
    if let Some(path) = config_path {
        return Ok(TabrecConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(TabrecConfig::from_file(&default_path)?)
    } else {
        Ok(TabrecConfig::default())
    }
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &mut TabrecConfig, method: Option<MethodArg>, isolate_pages: bool) {
    if let Some(method) = method {
        config.extraction.method = method.into();
    }
    if isolate_pages {
        config.extraction.failure_policy = FailurePolicy::Isolate;
    }
}

/// Whether a path looks like an input the extractor can read.
pub fn is_supported_input(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
}

/// Run the engine over a PDF, a form-feed separated text file, or stdin (`-`).
///
/// A pass that yields no tables is an error.
pub fn extract_input(input: &Path, config: &TabrecConfig) -> anyhow::Result<ExtractionOutcome> {
    if input != Path::new("-") && !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if input != Path::new("-") && !matches!(extension.as_str(), "pdf" | "txt") {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Processing file: {}", input.display());

    run_engine(input, &extension, config).map_err(|e| match e {
        TabrecError::Extraction(ExtractionError::NoTables) => {
            anyhow::anyhow!("No tables were detected in {}", input.display())
        }
        other => anyhow::Error::new(other)
            .context(format!("Extraction failed for {}", input.display())),
    })
}

fn run_engine(
    input: &Path,
    extension: &str,
    config: &TabrecConfig,
) -> tabrec_core::Result<ExtractionOutcome> {
    let engine = TableEngine::from_config(config);

    if extension == "pdf" {
        let data = fs::read(input)?;
        let mut extractor = PdfExtractor::with_config(&config.pdf);
        extractor.load(&data)?;
        return engine.run(&mut extractor);
    }

    let text = if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(input)?
    };
    let mut source = TextSource::new(&text);
    engine.run(&mut source)
}
