//! Batch command - extract tables from multiple documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use tabrec_core::models::config::OutputFormat;
use tabrec_core::models::table::ExtractionOutcome;

use super::{FormatArg, MethodArg, apply_overrides, extract_input, is_supported_input, load_config};
use crate::output::{extension, render, write_atomic};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Output directory, one file per input
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Restrict extraction to one method
    #[arg(short, long, value_enum)]
    method: Option<MethodArg>,

    /// Skip unreadable pages instead of failing the file
    #[arg(long)]
    isolate_pages: bool,

    /// Also write summary.csv
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Option<ExtractionOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, args.method, args.isolate_pages);
    let format: OutputFormat = args.format.map(Into::into).unwrap_or(config.output.format);
    let delimiter = config.output.csv_delimiter;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported_input(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = extract_input(&path, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(outcome) => results.push(FileResult {
                path,
                outcome: Some(outcome),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        outcome: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    progress.abandon();
                    anyhow::bail!("Processing {} failed: {}", path.display(), error_msg);
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Some(outcome) = &result.outcome {
                let stem = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path = output_dir.join(format!("{}.{}", stem, extension(format)));
                write_atomic(&output_path, render(outcome, format, delimiter)?.as_bytes())?;
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    for result in &results {
        let name = display_name(&result.path);
        match (&result.outcome, &result.error) {
            (Some(outcome), _) => println!(
                "  {} {}: {} tables from {} pages",
                style("✓").green(),
                name,
                outcome.tables.len(),
                outcome.pages.len()
            ),
            (None, error) => println!(
                "  {} {}: {}",
                style("✗").red(),
                name,
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed).green(),
        style(failed).red()
    );

    Ok(())
}

fn display_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "filename",
        "status",
        "tables",
        "pages",
        "page_errors",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = display_name(&result.path);
        let time = result.processing_time_ms.to_string();

        if let Some(outcome) = &result.outcome {
            wtr.write_record([
                filename,
                "success",
                &outcome.tables.len().to_string(),
                &outcome.pages.len().to_string(),
                &outcome.errors.len().to_string(),
                &time,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                &time,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    write_atomic(path, &wtr.into_inner()?)?;
    Ok(())
}
