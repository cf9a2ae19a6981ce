//! Extract command - reconstruct tables from a single document.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use tabrec_core::models::config::OutputFormat;

use super::{FormatArg, MethodArg, apply_overrides, extract_input, load_config};
use crate::output::{render, write_atomic, write_table_csvs};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, form-feed separated text, or "-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write each table to table_<n>.csv in this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Restrict extraction to one method
    #[arg(short, long, value_enum)]
    method: Option<MethodArg>,

    /// Skip pages the document layer cannot read instead of failing
    #[arg(long)]
    isolate_pages: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, args.method, args.isolate_pages);
    let format: OutputFormat = args.format.map(Into::into).unwrap_or(config.output.format);
    let delimiter = config.output.csv_delimiter;

    let outcome = extract_input(&args.input, &config)?;

    for error in &outcome.errors {
        eprintln!(
            "{} Page {}: {}",
            style("!").yellow(),
            error.page,
            error.message
        );
    }

    if let Some(dir) = &args.output_dir {
        let written = write_table_csvs(dir, &outcome.tables, delimiter)?;
        println!(
            "{} Wrote {} tables to {}",
            style("✓").green(),
            written.len(),
            dir.display()
        );
    }

    let rendered = render(&outcome, format, delimiter)?;

    if let Some(output_path) = &args.output {
        write_atomic(output_path, rendered.as_bytes())?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else if args.output_dir.is_none() {
        println!("{}", rendered);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
