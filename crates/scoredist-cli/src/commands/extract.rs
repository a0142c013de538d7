//! Extract command - parse a single PDF and print the resulting record.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use scoredist_core::{Merger, PdfExtractor};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let merger = Merger::from_config(PdfExtractor::new(), &config);
    let record = merger.extract_file(&args.input)?;

    if record.score_data.is_empty() {
        eprintln!(
            "{} No score rows found for {}",
            style("⚠").yellow(),
            record.category
        );
    }

    let output = serde_json::to_string_pretty(&record)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} rows for {} written to {}",
            style("✓").green(),
            record.score_data.len(),
            record.category,
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
