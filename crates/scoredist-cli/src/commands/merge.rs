//! Merge command - add newly found categories to the store.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use scoredist_core::{FileOutcome, Merger, PdfExtractor, ScoreStore, candidates};

/// Arguments for the merge command.
#[derive(Args)]
pub struct MergeArgs {
    /// Directory containing the PDF files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// JSON store file (relative paths resolve against the data directory)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Report what would be added without writing the store
    #[arg(long)]
    dry_run: bool,

    /// Abort on the first PDF that cannot be read
    #[arg(long)]
    fail_fast: bool,
}

pub fn run(args: MergeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = super::load_config(config_path)?;

    if let Some(data_dir) = args.data_dir {
        config.paths.data_dir = data_dir;
    }
    if let Some(store) = args.store {
        config.paths.store_file = store;
    }
    if args.fail_fast {
        config.merge.continue_on_error = false;
    }

    let store_path = config.store_path();
    let mut store = ScoreStore::load(&store_path)?;
    info!(
        "Loaded {} existing categories from {}",
        store.len(),
        store_path.display()
    );

    let files = candidates(&config.paths.data_dir)?;
    info!(
        "Found {} PDF files in {}",
        files.len(),
        config.paths.data_dir.display()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let merger = Merger::from_config(PdfExtractor::new(), &config);
    let report = merger.merge_files(&mut store, &files, |file| {
        pb.set_message(file.outcome.category().to_string());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    let added = report.added_count();
    let store_name = store
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| store.path().display().to_string());

    if added == 0 {
        println!("{} No new categories found", style("ℹ").blue());
    } else if args.dry_run {
        println!(
            "{} Would add {} categories to {}: {}",
            style("ℹ").blue(),
            added,
            store_name,
            report.added().join(", ")
        );
    } else {
        store.save()?;
        println!(
            "{} Added {} categories to {}",
            style("✓").green(),
            added,
            store_name
        );
    }

    info!(
        "Processed {} files in {:?} ({} skipped)",
        report.files.len(),
        start.elapsed(),
        report.skipped_count()
    );

    let failed = report.failed();
    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for file in failed {
            if let FileOutcome::Failed { error, .. } = &file.outcome {
                eprintln!("  - {}: {}", file.path.display(), error);
            }
        }
    }

    Ok(())
}
