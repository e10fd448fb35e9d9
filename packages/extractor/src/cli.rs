//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::PhraseConfig;
use crate::error::{ExtractError, Result};
use crate::output::write_records;
use crate::pipeline::Pipeline;
use crate::source::{scan_directory, FormatExtractor};

/// Extract candidate regulatory sentences from EU legislative documents.
#[derive(Parser)]
#[command(name = "eurlex-extract")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing EUR-Lex PDF and/or HTML documents
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path of the output CSV file (e.g. sentences.csv)
    #[arg(short, long)]
    pub output: PathBuf,

    /// YAML file overriding the built-in phrase dictionaries
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    extract_command(&cli.input, &cli.output, cli.config.as_deref())
}

/// Validate the output path: parent directory must exist and the
/// filename must carry a .csv extension.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(ExtractError::InvalidInput(format!(
            "output path is a directory, expected a CSV file: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ExtractError::InvalidInput(format!(
                "output directory does not exist: {}",
                parent.display()
            )));
        }
    }
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(ExtractError::InvalidInput(format!(
            "output file must have a .csv extension: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Execute the extraction command.
fn extract_command(input: &Path, output: &Path, config_path: Option<&Path>) -> Result<()> {
    validate_output_path(output)?;

    let config = match config_path {
        Some(path) => PhraseConfig::load(path)?,
        None => PhraseConfig::default(),
    };

    let pipeline = Pipeline::new(config)?;
    let extractor = FormatExtractor;
    let paths = scan_directory(input)?;

    println!(
        "{} {} document(s) from {}",
        style("Processing").bold(),
        style(paths.len()).cyan(),
        style(input.display()).green()
    );

    let pb = ProgressBar::new(paths.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let (records, summary) = pipeline.process_directory_with(input, &extractor, |path| {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            pb.set_message(name.to_string());
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    write_records(output, &records)?;

    println!();
    println!(
        "  Documents: {} ({} with span, {} without, {} unreadable)",
        summary.documents,
        style(summary.extracted).green(),
        summary.no_span,
        if summary.load_failures > 0 {
            style(summary.load_failures).yellow().bold()
        } else {
            style(summary.load_failures)
        }
    );
    println!("  Sentences: {}", style(summary.records).green());
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output.display()
    );

    Ok(())
}
