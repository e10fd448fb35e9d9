//! Command-line interface for the batch runner.

use std::path::PathBuf;

use clap::Parser;
use console::style;

use eurlex_extractor::source::FormatExtractor;
use eurlex_extractor::{PhraseConfig, Pipeline};

use crate::error::Result;
use crate::orchestrator::Orchestrator;

/// Year-partitioned, resumable extraction of regulatory sentences
/// from EU legislative documents.
#[derive(Parser)]
#[command(name = "eurlex-batch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing EUR-Lex PDF and/or HTML documents
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory for per-year CSV artifacts
    #[arg(short, long)]
    pub output: PathBuf,

    /// YAML file overriding the built-in phrase dictionaries
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Continue with the next year when a partition fails
    #[arg(long)]
    pub keep_going: bool,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PhraseConfig::load(path)?,
        None => PhraseConfig::default(),
    };

    let pipeline = Pipeline::new(config)?;
    let extractor = FormatExtractor;
    let orchestrator =
        Orchestrator::new(&pipeline, &extractor, &cli.output).with_keep_going(cli.keep_going);

    println!(
        "{} {} into {}",
        style("Batch extracting").bold(),
        style(cli.input.display()).cyan(),
        style(cli.output.display()).green()
    );

    let summary = orchestrator.run(&cli.input)?;

    println!();
    println!(
        "  Partitions: {} completed, {} resumed, {} failed",
        style(summary.completed).green(),
        summary.resumed,
        if summary.failed > 0 {
            style(summary.failed).yellow().bold()
        } else {
            style(summary.failed)
        }
    );
    println!(
        "  Documents: {} processed, {} skipped",
        style(summary.documents).green(),
        if summary.skipped_documents > 0 {
            style(summary.skipped_documents).yellow().bold()
        } else {
            style(summary.skipped_documents)
        }
    );
    if summary.unpartitioned > 0 {
        println!(
            "  {} document(s) without a CELEX year were not processed",
            style(summary.unpartitioned).yellow()
        );
    }
    println!("  Sentences written: {}", style(summary.records).green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        let cli = Cli::parse_from([
            "eurlex-batch",
            "--input",
            "corpus",
            "--output",
            "artifacts",
        ]);
        assert_eq!(cli.input, PathBuf::from("corpus"));
        assert_eq!(cli.output, PathBuf::from("artifacts"));
        assert!(cli.config.is_none());
        assert!(!cli.keep_going);
    }

    #[test]
    fn test_cli_parse_keep_going() {
        let cli = Cli::parse_from([
            "eurlex-batch",
            "--input",
            "corpus",
            "--output",
            "artifacts",
            "--keep-going",
        ]);
        assert!(cli.keep_going);
    }
}
