//! Resumability tests for the batch orchestrator.
//!
//! Simulates interrupted and repeated runs over an on-disk corpus and
//! checks that completed years are never reprocessed while missing
//! years are rebuilt identically.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

use eurlex_batch::Orchestrator;
use eurlex_extractor::source::FormatExtractor;
use eurlex_extractor::{PhraseConfig, Pipeline};

fn write_doc(dir: &Path, name: &str, body: &str) {
    fs::write(
        dir.join(name),
        format!(
            "<html><body><p>HAS ADOPTED THIS REGULATION:</p>\
             <p>{body}</p><p>Done at Brussels.</p></body></html>"
        ),
    )
    .unwrap();
}

fn write_corpus(dir: &Path) {
    write_doc(dir, "32019R0001.html", "Operators shall register annually.");
    write_doc(dir, "32019R0002.html", "Suppliers must keep records of sales.");
    write_doc(dir, "32020R0003.html", "Importers shall declare the origin of goods.");
}

#[test]
fn test_interrupted_run_resumes_identically() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_corpus(input.path());

    let pipeline = Pipeline::new(PhraseConfig::default()).unwrap();
    let orchestrator = Orchestrator::new(&pipeline, &FormatExtractor, output.path());

    // Uninterrupted reference run
    let summary = orchestrator.run(input.path()).unwrap();
    assert_eq!(summary.completed, 2);
    let reference_2019 = fs::read(output.path().join("sentences_2019.csv")).unwrap();
    let reference_2020 = fs::read(output.path().join("sentences_2020.csv")).unwrap();

    // Simulate a crash after 2019 completed: 2020's artifact is gone
    fs::remove_file(output.path().join("sentences_2020.csv")).unwrap();

    let summary = orchestrator.run(input.path()).unwrap();
    assert_eq!(summary.resumed, 1);
    assert_eq!(summary.completed, 1);

    assert_eq!(
        fs::read(output.path().join("sentences_2019.csv")).unwrap(),
        reference_2019
    );
    assert_eq!(
        fs::read(output.path().join("sentences_2020.csv")).unwrap(),
        reference_2020
    );
}

#[test]
fn test_completed_year_is_never_touched() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_corpus(input.path());

    // Pre-existing artifact with sentinel content stands in for a
    // previous run's output
    fs::write(output.path().join("sentences_2019.csv"), "sentinel").unwrap();

    let pipeline = Pipeline::new(PhraseConfig::default()).unwrap();
    let orchestrator = Orchestrator::new(&pipeline, &FormatExtractor, output.path());
    let summary = orchestrator.run(input.path()).unwrap();

    assert_eq!(summary.resumed, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(
        fs::read_to_string(output.path().join("sentences_2019.csv")).unwrap(),
        "sentinel"
    );
    assert!(output.path().join("sentences_2020.csv").exists());
}

#[test]
fn test_rerun_after_completion_is_a_no_op() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_corpus(input.path());

    let pipeline = Pipeline::new(PhraseConfig::default()).unwrap();
    let orchestrator = Orchestrator::new(&pipeline, &FormatExtractor, output.path());

    let first = orchestrator.run(input.path()).unwrap();
    assert_eq!(first.completed, 2);

    let second = orchestrator.run(input.path()).unwrap();
    assert_eq!(second.completed, 0);
    assert_eq!(second.resumed, 2);
    assert_eq!(second.records, 0);
    assert_eq!(second.documents, 0);
}

#[test]
fn test_summary_counts_processed_and_skipped_documents() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_corpus(input.path());
    fs::write(input.path().join("32020R0004.pdf"), "not a pdf").unwrap();

    let pipeline = Pipeline::new(PhraseConfig::default()).unwrap();
    let orchestrator = Orchestrator::new(&pipeline, &FormatExtractor, output.path());
    let summary = orchestrator.run(input.path()).unwrap();

    assert_eq!(summary.documents, 4);
    assert_eq!(summary.skipped_documents, 1);
    assert_eq!(summary.records, 3);
}

#[test]
fn test_cli_batch_run() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_corpus(input.path());

    Command::cargo_bin("eurlex-batch")
        .unwrap()
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents: 3 processed"));

    assert!(output.path().join("sentences_2019.csv").exists());
    assert!(output.path().join("sentences_2020.csv").exists());

    let content = fs::read_to_string(output.path().join("sentences_2019.csv")).unwrap();
    assert!(content.starts_with("celex,sent,deontic,word_count,sent_count,doc_format"));
    assert!(content.contains("32019R0001"));
    assert!(content.contains("32019R0002"));
}

#[test]
fn test_cli_missing_input_directory_fails() {
    let output = tempfile::tempdir().unwrap();
    Command::cargo_bin("eurlex-batch")
        .unwrap()
        .arg("--input")
        .arg("/nonexistent/corpus")
        .arg("--output")
        .arg(output.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}
