//! Year partitioning of a document corpus.
//!
//! Partitions are keyed by the year embedded in the CELEX identifier;
//! `BTreeMap` keeps them in ascending year order, which fixes the
//! processing order across runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use eurlex_extractor::celex_year;

/// Group document paths by CELEX year.
///
/// Returns the partitions plus the paths whose filename stem yields no
/// year; those cannot be assigned to a resumable unit and are reported
/// separately.
#[must_use]
pub fn partition_by_year(paths: &[PathBuf]) -> (BTreeMap<u16, Vec<PathBuf>>, Vec<PathBuf>) {
    let mut partitions: BTreeMap<u16, Vec<PathBuf>> = BTreeMap::new();
    let mut unpartitioned = Vec::new();

    for path in paths {
        let year = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(celex_year);
        match year {
            Some(year) => partitions.entry(year).or_default().push(path.clone()),
            None => unpartitioned.push(path.clone()),
        }
    }

    (partitions, unpartitioned)
}
