//! Document source: directory scanning and raw text extraction.
//!
//! Text extraction from PDF and HTML sits behind the
//! [`TextExtractor`] trait so the pipeline and its tests can swap in
//! a fake. The default [`FormatExtractor`] delegates to `pdf-extract`
//! and `scraper` and normalises the result to NFKC, which folds the
//! typographic ligatures PDF extraction tends to produce.

use std::fs;
use std::path::{Path, PathBuf};

use scraper::Html;
use unicode_normalization::UnicodeNormalization;

use crate::error::{ExtractError, Result};
use crate::types::{DocFormat, Document};

/// Opaque raw-text extraction capability.
pub trait TextExtractor {
    /// Extract the full text of a document.
    ///
    /// This is a blocking call with no timeout; a hung extraction in
    /// the underlying library is an accepted risk.
    fn extract(&self, path: &Path, format: DocFormat) -> Result<String>;
}

/// Default extractor dispatching on document format.
#[derive(Debug, Default)]
pub struct FormatExtractor;

impl TextExtractor for FormatExtractor {
    fn extract(&self, path: &Path, format: DocFormat) -> Result<String> {
        let text = match format {
            DocFormat::Html => {
                let bytes = fs::read(path)?;
                let html = String::from_utf8_lossy(&bytes);
                Html::parse_document(&html)
                    .root_element()
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            DocFormat::Pdf => {
                pdf_extract::extract_text(path).map_err(|e| ExtractError::Load {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
        };

        Ok(text.nfkc().collect())
    }
}

/// List processable documents in a directory, in deterministic
/// (filename-sorted) order.
///
/// Non-document files are ignored; an empty result is not an error.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ExtractError::InvalidInput(format!(
            "input directory does not exist or is not a directory: {}",
            dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && DocFormat::from_path(path).is_some())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Load a single document: identifier from the filename stem, format
/// from the extension, raw text via the given extractor.
pub fn load_document(path: &Path, extractor: &dyn TextExtractor) -> Result<Document> {
    let format = DocFormat::from_path(path).ok_or_else(|| {
        ExtractError::InvalidInput(format!("unsupported document type: {}", path.display()))
    })?;

    let celex = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ExtractError::InvalidInput(format!("unreadable filename: {}", path.display()))
        })?;

    let raw_text = extractor.extract(path, format)?;

    Ok(Document {
        celex,
        raw_text,
        format,
    })
}
