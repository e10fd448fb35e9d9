//! CSV output writer.
//!
//! Records are written to a temporary sibling file and renamed into
//! place, so an interrupted run never leaves a partial artifact. The
//! batch orchestrator relies on this: artifact presence means the
//! partition completed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};
use crate::types::OutputRecord;

/// Output column order, matching the corpus schema.
pub const COLUMNS: [&str; 6] = [
    "celex",
    "sent",
    "deontic",
    "word_count",
    "sent_count",
    "doc_format",
];

/// Write records to a CSV file.
///
/// The header row is always written, so an empty record set still
/// produces a valid (header-only) artifact.
pub fn write_records(path: &Path, records: &[OutputRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ExtractError::InvalidInput(format!(
                "output directory does not exist: {}",
                parent.display()
            )));
        }
    }

    let tmp = tmp_path(path);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&tmp)?;
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp, path)?;
    Ok(())
}

/// Temporary sibling path for atomic writes.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
