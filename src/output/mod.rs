//! Output generation
//!
//! Orders the collected records and writes them as one pretty-printed JSON
//! array. Non-ASCII text is written literally.

use crate::extract::Record;
use crate::ScrapeError;
use std::path::{Path, PathBuf};

/// Sorts records by topic, then question number (missing counts as 0)
///
/// The sort is stable, so records with equal keys keep their input order.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// Serializes records as a 2-space indented JSON array
pub fn render_json(records: &[Record]) -> Result<String, ScrapeError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Sorts and writes `records` to `path`, returning the absolute path written
///
/// The document is rendered completely before the file is touched, so a
/// serialization failure leaves no file behind.
pub fn write_records(mut records: Vec<Record>, path: &Path) -> Result<PathBuf, ScrapeError> {
    sort_records(&mut records);
    let json = render_json(&records)?;

    std::fs::write(path, json).map_err(|source| ScrapeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Wrote {} records to {}", records.len(), path.display());

    Ok(resolve_path(path))
}

/// Absolute form of `path` for the run summary
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Reads an artifact back
pub fn read_records(path: &Path) -> Result<Vec<Record>, ScrapeError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScrapeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
