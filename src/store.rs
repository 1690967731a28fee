//! Whole-file JSON record writes.

use crate::error::{JournalError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with the pretty JSON form of `value`.
///
/// The JSON is written to a temporary file in the same directory and then
/// renamed over `path`, so readers see either the old file or the new one.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| JournalError::io(dir, e))?;

    let json = serde_json::to_vec_pretty(value).map_err(|e| JournalError::format(path, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| JournalError::io(dir, e))?;
    tmp.write_all(&json)
        .map_err(|e| JournalError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| JournalError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| JournalError::io(path, e.error))?;
    Ok(())
}
