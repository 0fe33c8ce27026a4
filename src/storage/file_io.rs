//! File I/O utilities
//!
//! JSON documents are written atomically (temp file, sync, rename) so a
//! crash leaves either the old or the new file. Append-only logs use one
//! JSON object per line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{DayBudgetError, DayBudgetResult};

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> DayBudgetResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        DayBudgetError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        DayBudgetError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> DayBudgetResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DayBudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| DayBudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| DayBudgetError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| DayBudgetError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| DayBudgetError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        DayBudgetError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Append records to a JSONL file, one line each, flushing once
pub fn append_jsonl<T, P>(path: P, records: &[T]) -> DayBudgetResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    if records.is_empty() {
        return Ok(());
    }
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DayBudgetError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    for record in records {
        let json = serde_json::to_string(record)
            .map_err(|e| DayBudgetError::Json(format!("Failed to serialize record: {}", e)))?;
        writeln!(file, "{}", json)
            .map_err(|e| DayBudgetError::Io(format!("Failed to write record: {}", e)))?;
    }

    file.flush()
        .map_err(|e| DayBudgetError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}

/// Read every record of a JSONL file, oldest first
///
/// A missing file reads as empty. Blank lines are skipped.
pub fn read_jsonl<T, P>(path: P) -> DayBudgetResult<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| DayBudgetError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            DayBudgetError::Io(format!("Failed to read line {}: {}", line_num + 1, e))
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            DayBudgetError::Json(format!(
                "Failed to parse {} at line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;
        records.push(record);
    }

    Ok(records)
}
