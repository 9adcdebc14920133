//! Record sources.
//!
//! The record collection is loaded once at startup, either from the bundled
//! dataset or from a JSONL file, and shared read-only afterwards.

use crate::model::error::InputError;
use crate::model::LogRecord;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Bundled audit log dataset, one JSON record per line.
const BUNDLED_RECORDS: &str = include_str!("../../data/audit_logs.jsonl");

/// Parse JSONL text into records.
///
/// Blank lines are skipped. Any malformed line rejects the whole input,
/// reporting its 1-based line number.
///
/// # Errors
///
/// Returns `InputError::MalformedRecord` for the first line that is not a valid record.
pub fn parse_records(text: &str) -> Result<Vec<LogRecord>, InputError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<LogRecord>(line).map_err(|e| InputError::MalformedRecord {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Load the bundled dataset.
///
/// # Errors
///
/// Only fails if the bundled file itself is malformed.
pub fn bundled() -> Result<Arc<[LogRecord]>, InputError> {
    let records = parse_records(BUNDLED_RECORDS)?;
    debug!(count = records.len(), "Loaded bundled records");
    Ok(records.into())
}

/// Load records from a JSONL file.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist,
/// `InputError::Io` for read failures and `InputError::MalformedRecord`
/// for invalid lines.
pub fn load_file(path: &Path) -> Result<Arc<[LogRecord]>, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let records = parse_records(&contents)?;
    info!(path = %path.display(), count = records.len(), "Loaded records from file");
    Ok(records.into())
}

/// Load records from `data_file` if given, otherwise the bundled dataset.
///
/// # Errors
///
/// See [`load_file`] and [`bundled`].
pub fn load(data_file: Option<&Path>) -> Result<Arc<[LogRecord]>, InputError> {
    match data_file {
        Some(path) => load_file(path),
        None => bundled(),
    }
}
