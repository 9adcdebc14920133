//! Error types for logview.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions into the top-level [`AppError`].
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all shell failures
//!   - [`InputError`] - Record file reading/parsing failures
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber initialization failures
//!
//! # What is NOT an error
//!
//! Query strings never produce errors. Malformed view parameters fall back to their
//! defaults during decoding, and the simulated `error` data state is a display mode,
//! not a fault.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes of the shell.
///
/// # Examples
///
/// ```no_run
/// use logview::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _records = load_records()?;
///     Ok(())
/// }
/// # fn load_records() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load the record collection.
    ///
    /// **Recovery**: none - the view needs the full collection. Exit with non-zero status.
    #[error("Failed to load records: {0}")]
    Input(#[from] InputError),

    /// Failed to load configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to initialize logging.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Failed to write the rendered view to stdout.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when loading log records.
///
/// Unlike view parameters, records are not forgiving: a collection with a malformed
/// line is rejected as a whole, because every page count derived from a partial
/// collection would be silently wrong.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified record file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use logview::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// A line is not a valid log record.
    ///
    /// # Examples
    ///
    /// ```
    /// use logview::model::error::InputError;
    ///
    /// let err = InputError::MalformedRecord {
    ///     line: 7,
    ///     message: "missing field `user`".to_string(),
    /// };
    /// assert!(err.to_string().contains("line 7"));
    /// ```
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord {
        /// The 1-based line number where parsing failed.
        line: usize,
        /// The JSON parser error message.
        message: String,
    },

    /// Generic I/O error reading the record file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
