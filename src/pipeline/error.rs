//! Error types for the cleaning pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the cleaning stages and output writers.
///
/// Only `InputNotFound` and `NoWorkableFormat` come from the loader's own
/// checks; the rest wrap failures from the underlying libraries.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// No (encoding, delimiter) trial produced a table wide enough to accept.
    #[error(
        "Could not load {}: none of the {attempts} encoding/delimiter combinations produced more than {min_columns} columns (widest: {best_width}){}",
        .path.display(),
        parse_note(.last_parse_error)
    )]
    NoWorkableFormat {
        path: PathBuf,
        attempts: usize,
        min_columns: usize,
        best_width: usize,
        last_parse_error: Option<String>,
    },

    /// The spreadsheet copy was requested but the crate was built without it.
    #[error("XLSX output is not available in this build (enable the `xlsx` feature)")]
    XlsxUnavailable,

    #[cfg(feature = "xlsx")]
    #[error("XLSX write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CleanResult<T> = Result<T, CleanError>;

fn parse_note(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!("; last parse error: {}", reason),
        None => String::new(),
    }
}
