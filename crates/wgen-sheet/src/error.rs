//! Error types for row sources.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening or reading tabular input. All of these are
/// batch-fatal; per-row degradation is handled downstream.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The row source could not be opened at all.
    #[error("cannot open row source '{path}': {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be read or decoded.
    #[error("failed to read row: {0}")]
    Read(#[from] csv::Error),

    /// A required logical column is missing from the header.
    #[error("required column '{field}' not found in header {headers:?}")]
    MissingColumn {
        field: &'static str,
        headers: Vec<String>,
    },
}
