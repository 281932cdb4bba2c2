//! Error taxonomy for the plotting pipeline.
//!
//! Every variant is fatal: the pipeline aborts on the first error it sees and
//! never retries.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    /// A required input column is missing from the header row.
    #[error("required column `{column}` is missing from the input header")]
    Schema { column: &'static str },

    /// A value could not be coerced to its column's declared type.
    #[error("line {line}: cannot parse `{value}` as {column}")]
    Parse { line: u64, column: &'static str, value: String },

    /// Structural CSV failure (ragged rows, invalid UTF-8, ...).
    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The drawing backend failed before the image reached disk.
    #[error("failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },

    #[error("invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl PlotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io { path: path.into(), source }
    }
}
