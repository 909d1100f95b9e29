/*!
# Error System

Library error type. Detection results are never errors; only invalid
inputs to the public API and I/O / configuration failures end up here.
*/

use std::path::PathBuf;
use thiserror::Error;

pub type DedupResult<T> = Result<T, DedupError>;

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Unsupported file type: {0} (expected md, markdown, yaml or yml)")]
    UnsupportedFileType(String),

    #[error("Similarity threshold {0} is out of range (expected 50-100)")]
    InvalidThreshold(i64),

    #[error("Invalid line number {0} (lines are numbered from 1)")]
    InvalidLineNumber(usize),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(String),
}

impl DedupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DedupError::Io {
            path: path.into(),
            source,
        }
    }
}
