//! Error handling

use std::path::PathBuf;
use thiserror::Error;

pub type KddResult<T> = Result<T, KddError>;

#[derive(Debug, Error)]
pub enum KddError {
    // Input errors
    #[error("Data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    // Label errors
    #[error("Unknown attack label '{label}' ({count} rows)")]
    UnknownLabel { label: String, count: usize },

    // Transform errors
    #[error("{0} used before fit")]
    UninitializedTransform(&'static str),

    // Table errors
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Wrapped errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl KddError {
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        KddError::Parse {
            line,
            message: message.into(),
        }
    }
}
