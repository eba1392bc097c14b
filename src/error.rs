//! Error types for grid setup and persistence.

use std::fmt;
use std::io;

/// Invalid board geometry in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Grid step must be strictly positive.
    NonPositiveStep(i32),
    /// Board size is not a whole number of steps.
    Misaligned {
        /// Requested board edge length.
        board_size: i32,
        /// Requested grid step.
        step: i32,
    },
    /// Board leaves no room for a single cell inside the margins.
    TooSmall {
        /// Requested board edge length.
        board_size: i32,
        /// Requested grid step.
        step: i32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::NonPositiveStep(step) => write!(f, "grid step must be positive, got {step}"),
            GridError::Misaligned { board_size, step } => {
                write!(f, "board size {board_size} is not a multiple of step {step}")
            }
            GridError::TooSmall { board_size, step } => {
                write!(f, "board size {board_size} leaves no cells for step {step}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Failure reading or writing a key-value store backend.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying file access failed.
    Io(io::Error),
    /// Stored document is not a flat JSON object of strings.
    Json(serde_json::Error),
    /// Browser storage rejected the operation.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "store i/o error: {err}"),
            StoreError::Json(err) => write!(f, "store json error: {err}"),
            StoreError::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Json(err) => Some(err),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
