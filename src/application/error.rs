use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Cents, ParseCentsError, format_cents};
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid number '{input}': {reason}")]
    InvalidNumber {
        input: String,
        reason: ParseCentsError,
    },

    #[error(
        "Insufficient balance: balance {}, required {}",
        format_cents(*balance),
        format_cents(*required)
    )]
    InsufficientBalance { balance: Cents, required: Cents },

    #[error("Could not copy log to {}: {source}", destination.display())]
    ExportFailed {
        destination: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// How serious a failed action is for the person using the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl AppError {
    /// A rejected expense is a warning; everything else is an error.
    pub fn severity(&self) -> Severity {
        match self {
            AppError::InsufficientBalance { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
