use serde::Serialize;

use crate::domain::{TransactionKind, TransactionRecord};

use super::{AppError, ExportOutcome, Severity};

/// Notification level shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Level::Warning,
            Severity::Error => Level::Error,
        }
    }
}

/// A presentation-neutral message describing the outcome of an action.
/// Front-ends render it as a dialog, a status line or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub message: String,
    /// Underlying cause, when there is one worth showing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notice {
    fn new(level: Level, title: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.into(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn recorded(record: &TransactionRecord) -> Self {
        let message = match record.kind {
            TransactionKind::SetAmount => "Total amount set successfully!",
            TransactionKind::Expense => "Expense added successfully!",
        };
        Notice::new(Level::Info, "Success", message)
    }

    pub fn exported(outcome: &ExportOutcome) -> Self {
        match outcome {
            ExportOutcome::Cancelled => Notice::new(Level::Info, "Export", "Export cancelled"),
            ExportOutcome::Copied { destination, .. } => Notice::new(
                Level::Info,
                "Success",
                format!("File downloaded to {}", destination.display()),
            ),
        }
    }

    pub fn failed(error: &AppError) -> Self {
        let level = Level::from(error.severity());
        match error {
            AppError::InvalidNumber { reason, .. } => {
                Notice::new(level, "Error", "Please enter a valid number.")
                    .with_detail(reason.to_string())
            }
            AppError::InsufficientBalance { .. } => {
                Notice::new(level, "Warning", "Insufficient balance!")
                    .with_detail(error.to_string())
            }
            AppError::ExportFailed { source, .. } => Notice::new(
                level,
                "Error",
                format!("Could not download file: {}", source),
            ),
            AppError::Storage(e) => Notice::new(level, "Error", e.to_string()),
        }
    }

    /// Build the notice for any action result.
    pub fn from_result<T, F>(result: &Result<T, AppError>, on_success: F) -> Self
    where
        F: FnOnce(&T) -> Notice,
    {
        match result {
            Ok(value) => on_success(value),
            Err(e) => Notice::failed(e),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}
