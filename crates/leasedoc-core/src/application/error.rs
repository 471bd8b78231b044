//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The repository answered with a non-success status.
    ///
    /// The operation was aborted; no entity or draft state changed. The
    /// status code is whatever the backing store reported.
    #[error("Repository rejected {operation}: status {status}")]
    PersistenceRejected { operation: &'static str, status: u16 },

    /// No template with the given identifier exists.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    /// Repository access failed (lock poisoned, etc.).
    #[error("Template repository error")]
    StoreLockError,

    /// Backing storage could not be read or written.
    #[error("Storage error at {path}: {reason}")]
    StorageFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PersistenceRejected { operation, status } => vec![
                format!("The backing store rejected the {} (status {})", operation, status),
                "The template was left unchanged; fix the input and retry".into(),
            ],
            Self::TemplateNotFound { id } => vec![
                format!("No template has identifier: {}", id),
                "Try: leasedoc list to see known templates".into(),
            ],
            Self::StoreLockError => vec![
                "The template repository is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::StorageFailed { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the store file exists and is writable".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PersistenceRejected { .. } => ErrorCategory::Internal,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::StorageFailed { .. } => ErrorCategory::Internal,
        }
    }
}
