// ============================================================================
// domain/error.rs - ERROR DOMAIN
// ============================================================================

use thiserror::Error;

use crate::domain::entities::template::TemplateKind;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Kind Conflicts (409-level equivalent)
    // ========================================================================
    #[error("expected a '{expected}' template, got '{actual}'")]
    KindMismatch {
        expected: TemplateKind,
        actual: TemplateKind,
    },

    #[error("template '{id}' cannot change kind; kind is fixed at creation")]
    KindChangeRejected { id: String },

    // ========================================================================
    // Draft Lifecycle Violations
    // ========================================================================
    #[error("a '{kind}' draft is already open")]
    DraftAlreadyOpen { kind: TemplateKind },

    #[error("no open '{kind}' draft")]
    NoOpenDraft { kind: TemplateKind },

    #[error("a save for the '{kind}' draft is already in flight")]
    SaveInFlight { kind: TemplateKind },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplate(msg) => vec![
                "Check the template fields".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{}'", field)]
            }
            Self::KindMismatch { expected, actual } => vec![
                format!("This editor handles '{}' templates", expected),
                format!("The entity is a '{}' template; open it with the matching editor", actual),
            ],
            Self::KindChangeRejected { .. } => vec![
                "A template's kind is write-once".into(),
                "Create a new template of the other kind instead".into(),
            ],
            Self::DraftAlreadyOpen { kind } => vec![
                format!("Save or cancel the open '{}' draft first", kind),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTemplate(_) | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            Self::KindMismatch { .. } | Self::KindChangeRejected { .. } => ErrorCategory::Conflict,
            Self::DraftAlreadyOpen { .. } | Self::NoOpenDraft { .. } | Self::SaveInFlight { .. } => {
                ErrorCategory::Conflict
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}
