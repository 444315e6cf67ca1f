//! Unified error handling for servicedeck core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for servicedeck core operations.
#[derive(Debug, Error, Clone)]
pub enum DeckError {
    /// Validation failures on backend data or user input.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Orchestration and collaborator failures.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DeckError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Integrity => ErrorCategory::Backend,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    ///
    /// The application never retries on its own; this only feeds the hints
    /// shown to the user.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::StoreLockError)
                | Self::Application(ApplicationError::Collaborator {
                    transient: true,
                    ..
                })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Backend,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type DeckResult<T> = Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CollaboratorOperation;

    #[test]
    fn transport_failures_are_retryable() {
        let err: DeckError =
            ApplicationError::transport(CollaboratorOperation::List, "connection reset").into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Backend);
    }

    #[test]
    fn rejections_are_not_retryable() {
        let err: DeckError =
            ApplicationError::rejected(CollaboratorOperation::Delete, "unauthorized").into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn missing_title_is_a_validation_error() {
        let err: DeckError = DomainError::MissingRequiredField {
            record: "service 'x'".into(),
            field: "title",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err: DeckError = ApplicationError::ServiceNotFound { id: "x".into() }.into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
