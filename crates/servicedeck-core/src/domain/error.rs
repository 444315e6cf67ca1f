// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside partial-snapshot reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Required field missing on {record}: {field}")]
    MissingRequiredField {
        record: String,
        field: &'static str,
    },

    #[error("Field '{field}' on {record} must not be blank")]
    BlankField {
        record: String,
        field: &'static str,
    },

    #[error("Invalid service id: {0}")]
    InvalidServiceId(String),

    #[error("Invalid theme '{0}'")]
    InvalidTheme(String),

    #[error("Viewport width {width} is too narrow (minimum {minimum})")]
    ViewportTooNarrow { width: u32, minimum: u32 },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Duplicate service id in listing: {id}")]
    DuplicateServiceId { id: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { record, field } => vec![
                format!("The backend returned {} without a {}", record, field),
                "Fix or delete the record on the backend".into(),
            ],
            Self::InvalidServiceId(id) => vec![
                format!("'{}' is not a usable service id", id),
                "Try: servicedeck list to see current ids".into(),
            ],
            Self::InvalidTheme(_) => vec!["Supported themes: dark, light".into()],
            Self::ViewportTooNarrow { minimum, .. } => {
                vec![format!("Use a viewport width of at least {}", minimum)]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. }
            | Self::BlankField { .. }
            | Self::InvalidServiceId(_)
            | Self::InvalidTheme(_)
            | Self::ViewportTooNarrow { .. } => ErrorCategory::Validation,
            Self::DuplicateServiceId { .. } => ErrorCategory::Integrity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Integrity,
}
