//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the collaborators
//! the application talks to. Validation errors are `DomainError` from
//! `crate::domain`.

use std::fmt;

use thiserror::Error;

use crate::error::ErrorCategory;

/// The collaborator operation a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorOperation {
    List,
    Create,
    Delete,
}

impl fmt::Display for CollaboratorOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Delete => "delete",
        })
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The data collaborator failed or rejected a call.
    #[error("Backend {operation} failed: {reason}")]
    Collaborator {
        operation: CollaboratorOperation,
        reason: String,
        /// Network-level failure rather than a rejection by the backend.
        transient: bool,
    },

    /// A listing came back with errors or invalid records.
    ///
    /// `applied` tells whether the valid part replaced the local snapshot.
    #[error("Listing returned {} problem(s); {kept} service(s) {}", .problems.len(), snapshot_outcome(.applied))]
    PartialSnapshot {
        applied: bool,
        kept: usize,
        problems: Vec<String>,
    },

    /// A seed run stopped before creating every record.
    #[error("Seeding stopped at '{failed_title}' after {created} of {total} record(s): {reason}")]
    SeedInterrupted {
        created: usize,
        total: usize,
        failed_title: String,
        reason: String,
    },

    /// The backend has no service with this id.
    #[error("Service not found: {id}")]
    ServiceNotFound { id: String },

    /// The confirmation could not be shown or acknowledged.
    #[error("Confirmation failed: {reason}")]
    ConfirmationFailed { reason: String },

    /// Local snapshot lock was poisoned.
    #[error("Service snapshot lock poisoned")]
    StoreLockError,
}

fn snapshot_outcome(applied: &bool) -> &'static str {
    if *applied { "applied" } else { "discarded" }
}

impl ApplicationError {
    /// Shorthand for a backend rejection.
    pub fn rejected(operation: CollaboratorOperation, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            operation,
            reason: reason.into(),
            transient: false,
        }
    }

    /// Shorthand for a network-level failure.
    pub fn transport(operation: CollaboratorOperation, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            operation,
            reason: reason.into(),
            transient: true,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Collaborator {
                transient: true, ..
            } => vec![
                "The backend could not be reached".into(),
                "Check your network connection and the backend url".into(),
            ],
            Self::Collaborator { operation, .. } => vec![
                format!("The backend rejected the {} call", operation),
                "Check the API key in your backend outputs file".into(),
            ],
            Self::PartialSnapshot { problems, .. } => {
                let mut out = vec!["The backend listing was incomplete:".to_string()];
                out.extend(problems.iter().map(|p| format!("  • {}", p)));
                out
            }
            Self::SeedInterrupted { created, .. } => vec![
                format!("{} record(s) were created before the failure", created),
                "Run 'servicedeck seed' again or remove the partial records".into(),
            ],
            Self::ServiceNotFound { id } => vec![
                format!("No service with id '{}'", id),
                "Try: servicedeck list to see current ids".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Collaborator { .. }
            | Self::PartialSnapshot { .. }
            | Self::SeedInterrupted { .. } => ErrorCategory::Backend,
            Self::ServiceNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfirmationFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
