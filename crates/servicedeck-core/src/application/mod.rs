//! Application layer for servicedeck.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SyncController, ServiceScreen)
//! - **Ports**: Interface definitions (traits) for the backend and the
//!   confirmation dialog
//! - **View**: the headless screen tree and its accessibility identifiers
//! - **Errors**: Application-specific error types
//!
//! Validation rules live in `crate::domain`; this layer only sequences calls.

pub mod error;
pub mod ports;
pub mod services;
pub mod view;

// Re-export main services
pub use services::{ListErrorPolicy, ScreenOptions, ServiceScreen, SyncController, UiEvent};

// Re-export port traits (for adapter implementation)
pub use ports::{ConfirmationPresenter, ListResponse, ServiceCollaborator};

pub use error::{ApplicationError, CollaboratorOperation};
