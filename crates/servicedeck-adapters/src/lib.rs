//! Infrastructure adapters for servicedeck.
//!
//! This crate implements the ports defined in
//! `servicedeck-core::application::ports` and hosts the UI automation harness
//! that drives a rendered `ServiceScreen` through accessibility identifiers.

pub mod backend_outputs;
pub mod collaborator;
pub mod confirmation;
pub mod harness;

// Re-export commonly used adapters
pub use backend_outputs::BackendOutputs;
pub use collaborator::{GraphqlCollaborator, InMemoryCollaborator};
pub use confirmation::ModalPresenter;
pub use harness::{HarnessConfig, HarnessError, UiDriver};
