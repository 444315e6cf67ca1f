//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `servicedeck-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ServiceCollaborator`: the managed data API
//!   - `ConfirmationPresenter`: modal acknowledgment shown to the user
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `ServiceScreen::dispatch` receives user intents

pub mod output;

pub use output::{ConfirmationPresenter, ListResponse, ServiceCollaborator};

#[cfg(test)]
pub use output::{MockConfirmationPresenter, MockServiceCollaborator};
