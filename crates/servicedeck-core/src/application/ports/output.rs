//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `servicedeck-adapters` crate provides implementations.

use async_trait::async_trait;

use crate::domain::{NewService, ServiceId, ServiceRecord};
use crate::error::DeckResult;

/// Result of a `list` call: whatever records came back, plus any errors the
/// backend reported alongside them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResponse {
    pub items: Vec<ServiceRecord>,
    pub errors: Vec<String>,
}

impl ListResponse {
    pub fn complete(items: Vec<ServiceRecord>) -> Self {
        Self {
            items,
            errors: Vec::new(),
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Port for the managed data API holding the `Service` collection.
///
/// Implemented by:
/// - `servicedeck_adapters::collaborator::GraphqlCollaborator` (production)
/// - `servicedeck_adapters::collaborator::InMemoryCollaborator` (testing, demo)
///
/// ## Design Notes
///
/// - No timeouts or retries at this seam; those belong to the client behind it
/// - A failed call returns `Err`; a listing that partly succeeded returns
///   `Ok` with `errors` filled in
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceCollaborator: Send + Sync {
    /// List every service, in the backend's order.
    async fn list(&self) -> DeckResult<ListResponse>;

    /// Create a service; the backend assigns the id.
    async fn create(&self, draft: NewService) -> DeckResult<ServiceRecord>;

    /// Delete a service by id.
    async fn delete(&self, id: &ServiceId) -> DeckResult<()>;
}

/// Port for the modal acknowledgment shown after the primary action.
///
/// Implemented by:
/// - `servicedeck_adapters::confirmation::ModalPresenter` (in-process, readable
///   and dismissible by the test harness)
/// - the CLI's terminal presenter
///
/// `show` resolves once the message is on screen. Dismissal belongs to
/// whoever owns the presenter, so awaiting `show` never blocks on the user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmationPresenter: Send + Sync {
    async fn show(&self, message: &str) -> DeckResult<()>;
}
