//! Sync Controller - keeps the local service list in step with the backend.
//!
//! Every mutation is followed by a full re-fetch; the local list is only ever
//! replaced wholesale by the result of a `list` call. Nothing is patched
//! optimistically.
//!
//! Overlapping calls are neither sequenced nor cancelled. Each `refresh`
//! writes whatever its own `list` returned, so the snapshot reflects the
//! listing that *completed* last, not the one issued last.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::ServiceCollaborator},
    domain::{DomainValidator as validator, NewService, Service, ServiceId},
    error::DeckResult,
};

/// What `refresh` does with a listing that came back with problems
/// (backend errors or records that fail validation).
///
/// Either way the caller receives `ApplicationError::PartialSnapshot`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListErrorPolicy {
    /// Show the valid records that did come back.
    #[default]
    ApplyPartial,
    /// Leave the previous snapshot untouched.
    KeepPrevious,
}

/// Holds the in-memory service list and reconciles it with the collaborator.
pub struct SyncController {
    collaborator: Arc<dyn ServiceCollaborator>,
    snapshot: RwLock<Vec<Service>>,
    policy: ListErrorPolicy,
}

impl SyncController {
    /// Create a controller with an empty snapshot.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use servicedeck_core::application::SyncController;
    ///
    /// let controller = SyncController::new(Arc::new(collaborator));
    /// controller.refresh().await?;
    /// ```
    pub fn new(collaborator: Arc<dyn ServiceCollaborator>) -> Self {
        Self::with_policy(collaborator, ListErrorPolicy::default())
    }

    pub fn with_policy(collaborator: Arc<dyn ServiceCollaborator>, policy: ListErrorPolicy) -> Self {
        Self {
            collaborator,
            snapshot: RwLock::new(Vec::new()),
            policy,
        }
    }

    /// Re-fetch the collection and replace the local snapshot.
    ///
    /// Returns the new snapshot. A listing with problems is handled per
    /// [`ListErrorPolicy`] and reported as `PartialSnapshot`.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> DeckResult<Vec<Service>> {
        let response = self.collaborator.list().await?;
        let (services, rejected) = validator::validate_listing(response.items);

        let mut problems = response.errors;
        problems.extend(rejected.iter().map(ToString::to_string));

        if problems.is_empty() {
            debug!(count = services.len(), "Snapshot replaced");
            self.replace(services.clone())?;
            return Ok(services);
        }

        let kept = services.len();
        let applied = self.policy == ListErrorPolicy::ApplyPartial;
        if applied {
            self.replace(services)?;
        }

        warn!(
            problems = problems.len(),
            kept,
            applied,
            "Listing returned with problems"
        );

        Err(ApplicationError::PartialSnapshot {
            applied,
            kept,
            problems,
        }
        .into())
    }

    /// Create each draft in order, one at a time, then refresh.
    ///
    /// A failed create stops the run. Records created before it stay on the
    /// backend; the refresh still runs so the snapshot shows them, and the
    /// failure is returned as `SeedInterrupted`.
    #[instrument(skip_all, fields(total = drafts.len()))]
    pub async fn seed(&self, drafts: &[NewService]) -> DeckResult<Vec<Service>> {
        let total = drafts.len();

        for (created, draft) in drafts.iter().enumerate() {
            if let Err(e) = self.collaborator.create(draft.clone()).await {
                warn!(created, title = %draft.title, error = %e, "Seed create failed");

                if let Err(refresh_err) = self.refresh().await {
                    warn!(error = %refresh_err, "Refresh after interrupted seed failed");
                }

                return Err(ApplicationError::SeedInterrupted {
                    created,
                    total,
                    failed_title: draft.title.clone(),
                    reason: e.to_string(),
                }
                .into());
            }
            debug!(title = %draft.title, "Created");
        }

        info!(total, "Seed completed");
        self.refresh().await
    }

    /// Delete one service, then refresh.
    ///
    /// No confirmation step. A failed delete is returned without refreshing.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn remove(&self, id: &ServiceId) -> DeckResult<Vec<Service>> {
        self.collaborator.delete(id).await?;
        info!("Service deleted");
        self.refresh().await
    }

    /// Clone of the current snapshot, in server order.
    pub fn services(&self) -> DeckResult<Vec<Service>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(snapshot.clone())
    }

    pub fn find(&self, id: &ServiceId) -> DeckResult<Option<Service>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(snapshot.iter().find(|s| s.id() == id).cloned())
    }

    pub fn len(&self) -> DeckResult<usize> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(snapshot.len())
    }

    pub fn is_empty(&self) -> DeckResult<bool> {
        Ok(self.len()? == 0)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn replace(&self, services: Vec<Service>) -> DeckResult<()> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        *snapshot = services;
        Ok(())
    }
}
