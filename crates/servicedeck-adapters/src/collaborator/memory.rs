//! In-memory data backend for tests and the offline demo.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use servicedeck_core::{
    application::{ApplicationError, CollaboratorOperation, ListResponse, ServiceCollaborator},
    domain::{NewService, ServiceId, ServiceRecord},
    error::DeckResult,
};

/// Thread-safe in-memory service collection.
///
/// Keeps insertion order, assigns UUID v4 ids, and can be told to fail in
/// the ways a real backend does.
#[derive(Clone, Default)]
pub struct InMemoryCollaborator {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    records: Vec<ServiceRecord>,
    faults: Faults,
}

#[derive(Default)]
struct Faults {
    offline: bool,
    /// Zero-based index of the create call that fails.
    fail_create_at: Option<usize>,
    creates_seen: usize,
    fail_deletes: bool,
    list_errors: Vec<String>,
}

impl InMemoryCollaborator {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with raw records.
    pub fn with_records(records: Vec<ServiceRecord>) -> Self {
        let backend = Self::new();
        if let Ok(mut inner) = backend.inner.write() {
            inner.records = records;
        }
        backend
    }

    /// Store a raw record as-is, bypassing validation (e.g. one with no title).
    pub fn insert_raw(&self, record: ServiceRecord) -> DeckResult<()> {
        self.write()?.records.push(record);
        Ok(())
    }

    /// Every call fails with a transport error while set.
    pub fn set_offline(&self, offline: bool) -> DeckResult<()> {
        self.write()?.faults.offline = offline;
        Ok(())
    }

    /// Make the create call with this zero-based index fail.
    pub fn fail_create_at(&self, index: usize) -> DeckResult<()> {
        let mut inner = self.write()?;
        inner.faults.fail_create_at = Some(index);
        inner.faults.creates_seen = 0;
        Ok(())
    }

    pub fn fail_deletes(&self, fail: bool) -> DeckResult<()> {
        self.write()?.faults.fail_deletes = fail;
        Ok(())
    }

    /// Report this error alongside every listing.
    pub fn push_list_error(&self, message: impl Into<String>) -> DeckResult<()> {
        self.write()?.faults.list_errors.push(message.into());
        Ok(())
    }

    /// Snapshot of the stored records (testing helper).
    pub fn records(&self) -> Vec<ServiceRecord> {
        self.read().map(|i| i.records.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|i| i.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every record and reset injected faults.
    pub fn clear(&self) -> DeckResult<()> {
        let mut inner = self.write()?;
        inner.records.clear();
        inner.faults = Faults::default();
        Ok(())
    }

    fn read(&self) -> DeckResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> DeckResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

fn offline(operation: CollaboratorOperation) -> servicedeck_core::error::DeckError {
    ApplicationError::transport(operation, "backend unreachable").into()
}

#[async_trait]
impl ServiceCollaborator for InMemoryCollaborator {
    async fn list(&self) -> DeckResult<ListResponse> {
        let inner = self.read()?;
        if inner.faults.offline {
            return Err(offline(CollaboratorOperation::List));
        }

        Ok(ListResponse {
            items: inner.records.clone(),
            errors: inner.faults.list_errors.clone(),
        })
    }

    async fn create(&self, draft: NewService) -> DeckResult<ServiceRecord> {
        let mut inner = self.write()?;
        if inner.faults.offline {
            return Err(offline(CollaboratorOperation::Create));
        }

        let index = inner.faults.creates_seen;
        inner.faults.creates_seen += 1;
        if inner.faults.fail_create_at == Some(index) {
            return Err(ApplicationError::rejected(
                CollaboratorOperation::Create,
                format!("create #{index} rejected"),
            )
            .into());
        }

        let now = Utc::now();
        let record = ServiceRecord {
            id: Uuid::new_v4().to_string(),
            title: Some(draft.title),
            description: Some(draft.description),
            created_at: Some(now),
            updated_at: Some(now),
        };
        debug!(id = %record.id, "Record created");
        inner.records.push(record.clone());

        Ok(record)
    }

    async fn delete(&self, id: &ServiceId) -> DeckResult<()> {
        let mut inner = self.write()?;
        if inner.faults.offline {
            return Err(offline(CollaboratorOperation::Delete));
        }
        if inner.faults.fail_deletes {
            return Err(
                ApplicationError::rejected(CollaboratorOperation::Delete, "delete rejected").into(),
            );
        }

        let position = inner
            .records
            .iter()
            .position(|r| r.id == id.as_str())
            .ok_or_else(|| ApplicationError::ServiceNotFound { id: id.to_string() })?;
        inner.records.remove(position);

        debug!(%id, "Record deleted");
        Ok(())
    }
}
