use std::collections::HashSet;

use crate::domain::{
    entities::{Service, ServiceRecord},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Validate a single record.
    pub fn validate_record(record: ServiceRecord) -> Result<Service, DomainError> {
        record.into_service()
    }

    /// Validate a full listing, keeping server order.
    ///
    /// Valid services are returned alongside the rejections so the caller can
    /// decide whether a partially valid snapshot is acceptable. A repeated id
    /// keeps its first occurrence.
    pub fn validate_listing(
        records: Vec<ServiceRecord>,
    ) -> (Vec<Service>, Vec<DomainError>) {
        let mut seen = HashSet::new();
        let mut services = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for record in records {
            match Self::validate_record(record) {
                Ok(service) => {
                    if seen.insert(service.id().clone()) {
                        services.push(service);
                    } else {
                        rejected.push(DomainError::DuplicateServiceId {
                            id: service.id().to_string(),
                        });
                    }
                }
                Err(e) => rejected.push(e),
            }
        }

        (services, rejected)
    }
}
