pub mod catalog;
pub mod service;

pub use crate::domain::DomainError;
pub use service::{NewService, Service, ServiceId, ServiceRecord};
