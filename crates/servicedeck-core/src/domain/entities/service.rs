use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Opaque identifier assigned by the collaborator on creation.
///
/// Invariant: never blank. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Fallible constructor.
    pub fn try_new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            Err(DomainError::InvalidServiceId(id))
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ServiceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

/// A service draft, not yet known to the collaborator (no id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewService {
    pub title: String,
    pub description: String,
}

impl NewService {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Whether a listed service carries the same fields as this draft.
    pub fn matches(&self, service: &Service) -> bool {
        service.title() == self.title && service.description() == self.description
    }
}

/// A raw record as the collaborator returns it.
///
/// Everything except the id may be missing; convert with
/// [`ServiceRecord::into_service`] before handing it to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServiceRecord {
    /// Validate the record into a displayable [`Service`].
    ///
    /// A missing description is treated as empty text; a missing or blank
    /// title is rejected.
    pub fn into_service(self) -> Result<Service, DomainError> {
        let record = format!("service '{}'", self.id);
        let id = ServiceId::try_new(self.id)?;

        let title = self.title.ok_or_else(|| DomainError::MissingRequiredField {
            record: record.clone(),
            field: "title",
        })?;

        if title.trim().is_empty() {
            return Err(DomainError::BlankField {
                record,
                field: "title",
            });
        }

        Ok(Service {
            id,
            title,
            description: self.description.unwrap_or_default(),
            created_at: self.created_at,
        })
    }
}

/// A validated service, safe to render.
///
/// Invariant: `title` is non-blank, so [`Service::glyph`] always has a
/// character to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    id: ServiceId,
    title: String,
    description: String,
    created_at: Option<DateTime<Utc>>,
}

impl Service {
    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// First character of the title, shown as the card icon.
    pub fn glyph(&self) -> char {
        self.title.chars().next().unwrap_or('?')
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}
