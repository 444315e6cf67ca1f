//! Backend outputs document.
//!
//! A static JSON file produced by the backend deployment and read once at
//! startup. Only the `data` section is used:
//!
//! ```json
//! {
//!   "version": "1",
//!   "data": {
//!     "url": "https://example.appsync-api.us-east-1.amazonaws.com/graphql",
//!     "aws_region": "us-east-1",
//!     "api_key": "da2-...",
//!     "default_authorization_type": "API_KEY"
//!   }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use servicedeck_core::error::{DeckError, DeckResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendOutputs {
    #[serde(default)]
    pub version: Option<String>,
    pub data: DataOutputs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataOutputs {
    pub url: String,
    #[serde(default)]
    pub aws_region: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub default_authorization_type: Option<String>,
}

impl BackendOutputs {
    /// Read and validate the document at `path`.
    pub fn load(path: &Path) -> DeckResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| DeckError::Configuration {
            message: format!("cannot read backend outputs '{}': {}", path.display(), e),
        })?;

        let outputs = Self::parse(&raw).map_err(|e| match e {
            DeckError::Configuration { message } => DeckError::Configuration {
                message: format!("{} ({})", message, path.display()),
            },
            other => other,
        })?;

        debug!(url = %outputs.data.url, "Backend outputs loaded");
        Ok(outputs)
    }

    pub fn parse(raw: &str) -> DeckResult<Self> {
        let outputs: Self = serde_json::from_str(raw).map_err(|e| DeckError::Configuration {
            message: format!("invalid backend outputs: {}", e),
        })?;
        outputs.validate()?;
        Ok(outputs)
    }

    fn validate(&self) -> DeckResult<()> {
        let url = self.data.url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(DeckError::Configuration {
                message: format!("data.url must be an http(s) url, got '{}'", self.data.url),
            });
        }

        let wants_key = self
            .data
            .default_authorization_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("API_KEY"));
        if wants_key && self.data.api_key.is_none() {
            return Err(DeckError::Configuration {
                message: "authorization type is API_KEY but data.api_key is missing".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const VALID: &str = r#"{
        "version": "1",
        "data": {
            "url": "https://example.appsync-api.us-east-1.amazonaws.com/graphql",
            "aws_region": "us-east-1",
            "api_key": "da2-secret",
            "default_authorization_type": "API_KEY"
        }
    }"#;

    #[test]
    fn parses_data_section() {
        let outputs = BackendOutputs::parse(VALID).unwrap();
        assert_eq!(outputs.data.aws_region.as_deref(), Some("us-east-1"));
        assert_eq!(outputs.data.api_key.as_deref(), Some("da2-secret"));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = BackendOutputs::parse(r#"{"data":{"url":"ftp://x"}}"#).unwrap_err();
        assert!(matches!(err, DeckError::Configuration { .. }));
    }

    #[test]
    fn api_key_auth_requires_key() {
        let raw = r#"{"data":{"url":"https://x/graphql","default_authorization_type":"API_KEY"}}"#;
        assert!(BackendOutputs::parse(raw).is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let outputs = BackendOutputs::load(file.path()).unwrap();
        assert!(outputs.data.url.ends_with("/graphql"));
    }

    #[test]
    fn load_missing_file_is_configuration_error() {
        let err = BackendOutputs::load(Path::new("/nonexistent/outputs.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read backend outputs"));
    }
}
