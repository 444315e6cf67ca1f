//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SERVICEDECK_*` environment variables, `__` between nested keys
//!    (`SERVICEDECK_BACKEND__KIND=http`)
//! 3. Config file: `--config`, else `./servicedeck.toml`, else the platform
//!    config dir
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use servicedeck_adapters::HarnessConfig;
use servicedeck_core::prelude::{ListErrorPolicy, Theme};

/// File name used for the current-directory config.
pub const LOCAL_CONFIG_FILE: &str = "servicedeck.toml";

const ENV_PREFIX: &str = "SERVICEDECK";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which data backend to talk to.
    pub backend: BackendConfig,
    /// Snapshot synchronisation.
    pub sync: SyncConfig,
    /// Screen rendering.
    pub display: DisplayConfig,
    /// End-to-end harness timing.
    pub harness: HarnessConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Process-local store; nothing persists between runs.
    #[default]
    Memory,
    /// The GraphQL endpoint named in the backend outputs file.
    Http,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Backend outputs document (`amplify_outputs.json`).
    pub outputs: PathBuf,
    /// JSON array of records preloaded into the memory backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Memory,
            outputs: PathBuf::from("amplify_outputs.json"),
            fixture: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub list_error_policy: ListErrorPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: Theme,
    pub viewport_width: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            viewport_width: 390,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
    /// Also write logs to this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.  The
    /// implicit locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::active_path(), false),
        };

        let settings = config::Config::builder()
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The file `load(None)` reads: `./servicedeck.toml` when present,
    /// otherwise the platform path.
    pub fn active_path() -> PathBuf {
        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.exists() {
            local.to_path_buf()
        } else {
            Self::config_path()
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `servicedeck.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "servicedeck", "servicedeck")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_backend_is_memory() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.backend.kind, BackendKind::Memory);
        assert_eq!(cfg.sync.list_error_policy, ListErrorPolicy::ApplyPartial);
    }

    #[test]
    fn default_display_matches_phone_viewport() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.display.viewport_width, 390);
        assert_eq!(cfg.display.theme, Theme::Light);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[backend]\nkind = \"http\"\n\n[display]\ntheme = \"dark\"\n\n[harness]\nwait_timeout_ms = 250"
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.backend.kind, BackendKind::Http);
        assert_eq!(cfg.display.theme, Theme::Dark);
        assert_eq!(cfg.harness.wait_timeout_ms, 250);
        // untouched sections keep their defaults
        assert_eq!(cfg.harness.connection_retry_count, 3);
        assert_eq!(cfg.display.viewport_width, 390);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/here/servicedeck.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
