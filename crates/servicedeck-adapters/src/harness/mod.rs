//! UI automation harness.
//!
//! Drives a [`ServiceScreen`](servicedeck_core::application::ServiceScreen)
//! the way a device-farm automation session drives the mobile app: controls
//! are located only by accessibility identifier (`~identifier` selectors),
//! alerts are read and accepted, and every lookup waits with a bounded
//! timeout.
//!
//! The timeouts here govern the driver only. The application's own backend
//! calls are never wrapped in them.

mod driver;
pub mod scenarios;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use servicedeck_core::error::DeckError;

pub use driver::{CardView, Element, UiDriver};

/// Driver timing, mirroring a WebdriverIO session config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// How long `find` waits for an element to appear.
    pub wait_timeout_ms: u64,
    /// Delay between polls while waiting.
    pub poll_interval_ms: u64,
    /// Budget for bringing the session up.
    pub connection_retry_timeout_ms: u64,
    /// Session start attempts before giving up.
    pub connection_retry_count: u32,
    /// Upper bound for a single scenario.
    pub scenario_timeout_ms: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: 10_000,
            poll_interval_ms: 50,
            connection_retry_timeout_ms: 120_000,
            connection_retry_count: 3,
            scenario_timeout_ms: 60_000,
        }
    }
}

impl HarnessConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn connection_retry_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_retry_timeout_ms)
    }

    pub fn scenario_timeout(&self) -> Duration {
        Duration::from_millis(self.scenario_timeout_ms)
    }
}

/// How the driver locates an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `~identifier`
    AccessibilityId(String),
}

impl Selector {
    pub fn parse(raw: &str) -> Result<Self, HarnessError> {
        match raw.strip_prefix('~') {
            Some(id) if !id.trim().is_empty() => Ok(Self::AccessibilityId(id.to_string())),
            _ => Err(HarnessError::InvalidSelector(raw.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessibilityId(id) => write!(f, "~{}", id),
        }
    }
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Invalid selector '{0}': expected '~accessibility_id'")]
    InvalidSelector(String),

    #[error("Element {selector} not found after {waited_ms} ms")]
    ElementNotFound { selector: String, waited_ms: u64 },

    #[error("Element {selector} cannot be clicked")]
    NotInteractable { selector: String },

    #[error("No card at position {index} (grid has {count})")]
    NoSuchCard { index: usize, count: usize },

    #[error("No alert is open")]
    NoAlertOpen,

    #[error("An alert is open and blocks interaction: '{text}'")]
    AlertBlocking { text: String },

    #[error("Session did not start after {attempts} attempt(s): {reason}")]
    SessionStartFailed { attempts: u32, reason: String },

    #[error("Scenario '{name}' exceeded {timeout_ms} ms")]
    ScenarioTimedOut { name: String, timeout_ms: u64 },

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Application error: {0}")]
    App(#[from] DeckError),
}
