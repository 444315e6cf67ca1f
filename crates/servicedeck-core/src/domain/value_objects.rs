//! Domain value objects: Theme, Viewport.
//!
//! Pure value types: `Copy`, equality-by-value, no identity.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Theme ────────────────────────────────────────────────────────────────────

/// Colour scheme the screen is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Page background colour.
    pub const fn background(&self) -> &'static str {
        match self {
            Self::Light => "#FFFFFF",
            Self::Dark => "#232F3E",
        }
    }

    /// Card background colour.
    pub const fn card_background(&self) -> &'static str {
        match self {
            Self::Light => "#FFFFFF",
            Self::Dark => "#1A232E",
        }
    }

    /// Foreground text colour.
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Light => "#232F3E",
            Self::Dark => "#FFFFFF",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(DomainError::InvalidTheme(other.to_string())),
        }
    }
}

// ── Viewport ─────────────────────────────────────────────────────────────────

/// Horizontal space between and around the two grid columns.
pub const GRID_GUTTER: u32 = 24;

/// Viewport width in logical pixels.
///
/// Invariant: wide enough that a card has a positive width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Viewport(u32);

impl Viewport {
    pub const MIN_WIDTH: u32 = GRID_GUTTER * 2 + 2;

    pub fn try_new(width: u32) -> Result<Self, DomainError> {
        if width < Self::MIN_WIDTH {
            Err(DomainError::ViewportTooNarrow {
                width,
                minimum: Self::MIN_WIDTH,
            })
        } else {
            Ok(Self(width))
        }
    }

    pub const fn width(&self) -> u32 {
        self.0
    }

    /// Two-column grid: half the viewport minus the gutter.
    pub const fn card_width(&self) -> u32 {
        self.0 / 2 - GRID_GUTTER
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // iPhone logical width
        Self(390)
    }
}

impl TryFrom<u32> for Viewport {
    type Error = DomainError;

    fn try_from(width: u32) -> Result<Self, Self::Error> {
        Self::try_new(width)
    }
}

impl From<Viewport> for u32 {
    fn from(viewport: Viewport) -> Self {
        viewport.0
    }
}
