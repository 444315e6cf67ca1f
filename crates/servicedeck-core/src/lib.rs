//! servicedeck Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for a service
//! showcase client: a card grid kept in step with a managed data backend,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     servicedeck-cli / e2e harness       │
//! │        (dispatch UiEvents)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ServiceScreen, SyncController)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ServiceCollaborator, Confirmation...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    servicedeck-adapters (Infrastructure)│
//! │ (GraphqlCollaborator, ModalPresenter)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use servicedeck_core::prelude::*;
//!
//! let controller = Arc::new(SyncController::new(collaborator));
//! let screen = ServiceScreen::new(controller, presenter, ScreenOptions::default());
//! screen.dispatch(UiEvent::Mount).await?;
//! let tree = screen.render()?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ListErrorPolicy, ScreenOptions, ServiceScreen, SyncController, UiEvent,
        ports::{ConfirmationPresenter, ListResponse, ServiceCollaborator},
        view::{CONFIRMATION_MESSAGE, Node, NodeRole, ScreenTree, accessibility},
    };
    pub use crate::domain::{
        NewService, Service, ServiceId, ServiceRecord, Theme, Viewport, seed_catalog,
    };
    pub use crate::error::{DeckError, DeckResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
