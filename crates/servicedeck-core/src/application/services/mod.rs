//! Application services - orchestrate use cases.
//!
//! `SyncController` reconciles the local snapshot with the backend;
//! `ServiceScreen` maps user intents onto it and renders the result.

pub mod screen;
pub mod sync_controller;

pub use screen::{ScreenOptions, ServiceScreen, UiEvent};
pub use sync_controller::{ListErrorPolicy, SyncController};
