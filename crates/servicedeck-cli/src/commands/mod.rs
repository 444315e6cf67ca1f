//! Command handlers.
//!
//! Each handler translates its arguments into controller or screen calls and
//! prints the outcome. The helpers below wire the configured backend.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use servicedeck_adapters::{BackendOutputs, GraphqlCollaborator, InMemoryCollaborator};
use servicedeck_core::{
    application::ApplicationError,
    error::{DeckError, DeckResult},
    prelude::*,
};

use crate::{
    config::{AppConfig, BackendKind},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod demo;
pub mod init;
pub mod list;
pub mod press;
pub mod remove;
pub mod render;
pub mod seed;

/// Build the collaborator named by `backend.kind`.
pub(crate) fn collaborator(config: &AppConfig) -> CliResult<Arc<dyn ServiceCollaborator>> {
    match config.backend.kind {
        BackendKind::Memory => {
            let backend = match &config.backend.fixture {
                Some(path) => InMemoryCollaborator::with_records(load_fixture(path)?),
                None => InMemoryCollaborator::new(),
            };
            debug!(records = backend.len(), "Using in-memory backend");
            Ok(Arc::new(backend))
        }
        BackendKind::Http => {
            let outputs = BackendOutputs::load(&config.backend.outputs)?;
            let collaborator = GraphqlCollaborator::new(&outputs)?;
            debug!(endpoint = collaborator.endpoint(), "Using GraphQL backend");
            Ok(Arc::new(collaborator))
        }
    }
}

pub(crate) fn controller(config: &AppConfig) -> CliResult<Arc<SyncController>> {
    Ok(Arc::new(SyncController::with_policy(
        collaborator(config)?,
        config.sync.list_error_policy,
    )))
}

pub(crate) fn screen_options(
    config: &AppConfig,
    theme: Option<Theme>,
    width: Option<u32>,
) -> CliResult<ScreenOptions> {
    let viewport = Viewport::try_new(width.unwrap_or(config.display.viewport_width))
        .map_err(DeckError::from)?;

    Ok(ScreenOptions {
        theme: theme.unwrap_or(config.display.theme),
        viewport,
        ..ScreenOptions::default()
    })
}

/// Accept a snapshot that was applied despite listing problems, after
/// warning about each problem. Every other failure passes through.
pub(crate) fn settle(
    result: DeckResult<Vec<Service>>,
    controller: &SyncController,
    output: &OutputManager,
) -> CliResult<Vec<Service>> {
    match result {
        Ok(services) => Ok(services),
        Err(DeckError::Application(ApplicationError::PartialSnapshot {
            applied: true,
            problems,
            ..
        })) => {
            warn!(problems = problems.len(), "Showing partial listing");
            output.warning("The backend listing was incomplete:")?;
            for problem in &problems {
                output.warning(&format!("  {problem}"))?;
            }
            Ok(controller.services()?)
        }
        Err(e) => Err(e.into()),
    }
}

fn load_fixture(path: &Path) -> CliResult<Vec<ServiceRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read fixture '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_cli_context(|| format!("Fixture '{}' is not a JSON array of records", path.display()))
}
