//! Service Screen - the driving side of the application.
//!
//! Turns user intents into controller calls and renders the current snapshot
//! as a [`ScreenTree`]. Rendering is a pure function of the snapshot and the
//! screen options.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{debug, instrument};

use crate::{
    application::{
        ports::ConfirmationPresenter,
        services::SyncController,
        view::{CONFIRMATION_MESSAGE, ScreenTree},
    },
    domain::{NewService, ServiceId, Theme, Viewport, seed_catalog},
    error::DeckResult,
};

/// User intents the screen handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Screen appeared; load the collection.
    Mount,
    /// "Get Started" pressed.
    PressPrimary,
    /// "Learn More" pressed.
    PressSecondary,
    /// A service card was tapped.
    SelectCard(ServiceId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub theme: Theme,
    pub viewport: Viewport,
    /// Year shown in the footer copyright line.
    pub year: i32,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            viewport: Viewport::default(),
            year: Utc::now().year(),
        }
    }
}

pub struct ServiceScreen {
    controller: Arc<SyncController>,
    presenter: Arc<dyn ConfirmationPresenter>,
    catalog: Vec<NewService>,
    options: ScreenOptions,
}

impl ServiceScreen {
    /// Create a screen seeding the built-in catalog on "Learn More".
    pub fn new(
        controller: Arc<SyncController>,
        presenter: Arc<dyn ConfirmationPresenter>,
        options: ScreenOptions,
    ) -> Self {
        Self {
            controller,
            presenter,
            catalog: seed_catalog(),
            options,
        }
    }

    /// Replace the records "Learn More" creates.
    pub fn with_catalog(mut self, catalog: Vec<NewService>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Handle one user intent.
    #[instrument(skip(self))]
    pub async fn dispatch(&self, event: UiEvent) -> DeckResult<()> {
        match event {
            UiEvent::Mount => {
                self.controller.refresh().await?;
            }
            UiEvent::PressPrimary => {
                self.presenter.show(CONFIRMATION_MESSAGE).await?;
            }
            UiEvent::PressSecondary => {
                self.controller.seed(&self.catalog).await?;
            }
            UiEvent::SelectCard(id) => {
                self.controller.remove(&id).await?;
            }
        }
        debug!("Event handled");
        Ok(())
    }

    /// Render the current snapshot.
    pub fn render(&self) -> DeckResult<ScreenTree> {
        let services = self.controller.services()?;
        Ok(ScreenTree::build(
            &services,
            self.options.theme,
            self.options.viewport,
            self.options.year,
        ))
    }

    pub fn controller(&self) -> &Arc<SyncController> {
        &self.controller
    }

    pub fn options(&self) -> ScreenOptions {
        self.options
    }

    pub fn catalog(&self) -> &[NewService] {
        &self.catalog
    }
}
