use std::future::Future;
use std::sync::Arc;

use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, info, instrument, warn};

use servicedeck_core::{
    application::{
        ServiceScreen, UiEvent,
        view::{NodeRole, ScreenTree, accessibility},
    },
    domain::ServiceId,
};

use super::{HarnessConfig, HarnessError, Selector};
use crate::confirmation::ModalPresenter;

/// A located control or label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    selector: Selector,
    role: NodeRole,
    text: String,
}

impl Element {
    /// Opaque handle, non-empty for every located element.
    pub fn element_id(&self) -> String {
        match &self.selector {
            Selector::AccessibilityId(id) => format!("a11y:{}", id),
        }
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A service card as the driver sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub service_id: ServiceId,
    pub title: String,
    pub glyph: String,
}

/// Automation session over one screen.
pub struct UiDriver {
    screen: Arc<ServiceScreen>,
    modal: ModalPresenter,
    config: HarnessConfig,
}

impl UiDriver {
    /// Start a session: wait until the screen exposes its controls, then
    /// mount it.
    ///
    /// `modal` must be the presenter the screen was built with.
    #[instrument(skip_all)]
    pub async fn launch(
        screen: Arc<ServiceScreen>,
        modal: ModalPresenter,
        config: HarnessConfig,
    ) -> Result<Self, HarnessError> {
        let driver = Self {
            screen,
            modal,
            config,
        };

        driver.await_session().await?;
        // The app stays usable when the first load fails, so the session does too.
        if let Err(e) = driver.screen.dispatch(UiEvent::Mount).await {
            warn!(error = %e, "Initial load failed");
        }
        info!("Session started");

        Ok(driver)
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn screen(&self) -> &Arc<ServiceScreen> {
        &self.screen
    }

    /// Locate an element, waiting up to the configured timeout.
    #[instrument(skip(self))]
    pub async fn find(&self, selector: &str) -> Result<Element, HarnessError> {
        let selector = Selector::parse(selector)?;
        let Selector::AccessibilityId(id) = &selector;

        let started = Instant::now();
        loop {
            let tree = self.screen.render()?;
            if let Some(node) = tree.find(id) {
                debug!("Element located");
                return Ok(Element {
                    role: node.role,
                    text: node.text.clone(),
                    selector,
                });
            }

            if started.elapsed() >= self.config.wait_timeout() {
                return Err(HarnessError::ElementNotFound {
                    selector: selector.to_string(),
                    waited_ms: self.config.wait_timeout_ms,
                });
            }
            sleep(self.config.poll_interval()).await;
        }
    }

    /// Click a located element.
    ///
    /// Blocked while an alert is open, as on a device.
    #[instrument(skip(self), fields(element = %element.element_id()))]
    pub async fn click(&self, element: &Element) -> Result<(), HarnessError> {
        self.ensure_no_alert()?;

        let Selector::AccessibilityId(id) = &element.selector;
        let event = match id.as_str() {
            accessibility::PRIMARY_ACTION => UiEvent::PressPrimary,
            accessibility::SECONDARY_ACTION => UiEvent::PressSecondary,
            _ => {
                return Err(HarnessError::NotInteractable {
                    selector: element.selector.to_string(),
                });
            }
        };

        self.screen.dispatch(event).await?;
        Ok(())
    }

    /// Text of the open alert.
    pub fn alert_text(&self) -> Result<String, HarnessError> {
        self.modal.text().ok_or(HarnessError::NoAlertOpen)
    }

    /// Accept (dismiss) the open alert.
    pub fn accept_alert(&self) -> Result<(), HarnessError> {
        if !self.modal.is_open() {
            return Err(HarnessError::NoAlertOpen);
        }
        self.modal.accept()?;
        Ok(())
    }

    /// Cards currently in the grid, top to bottom.
    pub fn cards(&self) -> Result<Vec<CardView>, HarnessError> {
        let tree = self.screen.render()?;
        Ok(card_views(&tree))
    }

    /// Tap the card at `index`, returning what it showed.
    #[instrument(skip(self))]
    pub async fn select_card(&self, index: usize) -> Result<CardView, HarnessError> {
        self.ensure_no_alert()?;

        let cards = self.cards()?;
        let card = cards
            .get(index)
            .cloned()
            .ok_or(HarnessError::NoSuchCard {
                index,
                count: cards.len(),
            })?;

        self.screen
            .dispatch(UiEvent::SelectCard(card.service_id.clone()))
            .await?;
        Ok(card)
    }

    /// Wait until the grid shows exactly `count` cards.
    pub async fn wait_for_card_count(&self, count: usize) -> Result<Vec<CardView>, HarnessError> {
        let started = Instant::now();
        loop {
            let cards = self.cards()?;
            if cards.len() == count {
                return Ok(cards);
            }
            if started.elapsed() >= self.config.wait_timeout() {
                return Err(HarnessError::AssertionFailed(format!(
                    "expected {} card(s), grid shows {}",
                    count,
                    cards.len()
                )));
            }
            sleep(self.config.poll_interval()).await;
        }
    }

    /// Run one scenario bounded by the scenario timeout.
    pub async fn run_scenario<Fut>(&self, name: &str, scenario: Fut) -> Result<(), HarnessError>
    where
        Fut: Future<Output = Result<(), HarnessError>>,
    {
        match timeout(self.config.scenario_timeout(), scenario).await {
            Ok(result) => result,
            Err(_) => Err(HarnessError::ScenarioTimedOut {
                name: name.to_string(),
                timeout_ms: self.config.scenario_timeout_ms,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn ensure_no_alert(&self) -> Result<(), HarnessError> {
        match self.modal.text() {
            Some(text) => Err(HarnessError::AlertBlocking { text }),
            None => Ok(()),
        }
    }

    /// Poll until every accessibility identifier resolves.
    async fn await_session(&self) -> Result<(), HarnessError> {
        let attempts = self.config.connection_retry_count.max(1);
        let mut last_reason = String::from("screen never rendered");

        let probe = async {
            for attempt in 1..=attempts {
                match self.screen.render() {
                    Ok(tree) if has_all_identifiers(&tree) => return Ok(()),
                    Ok(_) => last_reason = "accessibility identifiers missing".into(),
                    Err(e) => last_reason = e.to_string(),
                }
                warn!(attempt, reason = %last_reason, "Session not ready");
                sleep(self.config.poll_interval()).await;
            }
            Err(())
        };

        let outcome = timeout(self.config.connection_retry_timeout(), probe).await;
        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(())) | Err(_) => Err(HarnessError::SessionStartFailed {
                attempts,
                reason: last_reason,
            }),
        }
    }
}

fn has_all_identifiers(tree: &ScreenTree) -> bool {
    accessibility::ALL.iter().all(|id| tree.find(id).is_some())
}

fn card_views(tree: &ScreenTree) -> Vec<CardView> {
    tree.cards()
        .filter_map(|node| {
            Some(CardView {
                service_id: node.service_id.clone()?,
                title: node.text.clone(),
                glyph: node.glyph()?.to_string(),
            })
        })
        .collect()
}
