//! The end-to-end suite run against a live screen.
//!
//! The first three scenarios reproduce the device-farm checks: the primary
//! control raises a confirmation, and the secondary control and section label
//! resolve by accessibility identifier. The last two cover seeding and
//! removal through the grid.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use servicedeck_core::application::{ServiceCollaborator, view::accessibility};

use super::{HarnessError, UiDriver};

pub const GET_STARTED: &str = "should display and click the Get Started button";
pub const LEARN_MORE: &str = "should show a Learn More Button";
pub const SERVICES_LABEL: &str = "should show a Our Services Label";
pub const SEED_CATALOG: &str = "should seed the service catalog with glyphs";
pub const REMOVE_CARD: &str = "should remove a selected service card";

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub result: Result<(), HarnessError>,
    pub elapsed: Duration,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct ScenarioReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl ScenarioReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Press "Get Started", read the alert, accept it.
pub async fn get_started_shows_confirmation(driver: &UiDriver) -> Result<(), HarnessError> {
    let button = driver
        .find(&format!("~{}", accessibility::PRIMARY_ACTION))
        .await?;
    driver.click(&button).await?;

    let text = driver.alert_text()?;
    if !text.contains("Pressed") {
        return Err(HarnessError::AssertionFailed(format!(
            "alert text '{}' does not mention 'Pressed'",
            text
        )));
    }
    driver.accept_alert()
}

pub async fn learn_more_is_present(driver: &UiDriver) -> Result<(), HarnessError> {
    resolves(driver, accessibility::SECONDARY_ACTION).await
}

pub async fn services_label_is_present(driver: &UiDriver) -> Result<(), HarnessError> {
    resolves(driver, accessibility::SECTION_LABEL).await
}

/// Press "Learn More" and expect one card per catalog entry, each with the
/// first character of its title as glyph.
pub async fn learn_more_seeds_catalog(driver: &UiDriver) -> Result<(), HarnessError> {
    let before = driver.cards()?.len();
    let catalog = driver.screen().catalog().to_vec();

    let button = driver
        .find(&format!("~{}", accessibility::SECONDARY_ACTION))
        .await?;
    driver.click(&button).await?;

    let cards = driver.wait_for_card_count(before + catalog.len()).await?;
    for entry in &catalog {
        let expected = entry
            .title
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default();

        let card = cards
            .iter()
            .find(|c| c.title == entry.title)
            .ok_or_else(|| {
                HarnessError::AssertionFailed(format!("no card titled '{}'", entry.title))
            })?;
        if card.glyph != expected {
            return Err(HarnessError::AssertionFailed(format!(
                "card '{}' shows glyph '{}', expected '{}'",
                card.title, card.glyph, expected
            )));
        }
    }
    Ok(())
}

/// Tap the first card, expect it gone from the grid and from the backend.
pub async fn selecting_card_removes_it(
    driver: &UiDriver,
    backend: &dyn ServiceCollaborator,
) -> Result<(), HarnessError> {
    let before = driver.cards()?.len();
    if before == 0 {
        return Err(HarnessError::AssertionFailed(
            "grid is empty, nothing to remove".into(),
        ));
    }

    let removed = driver.select_card(0).await?;
    let cards = driver.wait_for_card_count(before - 1).await?;
    if cards.iter().any(|c| c.service_id == removed.service_id) {
        return Err(HarnessError::AssertionFailed(format!(
            "card '{}' still shown",
            removed.title
        )));
    }

    let listed = backend.list().await?;
    if listed.items.iter().any(|r| r.id == removed.service_id.as_str()) {
        return Err(HarnessError::AssertionFailed(format!(
            "backend still lists '{}'",
            removed.service_id
        )));
    }
    Ok(())
}

/// Run every scenario in order, each bounded by the scenario timeout.
///
/// A failing scenario does not stop the suite; an alert it left open is
/// accepted before the next one starts.
pub async fn run_suite(driver: &UiDriver, backend: &dyn ServiceCollaborator) -> ScenarioReport {
    let mut report = ScenarioReport::default();

    record(&mut report, driver, GET_STARTED, get_started_shows_confirmation(driver)).await;
    record(&mut report, driver, LEARN_MORE, learn_more_is_present(driver)).await;
    record(&mut report, driver, SERVICES_LABEL, services_label_is_present(driver)).await;
    record(&mut report, driver, SEED_CATALOG, learn_more_seeds_catalog(driver)).await;
    record(
        &mut report,
        driver,
        REMOVE_CARD,
        selecting_card_removes_it(driver, backend),
    )
    .await;

    info!(
        passed = report.passed(),
        failed = report.failed(),
        "Suite finished"
    );
    report
}

async fn record<Fut>(report: &mut ScenarioReport, driver: &UiDriver, name: &'static str, scenario: Fut)
where
    Fut: std::future::Future<Output = Result<(), HarnessError>>,
{
    let started = Instant::now();
    let result = driver.run_scenario(name, scenario).await;

    if let Err(e) = &result {
        warn!(scenario = name, error = %e, "Scenario failed");
        let _ = driver.accept_alert();
    }

    report.outcomes.push(ScenarioOutcome {
        name,
        result,
        elapsed: started.elapsed(),
    });
}

async fn resolves(driver: &UiDriver, id: &str) -> Result<(), HarnessError> {
    let element = driver.find(&format!("~{}", id)).await?;
    if element.element_id().is_empty() {
        return Err(HarnessError::AssertionFailed(format!(
            "~{} resolved without an element id",
            id
        )));
    }
    Ok(())
}
