//! Implementation of the `servicedeck demo` command.
//!
//! Launches the screen over a fresh in-memory backend, drives it through the
//! harness and reports each scenario.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use servicedeck_adapters::{
    InMemoryCollaborator, ModalPresenter, UiDriver,
    harness::scenarios::{self, ScenarioReport},
};
use servicedeck_core::prelude::*;

use crate::{
    cli::{DemoArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: DemoArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let backend = InMemoryCollaborator::new();
    let modal = ModalPresenter::new();
    let controller = Arc::new(SyncController::with_policy(
        Arc::new(backend.clone()),
        config.sync.list_error_policy,
    ));
    let screen = Arc::new(ServiceScreen::new(
        controller,
        Arc::new(modal.clone()),
        super::screen_options(&config, None, None)?,
    ));

    let driver = UiDriver::launch(screen, modal, config.harness).await?;
    let report = scenarios::run_suite(&driver, &backend).await;

    if output.format() == OutputFormat::Json {
        output.json(&report_json(&report))?;
    } else {
        print_report(&report, &output)?;
        if args.show_screen {
            output.print("")?;
            for card in driver.cards()? {
                output.data(&format!("  [{}] {}", card.glyph, card.title))?;
            }
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::ScenariosFailed {
            failed: report.failed(),
            total: report.outcomes.len(),
        })
    }
}

fn print_report(report: &ScenarioReport, output: &OutputManager) -> CliResult<()> {
    output.header("Service Showcase")?;
    for outcome in &report.outcomes {
        let line = format!("{} ({} ms)", outcome.name, outcome.elapsed.as_millis());
        match &outcome.result {
            Ok(()) => output.success(&line)?,
            Err(e) => output.error(&format!("{line}: {e}"))?,
        }
    }
    output.print(&format!(
        "\n{} passing, {} failing",
        report.passed(),
        report.failed()
    ))?;
    Ok(())
}

fn report_json(report: &ScenarioReport) -> serde_json::Value {
    let scenarios: Vec<_> = report
        .outcomes
        .iter()
        .map(|o| {
            json!({
                "name": o.name,
                "passed": o.passed(),
                "elapsedMs": o.elapsed.as_millis() as u64,
                "error": o.result.as_ref().err().map(ToString::to_string),
            })
        })
        .collect();

    json!({
        "passed": report.passed(),
        "failed": report.failed(),
        "scenarios": scenarios,
    })
}
