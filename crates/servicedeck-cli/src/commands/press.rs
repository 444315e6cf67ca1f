//! Implementation of the `servicedeck press` command.

use std::sync::Arc;

use tracing::instrument;

use servicedeck_core::prelude::{ServiceScreen, UiEvent};

use crate::{
    cli::PressArgs, config::AppConfig, error::CliResult, output::OutputManager,
    presenter::TerminalPresenter,
};

/// Press "Get Started": show the confirmation, then wait for dismissal.
#[instrument(skip_all)]
pub async fn execute(args: PressArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let presenter = Arc::new(TerminalPresenter::new(!output.supports_color()));
    let screen = ServiceScreen::new(
        super::controller(&config)?,
        presenter.clone(),
        super::screen_options(&config, None, None)?,
    );

    screen.dispatch(UiEvent::PressPrimary).await?;

    // quiet runs never block on input
    if !args.yes && !output.is_quiet() {
        presenter.await_dismissal()?;
    }
    output.success("Confirmation dismissed")?;
    Ok(())
}
