//! Implementation of the `servicedeck remove` command.

use tracing::instrument;

use servicedeck_core::{error::DeckError, prelude::ServiceId};

use crate::{
    cli::{ListFormat, RemoveArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(id = %args.id))]
pub async fn execute(args: RemoveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let id: ServiceId = args.id.parse().map_err(DeckError::from)?;
    let controller = super::controller(&config)?;

    let result = controller.remove(&id).await;
    let services = super::settle(result, &controller, &output)?;

    let format = super::list::resolve_format(ListFormat::Table, &output);
    if format != ListFormat::Json {
        output.success(&format!("Removed {}", id))?;
    }
    super::list::print_services(&services, format, &output)
}
