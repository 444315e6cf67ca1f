//! Implementation of the `servicedeck seed` command.

use std::path::Path;

use tracing::{info, instrument};

use servicedeck_core::prelude::{NewService, seed_catalog};

use crate::{
    cli::{ListFormat, SeedArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: SeedArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => seed_catalog(),
    };

    let format = super::list::resolve_format(ListFormat::Table, &output);

    if args.dry_run {
        if format == ListFormat::Json {
            output.json(&catalog)?;
            return Ok(());
        }
        output.info(&format!("Dry run: would create {} service(s)", catalog.len()))?;
        for draft in &catalog {
            output.print(&format!("  {}  {}", draft.title, draft.description))?;
        }
        return Ok(());
    }

    let controller = super::controller(&config)?;

    let spinner = output.spinner(&format!("Creating {} service(s)...", catalog.len()));
    let result = controller.seed(&catalog).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let services = super::settle(result, &controller, &output)?;

    info!(created = catalog.len(), "Catalog seeded");
    if format != ListFormat::Json {
        output.success(&format!("Created {} service(s)", catalog.len()))?;
    }
    super::list::print_services(&services, format, &output)
}

fn load_catalog(path: &Path) -> CliResult<Vec<NewService>> {
    let raw = std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read catalog '{}'", path.display()))?;
    let catalog: Vec<NewService> = serde_json::from_str(&raw).with_cli_context(|| {
        format!(
            "Catalog '{}' must be a JSON array of {{\"title\", \"description\"}}",
            path.display()
        )
    })?;

    if let Some(blank) = catalog.iter().position(|d| d.title.trim().is_empty()) {
        return Err(CliError::InvalidInput {
            message: format!("catalog entry #{} has a blank title", blank + 1),
            source: None,
        });
    }
    Ok(catalog)
}
