//! Implementation of the `servicedeck list` command.

use serde::Serialize;
use tracing::instrument;

use servicedeck_core::prelude::Service;

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Row shape for JSON and CSV output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServiceRow<'a> {
    id: &'a str,
    glyph: String,
    title: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
}

impl<'a> From<&'a Service> for ServiceRow<'a> {
    fn from(service: &'a Service) -> Self {
        Self {
            id: service.id().as_str(),
            glyph: service.glyph().to_string(),
            title: service.title(),
            description: service.description(),
            created_at: service.created_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[instrument(skip_all)]
pub async fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let controller = super::controller(&config)?;

    let spinner = output.spinner("Loading services...");
    let result = controller.refresh().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let services = super::settle(result, &controller, &output)?;

    print_services(&services, resolve_format(args.format, &output), &output)
}

/// `--output-format json` wins over the requested listing format.
pub(crate) fn resolve_format(requested: ListFormat, output: &OutputManager) -> ListFormat {
    if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        requested
    }
}

pub(crate) fn print_services(
    services: &[Service],
    format: ListFormat,
    output: &OutputManager,
) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header(&format!("Our Services ({})", services.len()))?;
            if services.is_empty() {
                output.info("No services yet. Run 'servicedeck seed' to add the catalog.")?;
            }
            let id_width = services
                .iter()
                .map(|s| s.id().as_str().len())
                .max()
                .unwrap_or(2)
                .max(2);
            for service in services {
                output.data(&format!(
                    "  [{}] {:<id_width$}  {}  {}",
                    service.glyph(),
                    service.id().as_str(),
                    service.title(),
                    service.description(),
                ))?;
            }
        }

        ListFormat::Json => {
            let rows: Vec<ServiceRow<'_>> = services.iter().map(ServiceRow::from).collect();
            output.json(&rows)?;
        }

        ListFormat::Plain => {
            for service in services {
                output.data(service.title())?;
            }
        }

        ListFormat::Csv => {
            output.data("id,glyph,title,description")?;
            for service in services {
                output.data(&format!(
                    "{},{},{},{}",
                    csv_field(service.id().as_str()),
                    csv_field(&service.glyph().to_string()),
                    csv_field(service.title()),
                    csv_field(service.description()),
                ))?;
            }
        }
    }

    Ok(())
}

/// Quote a field when it holds a comma, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_are_unquoted() {
        assert_eq!(csv_field("Cognito"), "Cognito");
    }

    #[test]
    fn commas_and_quotes_are_escaped() {
        assert_eq!(
            csv_field("Build full-stack web & mobile apps, fast"),
            "\"Build full-stack web & mobile apps, fast\""
        );
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
