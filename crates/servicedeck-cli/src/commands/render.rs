//! Implementation of the `servicedeck render` command.

use std::sync::Arc;

use tracing::instrument;

use servicedeck_adapters::ModalPresenter;
use servicedeck_core::prelude::*;

use crate::{
    cli::{OutputFormat, RenderArgs, RenderFormat, ThemeArg},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let theme = args.theme.map(|t| match t {
        ThemeArg::Light => Theme::Light,
        ThemeArg::Dark => Theme::Dark,
    });
    let options = super::screen_options(&config, theme, args.width)?;

    let controller = super::controller(&config)?;
    let screen = ServiceScreen::new(controller.clone(), Arc::new(ModalPresenter::new()), options);

    let result = controller.refresh().await;
    super::settle(result, &controller, &output)?;
    let tree = screen.render()?;

    if args.format == RenderFormat::Json || output.format() == OutputFormat::Json {
        output.json(&tree)?;
        return Ok(());
    }

    output.header(&format!(
        "Screen ({} theme, background {}, cards {}, text {}, {} px)",
        tree.theme,
        tree.background,
        tree.card_background,
        tree.foreground,
        screen.options().viewport.width()
    ))?;
    for line in outline(&tree) {
        output.data(&line)?;
    }
    Ok(())
}

/// One line per node, children indented under their card.
fn outline(tree: &ScreenTree) -> Vec<String> {
    let mut lines = Vec::new();
    for node in &tree.nodes {
        push_node(node, 0, &mut lines);
    }
    lines
}

fn push_node(node: &Node, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let role = match node.role {
        NodeRole::Heading => "heading",
        NodeRole::Text => "text",
        NodeRole::Button => "button",
        NodeRole::Card => "card",
        NodeRole::Glyph => "glyph",
    };

    let mut line = format!("{indent}{role:<7} {}", node.text);
    if let Some(id) = node.accessibility_id {
        line.push_str(&format!("  (~{id})"));
    }
    if let Some(width) = node.width {
        line.push_str(&format!("  [{width}px]"));
    }
    lines.push(line);

    // the card line already carries the title
    for child in node.children.iter().filter(|c| c.role != NodeRole::Heading) {
        push_node(child, depth + 1, lines);
    }
}
