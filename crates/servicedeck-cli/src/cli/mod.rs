//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "servicedeck",
    bin_name = "servicedeck",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Service showcase backed by a managed data API",
    long_about = "servicedeck keeps a local snapshot of the service catalog in \
                  sync with the data backend, renders the showcase screen, and \
                  runs the end-to-end scenarios against it.",
    after_help = "EXAMPLES:\n\
        \x20 servicedeck list --format json\n\
        \x20 servicedeck seed\n\
        \x20 servicedeck remove 3f0c9a52-6b1e-4d8e-9a40-2f1f8c1f0d11\n\
        \x20 servicedeck demo\n\
        \x20 servicedeck completions bash > /usr/share/bash-completion/completions/servicedeck",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the services the backend holds.
    #[command(
        visible_alias = "ls",
        about = "List services",
        after_help = "EXAMPLES:\n\
            \x20 servicedeck list\n\
            \x20 servicedeck list --format csv > services.csv"
    )]
    List(ListArgs),

    /// Create the seed catalog (the "Learn More" action).
    #[command(
        about = "Seed the service catalog",
        after_help = "EXAMPLES:\n\
            \x20 servicedeck seed\n\
            \x20 servicedeck seed --catalog my-services.json"
    )]
    Seed(SeedArgs),

    /// Delete one service (the card-tap action).
    #[command(
        visible_alias = "rm",
        about = "Remove a service",
        after_help = "EXAMPLES:\n\
            \x20 servicedeck remove 3f0c9a52-6b1e-4d8e-9a40-2f1f8c1f0d11"
    )]
    Remove(RemoveArgs),

    /// Trigger the "Get Started" confirmation.
    #[command(about = "Press the primary action")]
    Press(PressArgs),

    /// Render the showcase screen.
    #[command(
        about = "Render the screen",
        after_help = "EXAMPLES:\n\
            \x20 servicedeck render --theme dark\n\
            \x20 servicedeck render --width 768 --format json"
    )]
    Render(RenderArgs),

    /// Run the end-to-end scenarios against an in-memory backend.
    #[command(about = "Run the end-to-end demo")]
    Demo(DemoArgs),

    /// Initialise a servicedeck configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 servicedeck init           # default location\n\
            \x20 servicedeck init --local   # ./servicedeck.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 servicedeck completions bash > ~/.local/share/bash-completion/completions/servicedeck\n\
            \x20 servicedeck completions zsh  > ~/.zfunc/_servicedeck\n\
            \x20 servicedeck completions fish > ~/.config/fish/completions/servicedeck.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the servicedeck configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 servicedeck config get backend.kind\n\
            \x20 servicedeck config list\n\
            \x20 servicedeck config path"
    )]
    Config(ConfigCommands),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `servicedeck list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One title per line.
    Plain,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── seed ──────────────────────────────────────────────────────────────────────

/// Arguments for `servicedeck seed`.
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// JSON array of `{"title", "description"}` objects to create instead of
    /// the built-in catalog.
    #[arg(long = "catalog", value_name = "FILE", help = "Custom catalog file")]
    pub catalog: Option<PathBuf>,

    /// Print what would be created without calling the backend.
    #[arg(long = "dry-run", help = "Show what would be created")]
    pub dry_run: bool,
}

// ── remove ────────────────────────────────────────────────────────────────────

/// Arguments for `servicedeck remove`.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Backend identifier of the service.
    #[arg(value_name = "ID", help = "Service id")]
    pub id: String,
}

// ── press ─────────────────────────────────────────────────────────────────────

/// Arguments for `servicedeck press`.
#[derive(Debug, Args)]
pub struct PressArgs {
    /// Dismiss the confirmation without waiting for input.
    #[arg(short = 'y', long = "yes", help = "Dismiss without prompting")]
    pub yes: bool,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `servicedeck render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Colour theme (overrides `display.theme`).
    #[arg(long = "theme", value_enum, help = "Colour theme")]
    pub theme: Option<ThemeArg>,

    /// Viewport width in logical pixels (overrides `display.viewport_width`).
    #[arg(long = "width", value_name = "PX", help = "Viewport width")]
    pub width: Option<u32>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    pub format: RenderFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Indented outline of the screen.
    Text,
    /// The full screen tree.
    Json,
}

// ── demo ──────────────────────────────────────────────────────────────────────

/// Arguments for `servicedeck demo`.
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Print the final screen after the scenarios ran.
    #[arg(long = "show-screen", help = "Render the screen at the end")]
    pub show_screen: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `servicedeck init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `servicedeck.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `servicedeck completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `servicedeck config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `backend.kind`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbose_help_names_what_each_level_logs() {
        let cmd = Cli::command();
        let verbose = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "verbose")
            .unwrap();
        let help = verbose.get_long_help().unwrap().to_string();

        assert!(help.contains("snapshot swaps"));
        assert!(help.contains("harness sessions"));
    }

    #[test]
    fn parse_remove_command() {
        let cli = Cli::parse_from(["servicedeck", "remove", "abc"]);
        match cli.command {
            Commands::Remove(args) => assert_eq!(args.id, "abc"),
            other => panic!("expected Remove, got {other:?}"),
        }
    }

    #[test]
    fn list_defaults_to_table() {
        let cli = Cli::parse_from(["servicedeck", "ls"]);
        match cli.command {
            Commands::List(args) => assert_eq!(args.format, ListFormat::Table),
            other => panic!("expected List, got {other:?}"),
        }
    }

    #[test]
    fn render_accepts_theme_and_width() {
        let cli = Cli::parse_from(["servicedeck", "render", "--theme", "dark", "--width", "768"]);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.theme, Some(ThemeArg::Dark));
                assert_eq!(args.width, Some(768));
            }
            other => panic!("expected Render, got {other:?}"),
        }
    }

    #[test]
    fn remove_requires_id() {
        assert!(Cli::try_parse_from(["servicedeck", "remove"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["servicedeck", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
