//! Flags shared by every `servicedeck` subcommand.
//!
//! Flattened into [`super::Cli`]; each one is `global`, so
//! `servicedeck list -v` and `servicedeck -v list` mean the same thing.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log more of what the deck does. `RUST_LOG` overrides the count.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more (-v seeds and deletes, -vv snapshots, -vvv everything)",
        long_help = "Log more of what the deck does, on stderr and in output.log_file:
    (none)  - Backend failures and partial listings
    -v      - Seed runs, deletions, confirmations, harness sessions
    -vv     - Every record created, snapshot swaps, element lookups
    -vvv    - Trace output from every servicedeck crate"
    )]
    pub verbose: u8,

    /// Only errors reach stderr; listings and JSON still print.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print data only; skip headers, hints and confirmation prompts"
    )]
    pub quiet: bool,

    /// Plain glyphs and headers. Set by `NO_COLOR` unless it is empty or `0`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Read this TOML file instead of the discovered `servicedeck.toml`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Use this config file instead of servicedeck.toml"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How listings, reports and screens are printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering for listings, suite reports and screen outlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Coloured tables with a spinner while the backend answers.
    Human,
    /// Tables without colour or spinner.
    Plain,
    /// One JSON document on stdout: services, the suite report or the screen tree.
    Json,
}
