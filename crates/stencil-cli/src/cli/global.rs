//! Flags accepted by every subcommand.
//!
//! They are `global = true`, so `stencil generate gen/t.rs -q` and
//! `stencil -q generate gen/t.rs` are the same invocation.

use std::path::PathBuf;

use clap::Args;

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level for the generation pipeline on stderr.
    ///
    /// Log events never replace the `Error:` lines of a failed run.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log pipeline progress (-v, -vv, -vvv)",
        long_help = "Log the generation pipeline on stderr. Repeat for more detail:
    -v     each stage (loaded, transformed, persisted)
    -vv    every output file, skip and collision decision
    -vvv   everything, including syntax backend internals
Without -v only warnings are logged. RUST_LOG takes precedence."
    )]
    pub verbose: u8,

    /// Only print `Error:` lines and JSON.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only, no per-file progress"
    )]
    pub quiet: bool,

    /// Plain status lines; also set by `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Use this file instead of the user and `.stencil.toml` files.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the usual locations"
    )]
    pub config: Option<PathBuf>,

    /// `json` prints the generation report instead of status lines.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How to print results (json emits the report)"
    )]
    pub output_format: OutputFormat,
}

/// How results reach the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from config, else human on a terminal and plain when piped.
    #[default]
    Auto,
    /// Coloured status lines.
    Human,
    /// Status lines without colour.
    Plain,
    /// The generation report as JSON.
    Json,
}
