//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stencil_adapters::transforms::{PassThrough, Specialize, SplitItems};
use stencil_core::domain::CollisionPolicy;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate concrete source files from a generic template",
    long_about = "Stencil parses one generic source file, runs a transform over it \
                  and writes every named result next to your code as \
                  <name>_<input file name>.",
    after_help = "EXAMPLES:\n\
        \x20 stencil generate gen/sliceutil.rs -o src -t specialize --types i32,f64\n\
        \x20 stencil generate gen/shapes.rs -o src -t split\n\
        \x20 stencil transforms\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
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
    /// Run a transform over a generic source file.
    #[command(
        visible_alias = "gen",
        about = "Generate files from a template",
        after_help = "EXAMPLES:\n\
            \x20 stencil generate gen/sliceutil.rs -o src -t specialize --types i32,f64\n\
            \x20 stencil generate gen/stack.rs -o src -t specialize --placeholder Elem --types String\n\
            \x20 stencil generate gen/shapes.rs -o src -t split --on-collision reject\n\
            \x20 stencil generate gen/api.rs -o src -t copy --name tidy --dry-run"
    )]
    Generate(GenerateArgs),

    /// List available transforms.
    #[command(
        visible_alias = "ls",
        about = "List available transforms",
        after_help = "EXAMPLES:\n\
            \x20 stencil transforms\n\
            \x20 stencil transforms --format json"
    )]
    Transforms(TransformsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Stencil configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config init --local\n\
            \x20 stencil config get generation.on_collision\n\
            \x20 stencil config list"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// The generic source file.
    #[arg(value_name = "INPUT", help = "Generic source file to read")]
    pub input: PathBuf,

    /// Directory that receives the generated files.  Never created.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Existing output directory"
    )]
    pub output: PathBuf,

    /// Transform to run; defaults to `generation.default_transform`.
    #[arg(
        short = 't',
        long = "transform",
        value_name = "TRANSFORM",
        value_enum,
        help = "Transform to run"
    )]
    pub transform: Option<TransformKind>,

    /// Concrete types for `specialize`.
    #[arg(
        long = "types",
        value_name = "TYPES",
        value_delimiter = ',',
        help = "Comma-separated concrete types (specialize)",
        long_help = "Comma-separated concrete types (specialize). Each type names its \
                     output: paths join their identifiers (Vec<u8> -> Vecu8), other \
                     shapes spell out their structure (&str -> ref_str, [u8; 4] -> \
                     array_u8_4). Two types that would share a name are rejected."
    )]
    pub types: Vec<String>,

    /// Placeholder type declared in the template; `T` when omitted.
    #[arg(
        long = "placeholder",
        value_name = "IDENT",
        help = "Placeholder type to replace, default T (specialize)"
    )]
    pub placeholder: Option<String>,

    /// Output name for `copy`.
    #[arg(long = "name", value_name = "NAME", help = "Output name (copy)")]
    pub name: Option<String>,

    /// Collision policy; defaults to `generation.on_collision`.
    #[arg(
        long = "on-collision",
        value_name = "POLICY",
        value_enum,
        help = "What to do when two outputs map to the same file"
    )]
    pub on_collision: Option<CollisionArg>,

    /// Preview the files without writing them.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── transforms ────────────────────────────────────────────────────────────────

/// Arguments for `stencil transforms`.
#[derive(Debug, Args)]
pub struct TransformsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `transforms` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
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

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file.
    Init {
        /// Write `.stencil.toml` in the current directory instead.
        #[arg(long = "local", help = "Create local configuration in current directory")]
        local: bool,

        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.on_collision`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Shipped transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TransformKind {
    /// Re-emit the input unchanged.
    Copy,
    /// Instantiate a placeholder type per concrete type.
    Specialize,
    /// Split traits from everything else.
    Split,
}

impl TransformKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copy => PassThrough::NAME,
            Self::Specialize => Specialize::NAME,
            Self::Split => SplitItems::NAME,
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collision policies as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    /// Later outputs overwrite earlier ones.
    #[value(name = "last-wins")]
    LastWins,
    /// Later duplicates are skipped.
    #[value(name = "first-wins")]
    FirstWins,
    /// Any collision aborts before writing.
    Reject,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::LastWins => Self::LastWriteWins,
            CollisionArg::FirstWins => Self::FirstWriteWins,
            CollisionArg::Reject => Self::Reject,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
