//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees [`GenerateOptions`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STENCIL_<SECTION>__<KEY>`
//! 3. Config file: `--config FILE`, otherwise the user file and then a local
//!    `.stencil.toml` layered on top of it
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use stencil_core::{application::GenerateOptions, domain::CollisionPolicy};

use crate::{
    cli::TransformKind,
    error::{CliError, CliResult},
};

/// File name of the per-project configuration.
pub const LOCAL_CONFIG_FILE: &str = ".stencil.toml";

const ENV_PREFIX: &str = "STENCIL";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation defaults.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub on_collision: CollisionPolicy,
    /// Octal permission bits, e.g. `"644"`.
    pub file_mode: String,
    pub default_transform: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig {
                on_collision: CollisionPolicy::LastWriteWins,
                file_mode: "644".into(),
                default_transform: TransformKind::Copy.to_string(),
            },
            output: OutputConfig {
                no_color: false,
                format: "human".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file(s), then environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default(
                "generation.on_collision",
                defaults.generation.on_collision.as_str(),
            )?
            .set_default("generation.file_mode", defaults.generation.file_mode)?
            .set_default(
                "generation.default_transform",
                defaults.generation.default_transform,
            )?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

impl GenerationConfig {
    /// Parse `file_mode` as octal permission bits.
    pub fn mode(&self) -> CliResult<u32> {
        let digits = self.file_mode.trim().trim_start_matches("0o");
        u32::from_str_radix(digits, 8).map_err(|e| CliError::ConfigError {
            message: format!(
                "generation.file_mode '{}' is not an octal mode",
                self.file_mode
            ),
            source: Some(Box::new(e)),
        })
    }

    /// The configured default transform.
    pub fn transform(&self) -> CliResult<TransformKind> {
        TransformKind::from_str(&self.default_transform, true).map_err(|_| {
            CliError::ConfigError {
                message: format!(
                    "generation.default_transform '{}' is not a known transform",
                    self.default_transform
                ),
                source: None,
            }
        })
    }

    /// Core options for one run; CLI overrides are applied by the caller.
    pub fn options(&self) -> CliResult<GenerateOptions> {
        Ok(GenerateOptions {
            collision_policy: self.on_collision,
            file_mode: self.mode()?,
            dry_run: false,
        })
    }
}
