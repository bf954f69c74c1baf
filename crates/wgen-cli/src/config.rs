//! Layered configuration for wgen using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`WGEN_*` prefix, `__` as section separator,
//!    e.g. `WGEN_CONVERT__VARIANT=rocker`)
//! 2. Project-level `worldgen.toml`
//! 3. User-level `~/.config/worldgen/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wgen_core::{ids, variant::SchemaVariant};

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),
}

/// Which run counter a degraded-but-non-empty rubric increments. The row
/// produces a document either way; only the accounting differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedStat {
    Warnings,
    Skipped,
}

const fn default_variant() -> SchemaVariant {
    SchemaVariant::Worlds
}

const fn default_slug_max_length() -> usize {
    ids::DEFAULT_SLUG_MAX_LENGTH
}

fn default_sequential_prefix() -> String {
    ids::DEFAULT_SEQUENTIAL_PREFIX.to_string()
}

const fn default_degraded_stat() -> DegradedStat {
    DegradedStat::Warnings
}

fn default_out_dir() -> String {
    "output".to_string()
}

/// Conversion defaults, overridable per run via CLI flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// Document variant used when `--variant` is not given.
    #[serde(default = "default_variant")]
    pub variant: SchemaVariant,

    /// Longest slug produced by the slug id strategy.
    #[serde(default = "default_slug_max_length")]
    pub slug_max_length: usize,

    /// Prefix of sequential ids.
    #[serde(default = "default_sequential_prefix")]
    pub sequential_prefix: String,

    /// Counter a degraded rubric feeds.
    #[serde(default = "default_degraded_stat")]
    pub degraded_stat: DegradedStat,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            slug_max_length: default_slug_max_length(),
            sequential_prefix: default_sequential_prefix(),
            degraded_stat: default_degraded_stat(),
        }
    }
}

/// Output sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Destination directory for generated documents.
    #[serde(default = "default_out_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WgenConfig {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl WgenConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] when a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain. Public so tests can layer on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("worldgen.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("WGEN_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("worldgen").join("config.toml"))
    }
}
