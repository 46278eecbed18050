//! Layered configuration: defaults, TOML file, environment overlay.

pub mod facade;
pub mod xdg;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::provider::profile::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsmithConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Generation defaults.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Provider profiles keyed by provider name. XDG profiles override these.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Defaults for the generate/review/revise loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider used when the CLI does not name one.
    #[serde(default)]
    pub default_provider: Option<String>,

    /// Directory where generated tool files are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_provider: None,
            output_dir: default_output_dir(),
        }
    }
}
