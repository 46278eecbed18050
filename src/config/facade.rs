//! ConfigLoader facade: defaults, then config file, then environment overlay.

use super::ToolsmithConfig;
use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the default XDG location and environment.
    /// A missing config file is not an error; defaults apply.
    pub fn load() -> Result<ToolsmithConfig, ConfigError> {
        let mut builder = Config::builder();
        if let Ok(path) = crate::config::xdg::config_file_path() {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        builder
            .add_source(Self::env_overlay())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a specific file, plus environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ToolsmithConfig, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Self::env_overlay())
            .build()?
            .try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> ToolsmithConfig {
        ToolsmithConfig::default()
    }

    // TOOLSMITH_GENERATION__DEFAULT_PROVIDER=x overrides generation.default_provider
    fn env_overlay() -> Environment {
        Environment::with_prefix("TOOLSMITH")
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_file_reads_generation_section() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[generation]\ndefault_provider = \"openai\"\noutput_dir = \"/tmp/tools\""
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.generation.default_provider.as_deref(), Some("openai"));
        assert_eq!(
            config.generation.output_dir,
            std::path::PathBuf::from("/tmp/tools")
        );
    }

    #[test]
    fn defaults_apply_for_missing_sections() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "# empty").unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert!(config.generation.default_provider.is_none());
        assert!(config.providers.is_empty());
        assert_eq!(config.logging.level, "info");
    }
}
