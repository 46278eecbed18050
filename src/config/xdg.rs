//! XDG path helpers for config and provider profiles.

use crate::error::ApiError;
use std::path::PathBuf;

fn project_dirs() -> Result<directories::ProjectDirs, ApiError> {
    directories::ProjectDirs::from("", "toolsmith", "toolsmith").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform config directory".to_string())
    })
}

/// Base config directory (~/.config/toolsmith on Linux).
pub fn config_dir() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Default config file path (<config_dir>/config.toml).
pub fn config_file_path() -> Result<PathBuf, ApiError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Directory holding per-provider TOML profiles (<config_dir>/providers).
pub fn providers_dir() -> Result<PathBuf, ApiError> {
    Ok(config_dir()?.join("providers"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_dir_is_under_config_dir() {
        let config = config_dir().unwrap();
        let providers = providers_dir().unwrap();
        assert!(providers.starts_with(&config));
        assert!(providers.ends_with("providers"));
    }
}
