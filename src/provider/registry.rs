//! Provider registry: profiles from the config file plus the XDG provider
//! directory. XDG profiles override config-file profiles of the same name.

use crate::config::ToolsmithConfig;
use crate::error::ApiError;
use crate::provider::profile::{ProviderConfig, ProviderType};
use crate::provider::{ModelProviderClient, OpenAiChatClient};
use std::collections::HashMap;
use std::path::PathBuf;

pub struct ProviderRegistry {
    providers: HashMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn get(&self, provider_name: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_name)
    }

    pub fn get_or_error(&self, provider_name: &str) -> Result<&ProviderConfig, ApiError> {
        self.get(provider_name).ok_or_else(|| {
            ApiError::ProviderNotConfigured(format!("Unknown provider: {}", provider_name))
        })
    }

    /// List all providers sorted by name.
    pub fn list(&self) -> Vec<&ProviderConfig> {
        let mut providers: Vec<_> = self.providers.values().collect();
        providers.sort_by(|a, b| a.provider_name.cmp(&b.provider_name));
        providers
    }

    /// Load provider profiles from the `[providers]` config section.
    pub fn load_from_config(&mut self, config: &ToolsmithConfig) -> Result<(), ApiError> {
        for (name, provider) in &config.providers {
            let mut provider = provider.clone();
            if provider.provider_name.is_none() {
                provider.provider_name = Some(name.clone());
            }
            provider
                .validate()
                .map_err(|e| ApiError::ConfigError(format!("Invalid provider '{}': {}", name, e)))?;
            self.providers.insert(name.clone(), provider);
        }
        Ok(())
    }

    /// Load provider profiles from the XDG providers directory, replacing any
    /// same-named profiles already registered. Unreadable or invalid files are
    /// logged and skipped.
    pub fn load_from_xdg(&mut self) -> Result<(), ApiError> {
        let providers_dir = crate::config::xdg::providers_dir()?;
        if !providers_dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(&providers_dir).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to read providers directory {}: {}",
                providers_dir.display(),
                e
            ))
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        providers_dir.display(),
                        e
                    );
                    continue;
                }
            };

            let path = entry.path();
            if path.extension() != Some(std::ffi::OsStr::new("toml")) {
                continue;
            }

            let provider_name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    tracing::warn!("Invalid provider filename non UTF8: {:?}", path);
                    continue;
                }
            };

            let content = match std::fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!("Failed to read provider config {}: {}", path.display(), e);
                    continue;
                }
            };

            let mut config: ProviderConfig = match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Failed to parse provider config {}: {}", path.display(), e);
                    continue;
                }
            };

            if let Some(config_name) = &config.provider_name {
                if config_name != &provider_name {
                    tracing::warn!(
                        "Provider name mismatch in {}: filename={}, config={}",
                        path.display(),
                        provider_name,
                        config_name
                    );
                }
            }

            if config.provider_name.is_none() {
                config.provider_name = Some(provider_name.clone());
            }

            if let Err(e) = config.validate() {
                tracing::error!("Invalid provider config {}: {}", path.display(), e);
                continue;
            }

            self.providers.insert(provider_name, config);
        }

        Ok(())
    }

    /// Drop a provider from the in-memory registry.
    pub fn remove(&mut self, provider_name: &str) -> Option<ProviderConfig> {
        self.providers.remove(provider_name)
    }

    /// Path where a provider profile is stored (<providers_dir>/<name>.toml).
    pub fn provider_config_path(&self, provider_name: &str) -> Result<PathBuf, ApiError> {
        Ok(crate::config::xdg::providers_dir()?.join(format!("{}.toml", provider_name)))
    }

    /// Persist a provider profile to the XDG providers directory.
    pub fn save_provider_config(
        &self,
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<(), ApiError> {
        config
            .validate()
            .map_err(|e| ApiError::ConfigError(format!("Invalid provider config: {}", e)))?;
        let path = self.provider_config_path(provider_name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::ConfigError(format!("Failed to create providers directory: {}", e))
            })?;
        }
        let content = toml::to_string_pretty(config).map_err(|e| {
            ApiError::ConfigError(format!("Failed to serialize provider config: {}", e))
        })?;
        std::fs::write(&path, content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to write provider config {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Delete a provider profile from the XDG providers directory.
    pub fn delete_provider_config(&self, provider_name: &str) -> Result<(), ApiError> {
        let path = self.provider_config_path(provider_name)?;
        std::fs::remove_file(&path).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to delete provider config {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Construct a client for a registered provider.
    pub fn create_client(
        &self,
        provider_name: &str,
    ) -> Result<Box<dyn ModelProviderClient>, ApiError> {
        let provider = self.get_or_error(provider_name)?;
        let api_key = provider.resolved_api_key();

        let endpoint = match provider.provider_type {
            ProviderType::OpenAI => {
                if api_key.is_none() {
                    return Err(ApiError::ProviderNotConfigured(
                        "OpenAI API key required (set in config or OPENAI_API_KEY env var)"
                            .to_string(),
                    ));
                }
                provider
                    .normalized_endpoint()
                    .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            }
            ProviderType::Ollama => provider
                .normalized_endpoint()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string()),
            ProviderType::LocalCustom => provider.normalized_endpoint().ok_or_else(|| {
                ApiError::ProviderNotConfigured(
                    "LocalCustom provider requires endpoint".to_string(),
                )
            })?,
        };

        let client = OpenAiChatClient::new(endpoint, api_key, provider.model.clone())?;
        Ok(Box::new(client))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
