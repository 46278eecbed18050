//! Provider command service: single entry point per provider CLI command
//! variant. CLI parses, calls one method per variant, and formats output.

use crate::error::ApiError;
use crate::provider::profile::{ProviderConfig, ProviderType};
use crate::provider::{CompletionOptions, ProviderRegistry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub struct ProviderCommandService;

/// Result of provider list command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderListResult {
    pub providers: Vec<ProviderListItem>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderListItem {
    pub provider_name: String,
    pub provider_type: String,
    pub model: String,
}

/// Result of provider show command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderShowResult {
    pub provider_name: String,
    pub provider_type: String,
    pub model: String,
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_status: Option<String>,
}

/// Result of provider create command.
#[derive(Debug, Clone)]
pub struct ProviderCreateResult {
    pub provider_name: String,
    pub config_path: PathBuf,
}

/// Result of provider remove command.
#[derive(Debug, Clone)]
pub struct ProviderRemoveResult {
    pub provider_name: String,
    pub config_path: PathBuf,
}

impl ProviderCommandService {
    pub fn parse_provider_type(type_str: &str) -> Result<ProviderType, ApiError> {
        match type_str {
            "openai" => Ok(ProviderType::OpenAI),
            "ollama" => Ok(ProviderType::Ollama),
            "local" => Ok(ProviderType::LocalCustom),
            _ => Err(ApiError::ConfigError(format!(
                "Invalid provider type: {}. Must be openai, ollama, or local",
                type_str
            ))),
        }
    }

    pub fn default_endpoint(provider_type: ProviderType) -> Option<String> {
        match provider_type {
            ProviderType::OpenAI => Some("https://api.openai.com/v1".to_string()),
            ProviderType::Ollama => Some("http://localhost:11434/v1".to_string()),
            ProviderType::LocalCustom => None,
        }
    }

    pub fn required_api_key_env_var(provider_type: ProviderType) -> Option<&'static str> {
        match provider_type {
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Ollama | ProviderType::LocalCustom => None,
        }
    }

    pub fn run_list(
        registry: &ProviderRegistry,
        type_filter: Option<&str>,
    ) -> Result<ProviderListResult, ApiError> {
        let filter = type_filter.map(Self::parse_provider_type).transpose()?;
        let providers: Vec<ProviderListItem> = registry
            .list()
            .into_iter()
            .filter(|p| filter.map(|f| p.provider_type == f).unwrap_or(true))
            .map(|p| ProviderListItem {
                provider_name: p.provider_name.clone().unwrap_or_default(),
                provider_type: p.provider_type.to_string(),
                model: p.model.clone(),
            })
            .collect();
        let total = providers.len();
        Ok(ProviderListResult { providers, total })
    }

    pub fn run_show(
        registry: &ProviderRegistry,
        provider_name: &str,
        include_credentials: bool,
    ) -> Result<ProviderShowResult, ApiError> {
        let provider = registry.get_or_error(provider_name)?;
        let api_key_status = include_credentials
            .then(|| crate::provider::diagnostics::resolve_api_key_status(provider));
        Ok(ProviderShowResult {
            provider_name: provider_name.to_string(),
            provider_type: provider.provider_type.to_string(),
            model: provider.model.clone(),
            endpoint: provider.endpoint.clone(),
            api_key_status,
        })
    }

    pub fn run_create(
        registry: &mut ProviderRegistry,
        provider_name: &str,
        provider_type: ProviderType,
        model: String,
        endpoint: Option<String>,
        api_key: Option<String>,
        default_options: CompletionOptions,
    ) -> Result<ProviderCreateResult, ApiError> {
        let config = ProviderConfig {
            provider_name: Some(provider_name.to_string()),
            provider_type,
            model,
            api_key,
            endpoint,
            default_options,
        };
        let config_path = registry.provider_config_path(provider_name)?;
        registry.save_provider_config(provider_name, &config)?;
        registry.load_from_xdg()?;
        Ok(ProviderCreateResult {
            provider_name: provider_name.to_string(),
            config_path,
        })
    }

    pub fn run_remove(
        registry: &mut ProviderRegistry,
        provider_name: &str,
    ) -> Result<ProviderRemoveResult, ApiError> {
        registry.get_or_error(provider_name)?;
        let config_path = registry.provider_config_path(provider_name)?;
        registry.delete_provider_config(provider_name)?;
        registry.remove(provider_name);
        Ok(ProviderRemoveResult {
            provider_name: provider_name.to_string(),
            config_path,
        })
    }
}
