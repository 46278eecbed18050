use crate::provider::CompletionOptions;
use serde::{Deserialize, Serialize};

/// Model provider profile owned by the provider domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,

    /// Provider type.
    pub provider_type: ProviderType,

    /// Model identifier.
    pub model: String,

    /// API key optional and can be loaded from environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL or endpoint provider specific.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Default completion options for this provider.
    #[serde(default)]
    pub default_options: CompletionOptions,
}

/// Provider type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "ollama")]
    Ollama,
    #[serde(rename = "local")]
    LocalCustom,
}

impl ProviderType {
    /// Short identifier used in CLI flags, output, and profile files.
    pub fn slug(self) -> &'static str {
        match self {
            ProviderType::OpenAI => "openai",
            ProviderType::Ollama => "ollama",
            ProviderType::LocalCustom => "local",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl ProviderConfig {
    fn endpoint_has_scheme(endpoint: &str) -> bool {
        endpoint.starts_with("http://") || endpoint.starts_with("https://")
    }

    fn infer_endpoint_scheme(provider_type: ProviderType, endpoint: &str) -> String {
        let endpoint = endpoint.trim();
        if provider_type == ProviderType::LocalCustom && !Self::endpoint_has_scheme(endpoint) {
            format!("https://{}", endpoint)
        } else {
            endpoint.to_string()
        }
    }

    pub fn normalized_endpoint(&self) -> Option<String> {
        self.endpoint
            .as_deref()
            .map(|endpoint| Self::infer_endpoint_scheme(self.provider_type, endpoint))
    }

    /// Resolve the API key: explicit config value first, then environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key.clone().or_else(|| match self.provider_type {
            ProviderType::OpenAI => std::env::var("OPENAI_API_KEY").ok(),
            ProviderType::Ollama | ProviderType::LocalCustom => None,
        })
    }

    pub fn endpoint_url_is_valid(provider_type: ProviderType, endpoint: &str) -> bool {
        let endpoint = Self::infer_endpoint_scheme(provider_type, endpoint);
        if !Self::endpoint_has_scheme(&endpoint) {
            return false;
        }

        let Some(rest) = endpoint.split_once("://").map(|(_, rest)| rest) else {
            return false;
        };

        if rest.is_empty() || rest.chars().any(char::is_whitespace) {
            return false;
        }

        let authority = rest.split('/').next().unwrap_or_default();
        if authority.is_empty() {
            return false;
        }

        let host_port = authority.rsplit('@').next().unwrap_or(authority);
        let host = host_port.split(':').next().unwrap_or_default();
        if host.is_empty() {
            return false;
        }

        host == "localhost" || host.contains('.') || host.parse::<std::net::IpAddr>().is_ok()
    }

    /// Validate provider configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            if !Self::endpoint_url_is_valid(self.provider_type, endpoint) {
                return Err(format!("Invalid endpoint URL: {}", endpoint));
            }
        }

        if self.provider_type == ProviderType::LocalCustom && self.endpoint.is_none() {
            return Err("Endpoint is required for local custom provider".to_string());
        }

        if let Some(temp) = self.default_options.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temp
                ));
            }
        }

        Ok(())
    }
}
