//! Provider diagnostics: profile validation and connectivity checks.

use crate::error::ApiError;
use crate::provider::profile::{ProviderConfig, ProviderType};
use crate::provider::{ChatMessage, CompletionOptions, ProviderRegistry};

/// Accumulated outcome of validating one provider profile. Checks record what
/// passed; errors make the profile invalid; warnings do neither.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub provider_name: String,
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            checks: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_check(&mut self, description: impl Into<String>, passed: bool) {
        self.checks.push((description.into(), passed));
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_checks(&self) -> usize {
        self.checks.len()
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }
}

pub struct ProviderDiagnosticsService;

pub fn resolve_api_key_status(provider: &ProviderConfig) -> String {
    match provider.provider_type {
        ProviderType::OpenAI => {
            if provider.api_key.is_some() {
                "Set (from config)".to_string()
            } else if std::env::var("OPENAI_API_KEY").is_ok() {
                "Set (from environment)".to_string()
            } else {
                "Not set".to_string()
            }
        }
        ProviderType::Ollama | ProviderType::LocalCustom => "Not required".to_string(),
    }
}

impl ProviderDiagnosticsService {
    /// Validate a registered provider. An unknown name yields a result with a
    /// single error rather than an Err, so the CLI reports it the same way.
    pub fn validate_provider(
        registry: &ProviderRegistry,
        provider_name: &str,
    ) -> Result<ValidationResult, ApiError> {
        match registry.get(provider_name) {
            Some(provider) => Ok(Self::validate_profile(provider_name, provider)),
            None => {
                let mut result = ValidationResult::new(provider_name);
                result.add_error("Provider not found in registry");
                Ok(result)
            }
        }
    }

    /// Run every validation check against a profile, accumulating checks and
    /// errors without short-circuiting.
    pub fn validate_profile(provider_name: &str, provider: &ProviderConfig) -> ValidationResult {
        let mut result = ValidationResult::new(provider_name);

        if provider.model.trim().is_empty() {
            result.add_error("Model name cannot be empty");
        } else {
            result.add_check("Model is not empty", true);
        }

        match provider.provider_type {
            ProviderType::OpenAI => {
                if provider.resolved_api_key().is_some() {
                    let source = if provider.api_key.is_some() {
                        "from config"
                    } else {
                        "from environment"
                    };
                    result.add_check(format!("API key available ({})", source), true);
                } else {
                    result.add_error("API key not found (set OPENAI_API_KEY or add to config)");
                }
            }
            ProviderType::Ollama | ProviderType::LocalCustom => {
                result.add_check("API key not required for local provider", true);
            }
        }

        if let Some(endpoint) = &provider.endpoint {
            if ProviderConfig::endpoint_url_is_valid(provider.provider_type, endpoint) {
                result.add_check("Endpoint URL is valid", true);
            } else {
                result.add_error(format!("Invalid endpoint URL: {}", endpoint));
            }
        } else if provider.provider_type == ProviderType::LocalCustom {
            result.add_error("Endpoint is required for local custom provider");
        } else {
            result.add_check("Endpoint URL (optional)", true);
        }

        if let Some(temp) = provider.default_options.temperature {
            if (0.0..=2.0).contains(&temp) {
                result.add_check("Temperature is in valid range (0.0-2.0)", true);
            } else {
                result.add_error(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temp
                ));
            }
        }

        if let Some(max_tokens) = provider.default_options.max_tokens {
            if max_tokens > 0 {
                result.add_check("Max tokens is positive", true);
            } else {
                result.add_error("Max tokens must be positive");
            }
        }

        result
    }

    /// Send a one-message completion to confirm the provider answers.
    pub fn test_connectivity(
        registry: &ProviderRegistry,
        provider_name: &str,
        timeout_secs: u64,
    ) -> Result<String, ApiError> {
        let client = registry.create_client(provider_name)?;
        let messages = [ChatMessage::user("Reply with the single word: ok")];
        let options = CompletionOptions {
            max_tokens: Some(8),
            ..Default::default()
        };
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
        rt.block_on(async {
            tokio::time::timeout(
                std::time::Duration::from_secs(timeout_secs),
                client.complete(&messages, &options),
            )
            .await
            .map_err(|_| {
                ApiError::ProviderError(format!("API connectivity timeout ({}s)", timeout_secs))
            })?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ollama_profile() -> ProviderConfig {
        ProviderConfig {
            provider_name: Some("local-ollama".to_string()),
            provider_type: ProviderType::Ollama,
            model: "llama3".to_string(),
            api_key: None,
            endpoint: Some("http://localhost:11434/v1".to_string()),
            default_options: CompletionOptions {
                temperature: Some(0.2),
                max_tokens: Some(500),
                top_p: None,
            },
        }
    }

    #[test]
    fn valid_profile_accumulates_passing_checks() {
        let result =
            ProviderDiagnosticsService::validate_profile("local-ollama", &ollama_profile());
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
        assert_eq!(result.passed_checks(), result.total_checks());
        assert_eq!(result.total_checks(), 5);
    }

    #[test]
    fn broken_profile_accumulates_every_error() {
        let mut profile = ollama_profile();
        profile.model = "  ".to_string();
        profile.endpoint = Some("http://".to_string());
        profile.default_options.temperature = Some(3.0);

        let result = ProviderDiagnosticsService::validate_profile("broken", &profile);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors[0].contains("Model name cannot be empty"));
        assert!(result.errors[1].contains("Invalid endpoint URL"));
        assert!(result.errors[2].contains("Temperature must be between"));
        // Checks that did pass are still recorded alongside the errors
        assert!(result.passed_checks() > 0);
    }

    #[test]
    fn missing_endpoint_is_an_error_only_for_local_custom() {
        let mut profile = ollama_profile();
        profile.endpoint = None;
        let result = ProviderDiagnosticsService::validate_profile("no-endpoint", &profile);
        assert!(result.is_valid());

        profile.provider_type = ProviderType::LocalCustom;
        let result = ProviderDiagnosticsService::validate_profile("no-endpoint", &profile);
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("Endpoint is required"));
    }

    #[test]
    fn unknown_provider_reports_a_single_error() {
        let registry = ProviderRegistry::new();
        let result =
            ProviderDiagnosticsService::validate_provider(&registry, "ghost").unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.errors, vec!["Provider not found in registry".to_string()]);
        assert_eq!(result.total_checks(), 0);
    }

    #[test]
    fn openai_key_from_config_passes_the_key_check() {
        let profile = ProviderConfig {
            provider_name: Some("work".to_string()),
            provider_type: ProviderType::OpenAI,
            model: "gpt-4".to_string(),
            api_key: Some("sk-test".to_string()),
            endpoint: None,
            default_options: CompletionOptions::default(),
        };
        let result = ProviderDiagnosticsService::validate_profile("work", &profile);
        assert!(result.is_valid());
        assert!(result
            .checks
            .iter()
            .any(|(desc, passed)| desc.contains("API key available (from config)") && *passed));
    }
}
