//! Domain error types shared across the crate.

use thiserror::Error;

/// Main error type for toolsmith operations.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Write error: {0}")]
    WriteError(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::ProviderError(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ProviderError(format!("Failed to decode response: {}", err))
    }
}
