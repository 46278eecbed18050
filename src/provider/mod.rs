//! Model provider integration.
//!
//! Chat-completion providers are opaque text-in/text-out services. The only
//! contract relied on is a model name, role-tagged messages, and a single
//! generated text string in the response.

pub mod clients;
pub mod commands;
pub mod diagnostics;
pub mod profile;
mod registry;

pub use clients::OpenAiChatClient;
pub use diagnostics::ValidationResult;
pub use profile::{ProviderConfig, ProviderType};
pub use registry::ProviderRegistry;

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message role in a chat-completion exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Completion options passed through to the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// Chat-completion client boundary. Implementations block on the network;
/// callers decide whether to time the call out.
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Run one completion and return the generated text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, ApiError>;

    /// Model this client is configured for.
    fn model(&self) -> &str;
}
