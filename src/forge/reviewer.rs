//! Code review: one prompt, raw text back.

use crate::error::ApiError;
use crate::forge::prompt::review_prompt;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};

pub struct Reviewer<'a> {
    client: &'a dyn ModelProviderClient,
    options: CompletionOptions,
}

impl<'a> Reviewer<'a> {
    pub fn new(client: &'a dyn ModelProviderClient) -> Self {
        Self {
            client,
            options: CompletionOptions::default(),
        }
    }

    /// Review the given code and return the reviewer's response verbatim,
    /// trimmed. The review is free-form text; no fields are parsed out of it.
    pub async fn review(&self, code: &str) -> Result<String, ApiError> {
        let messages = [ChatMessage::user(review_prompt(code))];
        let response = self.client.complete(&messages, &self.options).await?;
        Ok(response.trim().to_string())
    }
}
