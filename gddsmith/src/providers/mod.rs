//! Text and image generation providers.
//!
//! The pipeline only sees the [`CompletionProvider`] and [`ImageProvider`]
//! traits; [`OpenAiProvider`] is the production implementation of both.

mod openai;

pub use openai::OpenAiProvider;

use crate::errors::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions framing the conversation.
    System,
    /// The request.
    User,
    /// A turn attributed to the model.
    Assistant,
}

/// One message of a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A completed chat call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text.
    pub content: String,
    /// Model that served the call.
    pub model: String,
    /// Prompt tokens reported by the provider.
    pub input_tokens: u64,
    /// Completion tokens reported by the provider.
    pub output_tokens: u64,
}

impl CompletionResponse {
    /// Returns total tokens.
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Where the image can be fetched.
    pub url: String,
}

/// Chat completion backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends the messages and returns the first choice.
    async fn complete(&self, messages: &[ChatMessage])
        -> Result<CompletionResponse, ProviderError>;
}

/// Image generation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates one image for the prompt.
    async fn generate(&self, prompt: &str) -> Result<ImageResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_shape() {
        let value = serde_json::to_value(ChatMessage::assistant("Gamer C: ...")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"role": "assistant", "content": "Gamer C: ..."})
        );
    }

    #[test]
    fn test_total_tokens() {
        let response = CompletionResponse {
            content: String::new(),
            model: "gpt-4".to_string(),
            input_tokens: 12,
            output_tokens: 30,
        };
        assert_eq!(response.total_tokens(), 42);
    }
}
