//! OpenAI-compatible HTTP provider.

use super::{ChatMessage, CompletionProvider, CompletionResponse, ImageProvider, ImageResponse};
use crate::config::ProviderConfig;
use crate::errors::ProviderError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Talks to `/chat/completions` and `/images/generations` of an
/// OpenAI-compatible API.
///
/// Calls are single-shot: no retries, no timeouts beyond the client's.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl OpenAiProvider {
    /// Creates a provider with a fresh HTTP client.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a provider sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// The provider settings.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), error_message(&body)));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::malformed(format!("{path}: {e}")))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<CompletionResponse, ProviderError> {
        debug!(
            model = %self.config.chat_model,
            messages = messages.len(),
            "Requesting chat completion"
        );

        let request = ChatRequest {
            model: &self.config.chat_model,
            messages,
        };
        let body: ChatResponse = self.post_json("chat/completions", &request).await?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed("response missing choices[0]"))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| ProviderError::malformed("response missing content in choices[0]"))?;
        let usage = body
            .usage
            .ok_or_else(|| ProviderError::malformed("response missing usage"))?;

        debug!(
            input_tokens = usage.prompt_tokens,
            output_tokens = usage.completion_tokens,
            "Chat completion finished"
        );

        Ok(CompletionResponse {
            content,
            model: body.model.unwrap_or_else(|| self.config.chat_model.clone()),
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        })
    }
}

#[async_trait]
impl ImageProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<ImageResponse, ProviderError> {
        debug!(size = %self.config.image_size, "Requesting image generation");

        let request = ImageRequest {
            model: self.config.image_model.as_deref(),
            prompt,
            n: 1,
            size: &self.config.image_size,
        };
        let body: ImageGenerationResponse =
            self.post_json("images/generations", &request).await?;

        body.data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .map(|url| ImageResponse { url })
            .ok_or_else(|| ProviderError::malformed("response missing data[0].url"))
    }
}

/// Pulls `error.message` out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
