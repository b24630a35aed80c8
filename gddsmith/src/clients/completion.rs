//! Token-accounted chat completions.

use crate::core::TokenUsage;
use crate::errors::GddError;
use crate::providers::{ChatMessage, CompletionProvider};
use std::sync::Arc;
use tracing::debug;

/// Issues chat calls and charges their reported token counts to a run.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient").finish_non_exhaustive()
    }
}

impl CompletionClient {
    /// Wraps a provider.
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Returns the text of the top choice.
    ///
    /// Usage is only recorded when the call succeeds. Failures are returned
    /// as-is; nothing is retried.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        usage: &mut TokenUsage,
    ) -> Result<String, GddError> {
        let response = self.provider.complete(messages).await?;
        usage.record(response.input_tokens, response.output_tokens);
        debug!(
            model = %response.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Completion recorded"
        );
        Ok(response.content)
    }
}
