//! Image generation with estimated token accounting.

use crate::core::TokenUsage;
use crate::errors::GddError;
use crate::providers::ImageProvider;
use std::sync::Arc;
use tracing::debug;

/// Approximates the input cost of an image prompt as its whitespace-delimited
/// word count. Image endpoints report no usage.
#[must_use]
pub fn estimate_prompt_tokens(prompt: &str) -> u64 {
    prompt.split_whitespace().count() as u64
}

/// Generates images and charges an estimated input cost to a run.
#[derive(Clone)]
pub struct ImageClient {
    provider: Arc<dyn ImageProvider>,
}

impl std::fmt::Debug for ImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageClient").finish_non_exhaustive()
    }
}

impl ImageClient {
    /// Wraps a provider.
    #[must_use]
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    /// Returns the URL of one generated image.
    ///
    /// Only the input side is charged; output tokens are left untouched.
    pub async fn generate(&self, prompt: &str, usage: &mut TokenUsage) -> Result<String, GddError> {
        let image = self.provider.generate(prompt).await?;
        let estimated = estimate_prompt_tokens(prompt);
        usage.record_input(estimated);
        debug!(estimated_tokens = estimated, url = %image.url, "Image recorded");
        Ok(image.url)
    }
}
