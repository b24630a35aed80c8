//! Scripted providers for testing.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::ProviderError;
use crate::providers::{
    ChatMessage, CompletionProvider, CompletionResponse, ImageProvider, ImageResponse, Role,
};

type Responder = Box<dyn Fn(usize, &[ChatMessage]) -> String + Send + Sync>;
type Matcher = Box<dyn Fn(&[ChatMessage]) -> bool + Send + Sync>;

struct FailurePlan {
    matcher: Matcher,
    nth: usize,
    seen: usize,
}

/// A completion provider answering from a closure and recording every call.
///
/// The closure receives the zero-based call index and the messages. Each
/// answer reports the same fixed token counts.
pub struct ScriptedCompletionProvider {
    responder: Responder,
    input_tokens: u64,
    output_tokens: u64,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    failure: Mutex<Option<FailurePlan>>,
}

impl std::fmt::Debug for ScriptedCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedCompletionProvider")
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

impl ScriptedCompletionProvider {
    /// Creates a provider answering through `responder`.
    #[must_use]
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, &[ChatMessage]) -> String + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            input_tokens: 10,
            output_tokens: 20,
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Answers every call with `"response <index>"`.
    #[must_use]
    pub fn numbered() -> Self {
        Self::new(|index, _| format!("response {index}"))
    }

    /// Sets the token counts reported for every answer.
    #[must_use]
    pub fn with_usage(mut self, input_tokens: u64, output_tokens: u64) -> Self {
        self.input_tokens = input_tokens;
        self.output_tokens = output_tokens;
        self
    }

    /// Fails the `nth` (one-based) call whose messages satisfy `matcher`.
    #[must_use]
    pub fn fail_on<M>(self, nth: usize, matcher: M) -> Self
    where
        M: Fn(&[ChatMessage]) -> bool + Send + Sync + 'static,
    {
        *self.failure.lock() = Some(FailurePlan {
            matcher: Box::new(matcher),
            nth,
            seen: 0,
        });
        self
    }

    /// Every message list received, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().clone()
    }

    /// Number of calls received, failed ones included.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The user message of every call, in order.
    #[must_use]
    pub fn user_prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|messages| {
                messages
                    .iter()
                    .find(|m| m.role == Role::User)
                    .map(|m| m.content.clone())
            })
            .collect()
    }

    /// Token counts reported per answer.
    #[must_use]
    pub fn usage_per_call(&self) -> (u64, u64) {
        (self.input_tokens, self.output_tokens)
    }

    fn should_fail(&self, messages: &[ChatMessage]) -> bool {
        let mut failure = self.failure.lock();
        match failure.as_mut() {
            Some(plan) if (plan.matcher)(messages) => {
                plan.seen += 1;
                plan.seen == plan.nth
            }
            _ => false,
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletionProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<CompletionResponse, ProviderError> {
        let index = {
            let mut calls = self.calls.lock();
            calls.push(messages.to_vec());
            calls.len() - 1
        };
        if self.should_fail(messages) {
            return Err(ProviderError::api(500, "scripted failure"));
        }
        Ok(CompletionResponse {
            content: (self.responder)(index, messages),
            model: "scripted".to_string(),
            input_tokens: self.input_tokens,
            output_tokens: self.output_tokens,
        })
    }
}

/// An image provider returning a fixed URL.
#[derive(Debug)]
pub struct StaticImageProvider {
    url: String,
    prompts: Mutex<Vec<String>>,
}

impl StaticImageProvider {
    /// Creates a provider always answering with `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received, in order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ImageProvider for StaticImageProvider {
    async fn generate(&self, prompt: &str) -> Result<ImageResponse, ProviderError> {
        self.prompts.lock().push(prompt.to_string());
        Ok(ImageResponse {
            url: self.url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_provider_records_calls() {
        let provider = ScriptedCompletionProvider::numbered().with_usage(3, 4);
        let first = provider
            .complete(&[ChatMessage::system("s"), ChatMessage::user("u1")])
            .await
            .unwrap();
        provider.complete(&[ChatMessage::user("u2")]).await.unwrap();

        assert_eq!(first.content, "response 0");
        assert_eq!(first.input_tokens, 3);
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.user_prompts(), vec!["u1", "u2"]);
    }

    #[tokio::test]
    async fn test_scripted_provider_fails_on_nth_match() {
        let provider = ScriptedCompletionProvider::numbered()
            .fail_on(2, |messages| messages.iter().any(|m| m.content == "target"));

        assert!(provider.complete(&[ChatMessage::user("target")]).await.is_ok());
        assert!(provider.complete(&[ChatMessage::user("other")]).await.is_ok());
        assert!(provider.complete(&[ChatMessage::user("target")]).await.is_err());
        assert!(provider.complete(&[ChatMessage::user("target")]).await.is_ok());
    }

    #[tokio::test]
    async fn test_static_image_provider() {
        let provider = StaticImageProvider::new("https://img.test/x.png");
        let image = provider.generate("a prompt").await.unwrap();
        assert_eq!(image.url, "https://img.test/x.png");
        assert_eq!(provider.prompts(), vec!["a prompt"]);
    }
}
