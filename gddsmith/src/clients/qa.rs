//! Fixed-template QA critique.

use super::CompletionClient;
use crate::core::TokenUsage;
use crate::errors::GddError;
use crate::pipeline::Persona;
use crate::providers::ChatMessage;
use tracing::info;

const QA_SYSTEM_PROMPT: &str = "You are a meticulous QA agent for game design documents.";

/// Builds the critique request for one step.
#[must_use]
pub fn qa_prompt(step: &str, output: &str, original_idea: &str) -> String {
    format!(
        "As a {reviewer}, review the output of the \"{step}\" step:\n\
         \n\
         Original Input: {original_idea}\n\
         Step Output: {output}\n\
         \n\
         Ensure that the output aligns with the original input and meets the following criteria:\n\
         1. Relevance to the original game idea\n\
         2. Completeness of the step's objectives\n\
         3. Consistency with previous steps (if applicable)\n\
         4. Clarity and coherence of the content\n\
         \n\
         If any issues are found, provide specific feedback. If no issues are found, confirm that the step output is satisfactory.",
        reviewer = Persona::QaAgent,
    )
}

/// Asks a reviewer persona to compare a step's output against the original idea.
#[derive(Debug, Clone)]
pub struct QaReviewer {
    completion: CompletionClient,
}

impl QaReviewer {
    /// Creates a reviewer on top of a completion client.
    #[must_use]
    pub fn new(completion: CompletionClient) -> Self {
        Self { completion }
    }

    /// Returns the reviewer's free-text verdict.
    pub async fn review(
        &self,
        step: &str,
        output: &str,
        original_idea: &str,
        usage: &mut TokenUsage,
    ) -> Result<String, GddError> {
        info!(step = %step, "QA Phase for {} - Start", step);
        let messages = [
            ChatMessage::system(QA_SYSTEM_PROMPT),
            ChatMessage::user(qa_prompt(step, output, original_idea)),
        ];
        let verdict = self.completion.complete(&messages, usage).await?;
        info!(step = %step, "QA Phase for {} - End", step);
        Ok(verdict)
    }
}
