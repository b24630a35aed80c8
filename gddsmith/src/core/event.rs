//! Progress events streamed to the client.
//!
//! On the wire every event is one JSON object followed by `\n`:
//!
//! ```text
//! {"type":"progress","step":"discussion","output":"Round 1: ..."}
//! {"type":"result","folderPath":"...","finalGdd":"<h1>...","tokenUsage":"...", ...}
//! ```

use super::TokenUsage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One record on the progress channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// An intermediate unit of work finished.
    Progress {
        /// Step name, e.g. `"gdd-writing-qa"`.
        step: String,
        /// Text produced by the step.
        output: String,
    },
    /// The run finished; always the last event.
    Result(RunReport),
}

impl ProgressEvent {
    /// Creates a progress event.
    #[must_use]
    pub fn progress(step: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Progress {
            step: step.into(),
            output: output.into(),
        }
    }

    /// Whether this is the terminal event.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    /// The step name, if this is a progress event.
    #[must_use]
    pub fn step(&self) -> Option<&str> {
        match self {
            Self::Progress { step, .. } => Some(step),
            Self::Result(_) => None,
        }
    }

    /// Encodes the event as one newline-terminated JSON line.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// A QA reviewer verdict for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaVerdict {
    /// Key under which the verdict appears in the terminal event.
    pub key: String,
    /// Human label of the reviewed step.
    pub label: String,
    /// Free-text critique.
    pub verdict: String,
}

/// Payload of the terminal event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Run directory on the server.
    pub folder_path: String,
    /// Rendered final document.
    pub final_gdd: String,
    /// Human-readable token totals, same text as `token_usage.txt`.
    pub token_usage: String,
    /// Structured token totals.
    pub tokens: TokenUsage,
    /// Every stage verdict keyed by stage.
    pub qa_results: BTreeMap<String, String>,
}

impl RunReport {
    /// Builds the report from run results.
    #[must_use]
    pub fn new(
        folder_path: impl Into<String>,
        final_gdd: impl Into<String>,
        tokens: TokenUsage,
        verdicts: &[QaVerdict],
    ) -> Self {
        Self {
            folder_path: folder_path.into(),
            final_gdd: final_gdd.into(),
            token_usage: tokens.summary(),
            tokens,
            qa_results: verdicts
                .iter()
                .map(|v| (v.key.clone(), v.verdict.clone()))
                .collect(),
        }
    }
}
