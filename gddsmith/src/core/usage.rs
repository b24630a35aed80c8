//! Per-run token accounting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input/output token totals for one run.
///
/// Every model call receives the run's accumulator by `&mut`, so two runs in
/// flight never see each other's counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt-side tokens.
    pub input: u64,
    /// Completion-side tokens.
    pub output: u64,
}

impl TokenUsage {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the counts reported for one call.
    pub fn record(&mut self, input: u64, output: u64) {
        self.input += input;
        self.output += output;
    }

    /// Adds input tokens only.
    pub fn record_input(&mut self, input: u64) {
        self.input += input;
    }

    /// Sum of both sides.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.input + self.output
    }

    /// The `token_usage.txt` body, also sent in the terminal event.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TokenUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Input Tokens: {}\nTotal Output Tokens: {}",
            self.input, self.output
        )
    }
}

impl std::ops::AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.record(rhs.input, rhs.output);
    }
}
