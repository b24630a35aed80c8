//! Model call wrappers used by the pipeline.
//!
//! Every call takes the run's [`TokenUsage`](crate::core::TokenUsage) by
//! `&mut` and charges its cost there.

mod completion;
mod image;
mod qa;

pub use completion::CompletionClient;
pub use image::{estimate_prompt_tokens, ImageClient};
pub use qa::{qa_prompt, QaReviewer};
