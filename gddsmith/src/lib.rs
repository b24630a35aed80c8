//! # gddsmith
//!
//! Turns a one-line game idea into a game design document by running a fixed
//! sequence of model calls.
//!
//! A run goes through five stages:
//!
//! - **Base Idea**: the submitted text, taken as is
//! - **Discussion**: five rounds of persona discussion narrowing the idea
//! - **GDD Writing**: five drafts of the design document
//! - **Concept Art**: an image prompt and a generated image
//! - **Final GDD**: the last draft plus the art, as Markdown and HTML
//!
//! Each stage is followed by a QA pass judging its output against the original
//! idea. Every step is streamed as a progress event and written to the run's
//! directory.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gddsmith::prelude::*;
//! use std::sync::Arc;
//!
//! let provider = Arc::new(OpenAiProvider::new(ProviderConfig::new(api_key)));
//! let orchestrator = Orchestrator::new(provider.clone(), provider, "output");
//!
//! let (sink, mut rx) = ChannelProgressSink::channel(32);
//! tokio::spawn(async move {
//!     while let Some(event) = rx.recv().await {
//!         println!("{:?}", event.step());
//!     }
//! });
//! let outcome = orchestrator.run("a puzzle game about gravity", &sink).await?;
//! println!("{}", outcome.dir.display());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod clients;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod providers;
pub mod render;
pub mod server;
pub mod utils;

#[cfg(test)]
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clients::{CompletionClient, ImageClient, QaReviewer};
    pub use crate::config::{AppConfig, LogFormat, ProviderConfig};
    pub use crate::core::{ProgressEvent, QaVerdict, RunReport, StageKind, TokenUsage};
    pub use crate::errors::{ConfigError, GddError, ProviderError};
    pub use crate::events::{ChannelProgressSink, CollectingProgressSink, ProgressSink};
    pub use crate::pipeline::{standard_stages, Orchestrator, RunOutcome, StageSpec};
    pub use crate::providers::{
        ChatMessage, CompletionProvider, ImageProvider, OpenAiProvider, Role,
    };
    pub use crate::render::{CommonMarkRenderer, MarkupRenderer};
    pub use crate::server::{router, AppState};
}
