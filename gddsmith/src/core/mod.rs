//! Core domain model types for gddsmith.
//!
//! This module contains the fundamental types shared by the pipeline and the server:
//! - Stage kind enum
//! - Per-run token accounting
//! - Progress events and the terminal run report
//! - The run directory and artifact writer

mod artifact;
mod event;
mod status;
mod usage;

pub use artifact::{numbered_artifact, ArtifactStore, TOKEN_USAGE_FILE};
pub use event::{ProgressEvent, QaVerdict, RunReport};
pub use status::StageKind;
pub use usage::TokenUsage;
