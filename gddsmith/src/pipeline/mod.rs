//! The GDD generation pipeline.
//!
//! This module provides:
//! - The stage table and its validation
//! - Persona prompt templates
//! - The discussion seed policy
//! - The orchestrator driving a run

mod orchestrator;
mod seed;
mod spec;
mod templates;

pub use orchestrator::{final_document, Orchestrator, RunOutcome};
pub use seed::{last_line, SeedPolicy};
pub use spec::{standard_stages, QaSpec, StageSpec, DISCUSSION_ROUNDS, GDD_ITERATIONS};
pub use templates::{Persona, StageTemplate, CONCEPT_ART, DISCUSSION, GDD_WRITING};
