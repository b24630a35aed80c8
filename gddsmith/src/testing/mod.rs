//! Testing utilities.
//!
//! This module provides:
//! - Scripted text and image providers
//! - A fixture wiring them into an orchestrator over a temp directory

mod fixtures;
mod mocks;

pub use fixtures::{run_files, TestFixture, STANDARD_LAYOUT};
pub use mocks::{ScriptedCompletionProvider, StaticImageProvider};
