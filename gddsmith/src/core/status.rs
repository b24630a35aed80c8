//! Stage kind enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// The submitted idea, taken verbatim.
    BaseIdea,
    /// Persona discussion rounds narrowing the idea.
    Discussion,
    /// Iterative design document writing.
    GddWriting,
    /// Image prompt and generated concept art.
    ConceptArt,
    /// Assembled and rendered final document.
    Finalization,
}

impl StageKind {
    /// All stages in execution order.
    pub const ALL: [Self; 5] = [
        Self::BaseIdea,
        Self::Discussion,
        Self::GddWriting,
        Self::ConceptArt,
        Self::Finalization,
    ];

    /// One-based position in the pipeline.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::BaseIdea => 1,
            Self::Discussion => 2,
            Self::GddWriting => 3,
            Self::ConceptArt => 4,
            Self::Finalization => 5,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseIdea => write!(f, "base_idea"),
            Self::Discussion => write!(f, "discussion"),
            Self::GddWriting => write!(f, "gdd_writing"),
            Self::ConceptArt => write!(f, "concept_art"),
            Self::Finalization => write!(f, "finalization"),
        }
    }
}
