//! The stage table.
//!
//! A run is the ordered list of [`StageSpec`] records returned by
//! [`standard_stages`]. The orchestrator walks the list; each record says how
//! often the stage repeats, where its artifacts go, which template feeds it
//! and how its QA pass is reported.

use super::templates::{StageTemplate, CONCEPT_ART, DISCUSSION, GDD_WRITING};
use crate::core::StageKind;
use crate::errors::GddError;

/// How a stage's QA pass is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaSpec {
    /// Progress step name of the verdict event.
    pub step: &'static str,
    /// Artifact holding the verdict.
    pub file: &'static str,
    /// Key of the verdict in the terminal event.
    pub key: &'static str,
}

/// Specification for a single stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    /// Which stage this is.
    pub kind: StageKind,
    /// Human label used in logs and QA prompts.
    pub label: &'static str,
    /// Progress step name of the stage's content events.
    pub step: &'static str,
    /// How many times the stage's call is issued.
    pub repetitions: usize,
    /// Artifact names. Repeated stages use a `{n}` placeholder.
    pub artifacts: &'static [&'static str],
    /// QA reporting, if the stage is reviewed.
    pub qa: Option<QaSpec>,
    /// Prompt template for templated stages.
    pub template: Option<&'static StageTemplate>,
}

impl StageSpec {
    /// Number of artifact names the stage kind writes per repetition.
    #[must_use]
    pub const fn required_artifacts(kind: StageKind) -> usize {
        match kind {
            StageKind::BaseIdea | StageKind::Discussion | StageKind::GddWriting => 1,
            StageKind::ConceptArt | StageKind::Finalization => 2,
        }
    }

    /// Checks that the record can drive its stage.
    pub fn validate(&self) -> Result<(), GddError> {
        if self.repetitions == 0 {
            return Err(GddError::invalid_stage(self.label, "repetitions must be at least 1"));
        }
        let required = Self::required_artifacts(self.kind);
        if self.artifacts.len() != required {
            return Err(GddError::invalid_stage(
                self.label,
                format!("expected {required} artifact name(s), got {}", self.artifacts.len()),
            ));
        }
        if self.repetitions > 1 && !self.artifacts.iter().all(|a| a.contains("{n}")) {
            return Err(GddError::invalid_stage(
                self.label,
                "repeated stages need a {n} placeholder in every artifact name",
            ));
        }
        let needs_template = !matches!(self.kind, StageKind::BaseIdea | StageKind::Finalization);
        if needs_template && self.template.is_none() {
            return Err(GddError::invalid_stage(self.label, "missing prompt template"));
        }
        Ok(())
    }
}

/// Rounds of persona discussion.
pub const DISCUSSION_ROUNDS: usize = 5;

/// Iterations of GDD writing.
pub const GDD_ITERATIONS: usize = 5;

/// The five stages every run executes, in order.
#[must_use]
pub fn standard_stages() -> Vec<StageSpec> {
    vec![
        StageSpec {
            kind: StageKind::BaseIdea,
            label: "Base Idea",
            step: "base-idea",
            repetitions: 1,
            artifacts: &["1_base_idea.txt"],
            qa: Some(QaSpec {
                step: "base-idea-qa",
                file: "1_base_idea_qa.txt",
                key: "baseIdeaQA",
            }),
            template: None,
        },
        StageSpec {
            kind: StageKind::Discussion,
            label: "Discussion",
            step: "discussion",
            repetitions: DISCUSSION_ROUNDS,
            artifacts: &["2_discussion_{n}.txt"],
            qa: Some(QaSpec {
                step: "discussion-qa",
                file: "2_discussion_qa.txt",
                key: "discussionQA",
            }),
            template: Some(&DISCUSSION),
        },
        StageSpec {
            kind: StageKind::GddWriting,
            label: "GDD Writing",
            step: "gdd-writing",
            repetitions: GDD_ITERATIONS,
            artifacts: &["3_gdd_iteration_{n}.md"],
            qa: Some(QaSpec {
                step: "gdd-writing-qa",
                file: "3_gdd_qa.txt",
                key: "gddQA",
            }),
            template: Some(&GDD_WRITING),
        },
        StageSpec {
            kind: StageKind::ConceptArt,
            label: "Concept Art",
            step: "concept-art",
            repetitions: 1,
            artifacts: &["4_concept_art_prompt.txt", "4_concept_art_url.txt"],
            qa: Some(QaSpec {
                step: "concept-art-qa",
                file: "4_concept_art_qa.txt",
                key: "artQA",
            }),
            template: Some(&CONCEPT_ART),
        },
        StageSpec {
            kind: StageKind::Finalization,
            label: "Final GDD",
            step: "final-gdd",
            repetitions: 1,
            artifacts: &["5_final_gdd.md", "5_final_gdd.html"],
            qa: Some(QaSpec {
                step: "final-gdd-qa",
                file: "5_final_gdd_qa.txt",
                key: "finalGddQA",
            }),
            template: None,
        },
    ]
}
