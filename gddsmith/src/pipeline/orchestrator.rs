//! Drives one run through the stage table.

use super::seed::{last_line, SeedPolicy};
use super::spec::{standard_stages, StageSpec};
use super::templates::StageTemplate;
use crate::clients::{CompletionClient, ImageClient, QaReviewer};
use crate::core::{
    numbered_artifact, ArtifactStore, ProgressEvent, QaVerdict, RunReport, StageKind,
    TokenUsage, TOKEN_USAGE_FILE,
};
use crate::errors::GddError;
use crate::events::ProgressSink;
use crate::observability::SpanTimer;
use crate::providers::{CompletionProvider, ImageProvider};
use crate::render::{CommonMarkRenderer, MarkupRenderer};
use crate::utils::preview;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Characters of each GDD iteration echoed in its progress event.
const ITERATION_PREVIEW_CHARS: usize = 200;

/// Assembles the final markup document.
#[must_use]
pub fn final_document(gdd: &str, art_url: &str) -> String {
    format!("# Game Design Document\n\n{gdd}\n\n## Concept Art\n\n![Concept Art]({art_url})")
}

/// What a successful run leaves behind.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Run identifier.
    pub run_id: Uuid,
    /// Run directory.
    pub dir: PathBuf,
    /// The payload sent as the terminal event.
    pub report: RunReport,
}

/// Mutable state threaded through the stages of one run.
#[derive(Debug)]
struct RunState {
    original: String,
    idea: String,
    gdd: String,
    art_url: String,
    final_html: String,
    usage: TokenUsage,
    verdicts: Vec<QaVerdict>,
}

impl RunState {
    fn new(idea: &str) -> Self {
        Self {
            original: idea.to_string(),
            idea: idea.to_string(),
            gdd: String::new(),
            art_url: String::new(),
            final_html: String::new(),
            usage: TokenUsage::new(),
            verdicts: Vec::new(),
        }
    }
}

/// Runs the stage table for submitted ideas.
///
/// Runs share nothing but the providers: each gets its own directory, token
/// accumulator and verdict list, so several may be in flight at once.
pub struct Orchestrator {
    completion: CompletionClient,
    image: ImageClient,
    reviewer: QaReviewer,
    renderer: Arc<dyn MarkupRenderer>,
    output_root: PathBuf,
    stages: Vec<StageSpec>,
    seed_policy: SeedPolicy,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("output_root", &self.output_root)
            .field("stages", &self.stages.len())
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an orchestrator running the standard stages.
    #[must_use]
    pub fn new(
        completion: Arc<dyn CompletionProvider>,
        image: Arc<dyn ImageProvider>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        let completion = CompletionClient::new(completion);
        Self {
            reviewer: QaReviewer::new(completion.clone()),
            completion,
            image: ImageClient::new(image),
            renderer: Arc::new(CommonMarkRenderer),
            output_root: output_root.into(),
            stages: standard_stages(),
            seed_policy: last_line,
        }
    }

    /// Replaces the markup renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn MarkupRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replaces how a discussion round seeds the next one.
    #[must_use]
    pub fn with_seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }

    /// Replaces the stage table after validating every entry.
    pub fn with_stages(mut self, stages: Vec<StageSpec>) -> Result<Self, GddError> {
        for stage in &stages {
            stage.validate()?;
        }
        self.stages = stages;
        Ok(self)
    }

    /// The stage table.
    #[must_use]
    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Root under which run directories are created.
    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Executes every stage for `idea`, reporting to `sink`.
    ///
    /// The terminal event is emitted only when all stages succeed. On error,
    /// artifacts written so far stay on disk and the sink sees no terminal
    /// event.
    pub async fn run(&self, idea: &str, sink: &dyn ProgressSink) -> Result<RunOutcome, GddError> {
        let store = ArtifactStore::create(&self.output_root, idea).await?;
        let span = info_span!("run", run_id = %store.run_id());

        async move {
            info!(dir = %store.dir().display(), "Starting GDD generation process");
            let mut state = RunState::new(idea);

            for stage in &self.stages {
                self.run_stage(stage, &store, &mut state, sink).await?;
            }

            let summary = state.usage.summary();
            info!(
                input_tokens = state.usage.input,
                output_tokens = state.usage.output,
                "Token usage"
            );
            store.write(TOKEN_USAGE_FILE, &summary).await?;

            let report = RunReport::new(
                store.dir().display().to_string(),
                std::mem::take(&mut state.final_html),
                state.usage,
                &state.verdicts,
            );
            sink.emit(ProgressEvent::Result(report.clone())).await;
            info!("GDD generation process completed");

            Ok(RunOutcome {
                run_id: store.run_id(),
                dir: store.dir().to_path_buf(),
                report,
            })
        }
        .instrument(span)
        .await
    }

    async fn run_stage(
        &self,
        stage: &StageSpec,
        store: &ArtifactStore,
        state: &mut RunState,
        sink: &dyn ProgressSink,
    ) -> Result<(), GddError> {
        let number = stage.kind.number();
        let timer = SpanTimer::start(stage.label);
        info!(stage = %stage.kind, "Step {}: {} - Start", number, stage.label);

        let subject = match stage.kind {
            StageKind::BaseIdea => self.base_idea(stage, store, state, sink).await?,
            StageKind::Discussion => self.discussion(stage, store, state, sink).await?,
            StageKind::GddWriting => self.gdd_writing(stage, store, state, sink).await?,
            StageKind::ConceptArt => self.concept_art(stage, store, state, sink).await?,
            StageKind::Finalization => self.finalization(stage, store, state, sink).await?,
        };

        if let Some(qa) = stage.qa {
            let verdict = self
                .reviewer
                .review(stage.label, &subject, &state.original, &mut state.usage)
                .await?;
            sink.emit(ProgressEvent::progress(qa.step, verdict.as_str()))
                .await;
            store.write(qa.file, &verdict).await?;
            state.verdicts.push(QaVerdict {
                key: qa.key.to_string(),
                label: stage.label.to_string(),
                verdict,
            });
        }

        info!(
            stage = %stage.kind,
            duration_ms = timer.finish(),
            "Step {}: {} - End", number, stage.label
        );
        Ok(())
    }

    /// Sends one templated completion built from the current idea.
    async fn templated_call(
        &self,
        stage: &StageSpec,
        idea: &str,
        usage: &mut TokenUsage,
    ) -> Result<String, GddError> {
        let template: &StageTemplate = stage
            .template
            .ok_or_else(|| GddError::invalid_stage(stage.label, "missing prompt template"))?;
        self.completion.complete(&template.messages(idea), usage).await
    }

    async fn base_idea(
        &self,
        stage: &StageSpec,
        store: &ArtifactStore,
        state: &mut RunState,
        sink: &dyn ProgressSink,
    ) -> Result<String, GddError> {
        sink.emit(ProgressEvent::progress(stage.step, state.original.as_str()))
            .await;
        store.write(stage.artifacts[0], &state.original).await?;
        Ok(state.original.clone())
    }

    /// Each round's seed is derived from the previous round's output. The QA
    /// subject is the last round's full output.
    async fn discussion(
        &self,
        stage: &StageSpec,
        store: &ArtifactStore,
        state: &mut RunState,
        sink: &dyn ProgressSink,
    ) -> Result<String, GddError> {
        sink.emit(ProgressEvent::progress(stage.step, "Starting discussion..."))
            .await;

        let mut last_round = String::new();
        for round in 1..=stage.repetitions {
            info!(round, "Discussion Round {} - Start", round);
            let output = self
                .templated_call(stage, &state.idea, &mut state.usage)
                .await?;
            sink.emit(ProgressEvent::progress(
                stage.step,
                format!("Round {round}: {output}"),
            ))
            .await;
            store
                .write(&numbered_artifact(stage.artifacts[0], round), &output)
                .await?;
            state.idea = (self.seed_policy)(&output);
            last_round = output;
            info!(round, "Discussion Round {} - End", round);
        }
        Ok(last_round)
    }

    /// Every iteration writes from the same narrowed idea; only the last
    /// iteration's document is kept.
    async fn gdd_writing(
        &self,
        stage: &StageSpec,
        store: &ArtifactStore,
        state: &mut RunState,
        sink: &dyn ProgressSink,
    ) -> Result<String, GddError> {
        sink.emit(ProgressEvent::progress(stage.step, "Starting GDD writing..."))
            .await;

        for iteration in 1..=stage.repetitions {
            info!(iteration, "GDD Writing Iteration {} - Start", iteration);
            let gdd = self
                .templated_call(stage, &state.idea, &mut state.usage)
                .await?;
            sink.emit(ProgressEvent::progress(
                stage.step,
                format!(
                    "Iteration {iteration}: {}...",
                    preview(&gdd, ITERATION_PREVIEW_CHARS)
                ),
            ))
            .await;
            store
                .write(&numbered_artifact(stage.artifacts[0], iteration), &gdd)
                .await?;
            state.gdd = gdd;
            info!(iteration, "GDD Writing Iteration {} - End", iteration);
        }
        Ok(state.gdd.clone())
    }

    /// The QA subject is the image prompt, not the image.
    async fn concept_art(
        &self,
        stage: &StageSpec,
        store: &ArtifactStore,
        state: &mut RunState,
        sink: &dyn ProgressSink,
    ) -> Result<String, GddError> {
        sink.emit(ProgressEvent::progress(stage.step, "Generating concept art..."))
            .await;

        let prompt = self
            .templated_call(stage, &state.idea, &mut state.usage)
            .await?;
        let url = self.image.generate(&prompt, &mut state.usage).await?;
        sink.emit(ProgressEvent::progress(
            stage.step,
            format!("Art prompt: {prompt}\nArt URL: {url}"),
        ))
        .await;
        store.write(stage.artifacts[0], &prompt).await?;
        store.write(stage.artifacts[1], &url).await?;
        state.art_url = url;
        Ok(prompt)
    }

    async fn finalization(
        &self,
        stage: &StageSpec,
        store: &ArtifactStore,
        state: &mut RunState,
        sink: &dyn ProgressSink,
    ) -> Result<String, GddError> {
        sink.emit(ProgressEvent::progress(stage.step, "Finalizing GDD..."))
            .await;

        let document = final_document(&state.gdd, &state.art_url);
        store.write(stage.artifacts[0], &document).await?;
        let html = self.renderer.render(&document);
        store.write(stage.artifacts[1], &html).await?;
        state.final_html = html;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_document_shape() {
        assert_eq!(
            final_document("## Overview\nJump.", "https://img.test/a.png"),
            "# Game Design Document\n\n## Overview\nJump.\n\n## Concept Art\n\n![Concept Art](https://img.test/a.png)"
        );
    }
}
