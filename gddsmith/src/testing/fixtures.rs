//! Test fixtures for full runs.

use std::path::Path;
use std::sync::Arc;

use super::mocks::{ScriptedCompletionProvider, StaticImageProvider};
use crate::pipeline::Orchestrator;

/// Every file a successful run writes, sorted by name.
pub const STANDARD_LAYOUT: [&str; 21] = [
    "1_base_idea.txt",
    "1_base_idea_qa.txt",
    "2_discussion_1.txt",
    "2_discussion_2.txt",
    "2_discussion_3.txt",
    "2_discussion_4.txt",
    "2_discussion_5.txt",
    "2_discussion_qa.txt",
    "3_gdd_iteration_1.md",
    "3_gdd_iteration_2.md",
    "3_gdd_iteration_3.md",
    "3_gdd_iteration_4.md",
    "3_gdd_iteration_5.md",
    "3_gdd_qa.txt",
    "4_concept_art_prompt.txt",
    "4_concept_art_qa.txt",
    "4_concept_art_url.txt",
    "5_final_gdd.html",
    "5_final_gdd.md",
    "5_final_gdd_qa.txt",
    "token_usage.txt",
];

/// An orchestrator wired to scripted providers, writing under a temp dir.
pub struct TestFixture {
    /// Keeps the output root alive.
    pub root: tempfile::TempDir,
    /// Text provider.
    pub completion: Arc<ScriptedCompletionProvider>,
    /// Image provider.
    pub image: Arc<StaticImageProvider>,
    /// The orchestrator under test.
    pub orchestrator: Orchestrator,
}

impl TestFixture {
    /// Builds a fixture around the given providers.
    #[must_use]
    pub fn new(completion: ScriptedCompletionProvider, image: StaticImageProvider) -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let completion = Arc::new(completion);
        let image = Arc::new(image);
        let orchestrator = Orchestrator::new(completion.clone(), image.clone(), root.path());
        Self {
            root,
            completion,
            image,
            orchestrator,
        }
    }

    /// A fixture answering `"response <index>"` with a fixed art URL.
    #[must_use]
    pub fn numbered() -> Self {
        Self::new(
            ScriptedCompletionProvider::numbered(),
            StaticImageProvider::new("https://img.test/art.png"),
        )
    }

    /// Run directories created under the root.
    #[must_use]
    pub fn run_dirs(&self) -> Vec<std::path::PathBuf> {
        let mut dirs: Vec<_> = std::fs::read_dir(self.root.path())
            .expect("read output root")
            .map(|entry| entry.expect("dir entry").path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();
        dirs
    }
}

/// File names in `dir`, sorted.
#[must_use]
pub fn run_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read run dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
