//! On-disk run directory and artifact writer.

use crate::errors::GddError;
use crate::utils::run_dir_name;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Name of the token usage artifact written at the end of a run.
pub const TOKEN_USAGE_FILE: &str = "token_usage.txt";

/// Writes a run's artifacts into its own directory.
///
/// Artifacts are plain files written verbatim. Nothing is ever removed, so a
/// failed run leaves whatever it had written so far.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    run_id: Uuid,
    dir: PathBuf,
}

impl ArtifactStore {
    /// Creates `<root>/<run-id>-<slug>` for a fresh run.
    pub async fn create(root: impl AsRef<Path>, idea: &str) -> Result<Self, GddError> {
        let run_id = Uuid::new_v4();
        let dir = root.as_ref().join(run_dir_name(run_id, idea));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| GddError::io(&dir, e))?;
        tracing::debug!(run_id = %run_id, dir = %dir.display(), "Created run directory");
        Ok(Self { run_id, dir })
    }

    /// The run identifier prefixing the directory name.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// The run directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes one artifact, replacing any previous file of the same name.
    pub async fn write(&self, name: &str, content: &str) -> Result<PathBuf, GddError> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| GddError::io(&path, e))?;
        tracing::debug!(artifact = name, bytes = content.len(), "Wrote artifact");
        Ok(path)
    }
}

/// Expands a `{n}` placeholder in an artifact name pattern.
#[must_use]
pub fn numbered_artifact(pattern: &str, n: usize) -> String {
    pattern.replace("{n}", &n.to_string())
}
