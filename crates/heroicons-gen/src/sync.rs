use std::path::{Path, PathBuf};

/// Metadata for the latest published icon-set release.
/// Fetched once per run and discarded after the archive download starts.
#[derive(Debug, Clone)]
pub struct ReleaseInfo {
    /// Release tag, e.g. `v2.2.0`.
    pub tag: String,
    /// URL of the release tarball.
    pub archive_url: String,
}

/// Errors that can occur during a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("malformed asset: {0}")]
    MalformedAsset(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl SyncError {
    /// Wrap an I/O failure with the operation and path it occurred on.
    pub fn io(context: &str, path: &Path, err: std::io::Error) -> Self {
        Self::Io(format!("{context} {}: {err}", path.display()))
    }
}

/// Provides release metadata and archive contents for a sync run.
///
/// This is the injected network boundary: the orchestrator never talks to
/// GitHub directly, so tests can substitute a provider that writes a
/// fixture tree.
#[async_trait::async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Fetch metadata for the latest published release.
    async fn latest_release(&self) -> Result<ReleaseInfo, SyncError>;

    /// Download the release archive and extract its optimized subtree into
    /// `scratch_dir`, preserving relative subpaths. Returns the path of the
    /// extracted optimized directory.
    async fn download_and_extract(
        &self,
        archive_url: &str,
        scratch_dir: &Path,
    ) -> Result<PathBuf, SyncError>;
}
