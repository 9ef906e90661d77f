use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;
use serde::Deserialize;

use heroicons_gen::filter::{ArchiveEntry, OPTIMIZED_SUBTREE, archive_root, filter_under_prefix};
use heroicons_gen::sync::{ReleaseInfo, ReleaseProvider, SyncError};

/// Upstream repository whose releases are synced.
const UPSTREAM_OWNER: &str = "tailwindlabs";
const UPSTREAM_REPO: &str = "heroicons";

/// Per-request timeout. Failures are fail-fast; there are no retries.
const NETWORK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
    tarball_url: String,
}

/// Fetches release metadata and tarballs from the GitHub REST API.
///
/// An unauthenticated client works but is rate-limited; pass a token for
/// scheduled runs. `api_base_url` overrides `https://api.github.com` so
/// tests can point at a local mock server.
pub struct GitHubReleaseProvider {
    client: reqwest::Client,
    token: Option<String>,
    api_base_url: Option<String>,
}

impl GitHubReleaseProvider {
    pub fn new(token: Option<String>, api_base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            api_base_url,
        }
    }

    fn api_base(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or("https://api.github.com")
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .get(url)
            .timeout(NETWORK_TIMEOUT)
            .header("User-Agent", "heroicons-gen");

        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        req
    }
}

#[async_trait::async_trait]
impl ReleaseProvider for GitHubReleaseProvider {
    async fn latest_release(&self) -> Result<ReleaseInfo, SyncError> {
        let url = format!(
            "{}/repos/{UPSTREAM_OWNER}/{UPSTREAM_REPO}/releases/latest",
            self.api_base(),
        );

        let response = self
            .build_request(&url)
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("release metadata fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SyncError::Network(format!(
                "release metadata returned HTTP {}",
                response.status()
            )));
        }

        let release: LatestRelease = response
            .json()
            .await
            .map_err(|e| SyncError::Parse(format!("malformed release metadata: {e}")))?;

        Ok(ReleaseInfo {
            tag: release.tag_name,
            archive_url: release.tarball_url,
        })
    }

    async fn download_and_extract(
        &self,
        archive_url: &str,
        scratch_dir: &Path,
    ) -> Result<PathBuf, SyncError> {
        let response = self
            .build_request(archive_url)
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("tarball download failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SyncError::Network(format!(
                "tarball download returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SyncError::Network(format!("failed to read tarball body: {e}")))?;

        extract_optimized(&bytes, scratch_dir)
    }
}

/// Unpack the optimized subtree of an in-memory tarball into `scratch_dir`,
/// preserving relative subpaths. Returns the extracted optimized directory.
///
/// The bytes are walked twice: once to list entry paths for root detection
/// and filtering, once to unpack the selected entries.
fn extract_optimized(tarball: &[u8], scratch_dir: &Path) -> Result<PathBuf, SyncError> {
    let entries = list_entries(tarball)?;

    let root = archive_root(entries.iter().map(|e| e.path.as_str())).ok_or_else(|| {
        SyncError::Archive("release tarball has no common root directory".to_owned())
    })?;

    let wanted: HashSet<String> = filter_under_prefix(entries, &root, OPTIMIZED_SUBTREE)
        .filter(|entry| !entry.is_directory)
        .map(|entry| entry.path)
        .collect();

    if wanted.is_empty() {
        return Err(SyncError::Archive(format!(
            "no {root}/{OPTIMIZED_SUBTREE} entries in release tarball"
        )));
    }

    let mut archive = tar::Archive::new(GzDecoder::new(tarball));
    let tar_entries = archive
        .entries()
        .map_err(|e| SyncError::Archive(format!("failed to read tar entries: {e}")))?;

    for entry_result in tar_entries {
        let mut entry = entry_result
            .map_err(|e| SyncError::Archive(format!("failed to read tar entry: {e}")))?;

        if entry.header().entry_type() != tar::EntryType::Regular {
            continue;
        }

        let entry_path = entry
            .path()
            .map_err(|e| SyncError::Archive(format!("invalid path in tar: {e}")))?
            .to_string_lossy()
            .to_string();

        if !wanted.contains(&entry_path) {
            continue;
        }

        // We unpack to disk, so nothing may escape the scratch directory.
        if Path::new(&entry_path)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(SyncError::Archive(format!(
                "unsafe path in tarball: {entry_path}"
            )));
        }

        let destination = scratch_dir.join(&entry_path);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| SyncError::io("creating", parent, e))?;
        }
        entry
            .unpack(&destination)
            .map_err(|e| SyncError::Archive(format!("failed to extract {entry_path}: {e}")))?;
    }

    let optimized_dir = scratch_dir.join(&root).join(OPTIMIZED_SUBTREE);
    if !optimized_dir.is_dir() {
        return Err(SyncError::Archive(format!(
            "could not find {OPTIMIZED_SUBTREE}/ directory in extracted tarball"
        )));
    }

    Ok(optimized_dir)
}

fn list_entries(tarball: &[u8]) -> Result<Vec<ArchiveEntry>, SyncError> {
    let mut archive = tar::Archive::new(GzDecoder::new(tarball));
    let tar_entries = archive
        .entries()
        .map_err(|e| SyncError::Archive(format!("failed to read tar entries: {e}")))?;

    let mut entries = Vec::new();
    for entry_result in tar_entries {
        let entry = entry_result
            .map_err(|e| SyncError::Archive(format!("failed to read tar entry: {e}")))?;

        let path = entry
            .path()
            .map_err(|e| SyncError::Archive(format!("invalid path in tar: {e}")))?
            .to_string_lossy()
            .to_string();

        entries.push(ArchiveEntry {
            // Directory entries are stored with a trailing slash.
            path: path.trim_end_matches('/').to_owned(),
            is_directory: entry.header().entry_type() == tar::EntryType::Directory,
        });
    }

    Ok(entries)
}
