use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{IconCategory, NAME_CLASS_SOURCE_LABEL};
use crate::feedback::Feedback;
use crate::naming;
use crate::readme;
use crate::registry::{self, ComponentSet};
use crate::render;
use crate::sync::{ReleaseProvider, SyncError};

/// Scratch directory for the downloaded release, relative to the root.
/// Exclusive to one run; concurrent runs are unsupported.
const SCRATCH_DIR: &str = "tmp";

/// Outcome of a completed sync run.
#[derive(Debug)]
pub struct SyncReport {
    /// The release tag that was synced.
    pub tag: String,
    /// Total component files written across all sets.
    pub components: usize,
    /// Progress messages and warnings, in the order they occurred.
    pub feedback: Vec<Feedback>,
}

/// Drives one full sync: fetch release metadata, download and extract the
/// optimized SVGs, regenerate every icon set's components, regenerate the
/// name class and component registry, and stamp the release tag into the
/// README badge and version sidecar.
pub struct IconSetUpdater {
    root: PathBuf,
    categories: Vec<IconCategory>,
}

/// Owns the scratch directory for the duration of a run and removes it on
/// every exit path, success or failure.
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn create(path: PathBuf) -> Result<Self, SyncError> {
        fs::create_dir_all(&path).map_err(|e| SyncError::io("creating", &path, e))?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

impl IconSetUpdater {
    pub fn new(root: impl Into<PathBuf>, categories: Vec<IconCategory>) -> Self {
        Self {
            root: root.into(),
            categories,
        }
    }

    /// Run one sync pass against `provider`.
    ///
    /// Nothing under the root is modified until the release metadata has
    /// been fetched and the archive extracted, so early failures are
    /// no-ops. A failure while regenerating leaves sets finished before it
    /// in their new state and later sets in their prior state; the version
    /// stamp only advances after every set has regenerated.
    pub async fn run(&self, provider: &dyn ReleaseProvider) -> Result<SyncReport, SyncError> {
        let mut feedback = Vec::new();

        let scratch_path = self.root.join(SCRATCH_DIR);
        if scratch_path.exists() {
            feedback.push(Feedback::info("removing scratch files from a previous run"));
            fs::remove_dir_all(&scratch_path)
                .map_err(|e| SyncError::io("removing", &scratch_path, e))?;
        }

        let release = provider.latest_release().await?;
        feedback.push(Feedback::info(format!("downloading {}", release.tag)));

        let scratch = ScratchDir::create(scratch_path)?;
        let optimized_dir = provider
            .download_and_extract(&release.archive_url, scratch.path())
            .await?;

        let mut sets = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            let component_names = self.regenerate_category(category, &optimized_dir)?;
            feedback.push(Feedback::info(format!(
                "created {} {} components",
                component_names.len(),
                category.label
            )));
            sets.push(ComponentSet {
                label: category.label.clone(),
                component_names,
            });
        }

        self.update_registries(&optimized_dir, &sets, &mut feedback)?;
        feedback.extend(readme::stamp_version(&self.root, &release.tag)?);

        Ok(SyncReport {
            tag: release.tag,
            components: sets.iter().map(|s| s.component_names.len()).sum(),
            feedback,
        })
    }

    /// Wipe and regenerate one set's output directory. Returns the
    /// component type names written, in file order.
    fn regenerate_category(
        &self,
        category: &IconCategory,
        optimized_dir: &Path,
    ) -> Result<Vec<String>, SyncError> {
        let output_dir = self.root.join(&category.output_dir);
        if output_dir.exists() {
            fs::remove_dir_all(&output_dir)
                .map_err(|e| SyncError::io("removing", &output_dir, e))?;
        }
        fs::create_dir_all(&output_dir).map_err(|e| SyncError::io("creating", &output_dir, e))?;

        let files = svg_files(optimized_dir, &category.source_glob)?;
        let mut component_names = Vec::with_capacity(files.len());

        for file in &files {
            let raw = fs::read_to_string(file).map_err(|e| SyncError::io("reading", file, e))?;
            let rendered = render::render(&raw).map_err(|e| match e {
                SyncError::MalformedAsset(msg) => SyncError::MalformedAsset(format!(
                    "{} ({} set): {msg}",
                    file.display(),
                    category.label
                )),
                other => other,
            })?;

            let stem = file
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| SyncError::Io(format!("non-UTF-8 file name: {}", file.display())))?;
            let component_name = format!("{}Icon", naming::to_component_name(stem));

            let component_path = output_dir.join(format!("{component_name}.razor"));
            fs::write(&component_path, rendered)
                .map_err(|e| SyncError::io("writing", &component_path, e))?;
            component_names.push(component_name);
        }

        Ok(component_names)
    }

    fn update_registries(
        &self,
        optimized_dir: &Path,
        sets: &[ComponentSet],
        feedback: &mut Vec<Feedback>,
    ) -> Result<(), SyncError> {
        match self
            .categories
            .iter()
            .find(|c| c.label == NAME_CLASS_SOURCE_LABEL)
        {
            Some(source) => {
                let files = svg_files(optimized_dir, &source.source_glob)?;
                registry::update_name_class(&self.root, &files)?;
                feedback.push(Feedback::info(format!(
                    "regenerated {} from the {} set",
                    registry::NAME_CLASS_FILE,
                    source.label
                )));
            }
            None => feedback.push(Feedback::warning(format!(
                "no {NAME_CLASS_SOURCE_LABEL} set configured; {} left as-is",
                registry::NAME_CLASS_FILE
            ))),
        }

        registry::update_component_registry(&self.root, sets)?;
        Ok(())
    }
}

/// Glob-match SVG files under `base`, sorted by full path so re-runs emit
/// byte-identical output regardless of directory iteration order.
fn svg_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>, SyncError> {
    let full_pattern = base.join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let matches = glob::glob(&full_pattern)
        .map_err(|e| SyncError::Io(format!("invalid glob pattern {full_pattern}: {e}")))?;

    let mut files: Vec<PathBuf> = matches
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}
