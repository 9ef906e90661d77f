use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use heroicons_gen::readme::{README_FILE, VERSION_FILE, badge_line};
use heroicons_gen::registry::NAME_CLASS_FILE;
use heroicons_gen::{
    COMPONENT_ROOT, IconSetUpdater, ReleaseInfo, ReleaseProvider, SyncError, default_categories,
};

const SVG_CONTENT: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 16 16\" fill=\"currentColor\" aria-hidden=\"true\"><path d=\"M1 2\"/></svg>";

const SET_DIRS: [&str; 4] = ["16/solid", "20/solid", "24/solid", "24/outline"];

/// Writes the fixture tree the real provider would extract: two icons in
/// each of the four set directories.
struct FakeReleaseProvider {
    tag: String,
}

impl FakeReleaseProvider {
    fn new(tag: &str) -> Self {
        Self { tag: tag.to_owned() }
    }
}

#[async_trait::async_trait]
impl ReleaseProvider for FakeReleaseProvider {
    async fn latest_release(&self) -> Result<ReleaseInfo, SyncError> {
        Ok(ReleaseInfo {
            tag: self.tag.clone(),
            archive_url: "https://fake/tarball.tar.gz".to_owned(),
        })
    }

    async fn download_and_extract(
        &self,
        _archive_url: &str,
        scratch_dir: &Path,
    ) -> Result<PathBuf, SyncError> {
        let optimized = scratch_dir.join("heroicons-abc123").join("optimized");
        for set_dir in SET_DIRS {
            let dir = optimized.join(set_dir);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("arrow-down.svg"), SVG_CONTENT).unwrap();
            fs::write(dir.join("hand-thumb-up.svg"), SVG_CONTENT).unwrap();
        }
        Ok(optimized)
    }
}

/// Fails before anything touches the filesystem.
struct UnreachableProvider;

#[async_trait::async_trait]
impl ReleaseProvider for UnreachableProvider {
    async fn latest_release(&self) -> Result<ReleaseInfo, SyncError> {
        Err(SyncError::Network("connection refused".to_owned()))
    }

    async fn download_and_extract(
        &self,
        _archive_url: &str,
        _scratch_dir: &Path,
    ) -> Result<PathBuf, SyncError> {
        unreachable!("metadata fetch already failed")
    }
}

/// Like the fake provider, but one set contains an SVG without the
/// accessibility marker.
struct MalformedAssetProvider {
    inner: FakeReleaseProvider,
}

#[async_trait::async_trait]
impl ReleaseProvider for MalformedAssetProvider {
    async fn latest_release(&self) -> Result<ReleaseInfo, SyncError> {
        self.inner.latest_release().await
    }

    async fn download_and_extract(
        &self,
        archive_url: &str,
        scratch_dir: &Path,
    ) -> Result<PathBuf, SyncError> {
        let optimized = self.inner.download_and_extract(archive_url, scratch_dir).await?;
        fs::write(
            optimized.join("24/outline/bad-asset.svg"),
            "<svg viewBox=\"0 0 24 24\"><path/></svg>",
        )
        .unwrap();
        Ok(optimized)
    }
}

fn test_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(root.join(COMPONENT_ROOT)).unwrap();
    fs::write(
        root.join(README_FILE),
        format!("# Blazor Heroicons\n{}\nSome other content\n", badge_line("v1.0.0")),
    )
    .unwrap();
    root
}

/// Relative path -> file bytes for everything under `root`, skipping the
/// `.bak` recovery copies (created only once a previous generation exists).
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    collect_files(root, root, &mut files);
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
    if !dir.exists() {
        return;
    }
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap().to_string_lossy().to_string();
            if relative.ends_with(".bak") {
                continue;
            }
            files.insert(relative, fs::read(&path).unwrap());
        }
    }
}

fn updater(root: &Path) -> IconSetUpdater {
    IconSetUpdater::new(root, default_categories())
}

#[tokio::test]
async fn run_creates_components_for_every_set() {
    let root = test_root("heroicons-gen-test-full-run");

    let report = updater(&root).run(&FakeReleaseProvider::new("v2.1.0")).await.unwrap();
    assert_eq!(report.tag, "v2.1.0");
    assert_eq!(report.components, 8);

    for set in ["Micro", "Mini", "Solid", "Outline"] {
        let set_dir = root.join(COMPONENT_ROOT).join(set);
        for name in ["ArrowDownIcon.razor", "HandThumbUpIcon.razor"] {
            let content = fs::read_to_string(set_dir.join(name)).unwrap();
            assert!(content.starts_with("@inherits HeroiconBase\n<svg"));
            assert!(content.contains("aria-hidden=\"true\" @attributes=\"AdditionalAttributes\""));
        }
        assert_eq!(fs::read_dir(&set_dir).unwrap().count(), 2);
    }

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn run_replaces_stale_components() {
    let root = test_root("heroicons-gen-test-stale");
    let solid_dir = root.join(COMPONENT_ROOT).join("Solid");
    fs::create_dir_all(&solid_dir).unwrap();
    fs::write(solid_dir.join("RemovedUpstreamIcon.razor"), "old").unwrap();

    updater(&root).run(&FakeReleaseProvider::new("v2.1.0")).await.unwrap();

    assert!(!solid_dir.join("RemovedUpstreamIcon.razor").exists());
    assert_eq!(fs::read_dir(&solid_dir).unwrap().count(), 2);

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn run_updates_badge_and_version_file() {
    let root = test_root("heroicons-gen-test-stamp");

    updater(&root).run(&FakeReleaseProvider::new("v2.5.0")).await.unwrap();

    let readme = fs::read_to_string(root.join(README_FILE)).unwrap();
    let lines: Vec<&str> = readme.lines().collect();
    assert_eq!(lines[0], "# Blazor Heroicons");
    assert!(lines[1].contains("heroicons-v2.5.0-informational"));
    assert!(lines[1].contains("releases/tag/v2.5.0"));
    assert_eq!(lines[2], "Some other content");

    assert_eq!(fs::read(root.join(VERSION_FILE)).unwrap(), b"v2.5.0");

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn run_regenerates_name_class_and_registry() {
    let root = test_root("heroicons-gen-test-registry");
    let class_path = root.join(COMPONENT_ROOT).join(NAME_CLASS_FILE);
    fs::write(&class_path, "previous contents").unwrap();

    updater(&root).run(&FakeReleaseProvider::new("v2.1.0")).await.unwrap();

    let name_class = fs::read_to_string(&class_path).unwrap();
    assert!(name_class.contains("public static class HeroiconName"));
    let arrow = name_class.find("public const string ArrowDown = \"arrow-down\";").unwrap();
    let thumb = name_class
        .find("public const string HandThumbUp = \"hand-thumb-up\";")
        .unwrap();
    assert!(arrow < thumb);

    assert_eq!(
        fs::read_to_string(root.join(COMPONENT_ROOT).join("HeroiconName.cs.bak")).unwrap(),
        "previous contents"
    );

    let registry = fs::read_to_string(root.join(COMPONENT_ROOT).join("HeroiconRegistry.cs")).unwrap();
    assert!(registry.contains("internal static class HeroiconRegistry"));
    assert!(registry.contains("{ \"Blazor.Heroicons.Solid.ArrowDownIcon\", typeof(Solid.ArrowDownIcon) },"));
    assert!(registry.contains("{ \"Blazor.Heroicons.Outline.HandThumbUpIcon\", typeof(Outline.HandThumbUpIcon) },"));
    assert!(registry.contains("HeroiconType.Micro"));

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn run_removes_scratch_directory() {
    let root = test_root("heroicons-gen-test-scratch");

    updater(&root).run(&FakeReleaseProvider::new("v2.1.0")).await.unwrap();

    assert!(!root.join("tmp").exists());

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn run_clears_scratch_left_by_an_interrupted_run() {
    let root = test_root("heroicons-gen-test-scratch-stale");
    fs::create_dir_all(root.join("tmp")).unwrap();
    fs::write(root.join("tmp/leftover.tar.gz"), "half a download").unwrap();

    let report = updater(&root).run(&FakeReleaseProvider::new("v2.1.0")).await.unwrap();

    assert!(!root.join("tmp").exists());
    assert!(
        report
            .feedback
            .iter()
            .any(|f| f.message().contains("previous run"))
    );

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn rerunning_is_idempotent() {
    let root = test_root("heroicons-gen-test-idempotent");
    let provider = FakeReleaseProvider::new("v2.1.0");

    updater(&root).run(&provider).await.unwrap();
    let first = snapshot(&root);

    updater(&root).run(&provider).await.unwrap();
    let second = snapshot(&root);

    assert_eq!(first, second);

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn metadata_failure_leaves_prior_state_untouched() {
    let root = test_root("heroicons-gen-test-offline");
    updater(&root).run(&FakeReleaseProvider::new("v2.0.0")).await.unwrap();
    let before = snapshot(&root);

    let result = updater(&root).run(&UnreachableProvider).await;

    assert!(matches!(result, Err(SyncError::Network(_))));
    assert_eq!(snapshot(&root), before);
    assert!(!root.join("tmp").exists());

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn malformed_asset_aborts_and_names_the_file_and_set() {
    let root = test_root("heroicons-gen-test-malformed");
    let provider = MalformedAssetProvider {
        inner: FakeReleaseProvider::new("v2.1.0"),
    };

    let result = updater(&root).run(&provider).await;

    let err = result.unwrap_err();
    match &err {
        SyncError::MalformedAsset(msg) => {
            assert!(msg.contains("bad-asset.svg"));
            assert!(msg.contains("Outline"));
        }
        other => panic!("expected MalformedAsset, got {other:?}"),
    }

    // Sets regenerated before the failure keep their new state; the
    // version stamp must not advance.
    let micro_dir = root.join(COMPONENT_ROOT).join("Micro");
    assert_eq!(fs::read_dir(&micro_dir).unwrap().count(), 2);
    assert!(!root.join(VERSION_FILE).exists());
    assert!(
        fs::read_to_string(root.join(README_FILE)).unwrap().contains("v1.0.0")
    );
    assert!(!root.join("tmp").exists());

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn missing_badge_line_is_reported_as_a_warning() {
    let root = test_root("heroicons-gen-test-nobadge");
    fs::write(root.join(README_FILE), "# Blazor Heroicons\nNo badge.\n").unwrap();

    let report = updater(&root).run(&FakeReleaseProvider::new("v2.1.0")).await.unwrap();

    assert!(report.feedback.iter().any(|f| f.is_warning()));
    assert_eq!(
        fs::read_to_string(root.join(README_FILE)).unwrap(),
        "# Blazor Heroicons\nNo badge.\n"
    );
    assert_eq!(fs::read(root.join(VERSION_FILE)).unwrap(), b"v2.1.0");

    let _ = fs::remove_dir_all(&root);
}
