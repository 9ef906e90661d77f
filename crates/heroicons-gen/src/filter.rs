/// Directory inside the release archive holding the pre-minified SVGs.
/// Raw/source variants live in sibling trees and are never extracted.
pub const OPTIMIZED_SUBTREE: &str = "optimized";

/// An entry listed from the release archive. Only the path and kind are
/// read here; contents stay with the archive until extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path as stored in the archive, without a trailing slash.
    pub path: String,
    pub is_directory: bool,
}

/// The single top-level directory shared by every entry path.
///
/// Release tarballs wrap their contents in one generated directory whose
/// name varies per release (`tailwindlabs-heroicons-<sha>`), so the root
/// has to be discovered, never hard-coded. Returns `None` when the paths
/// disagree on their first segment or there are no paths at all.
pub fn archive_root<'a, I>(paths: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut paths = paths.into_iter();
    let root = paths.next()?.split('/').next()?;
    if root.is_empty() {
        return None;
    }

    for path in paths {
        if path.split('/').next() != Some(root) {
            return None;
        }
    }

    Some(root.to_owned())
}

/// Lazily yield the entries under `{common_root_prefix}/{sub_path}`.
///
/// Single-pass and non-restartable, which is all one extraction call
/// needs. The match is segment-aware: `root/optimized-raw` does not count
/// as being under `root/optimized`.
pub fn filter_under_prefix<I>(
    entries: I,
    common_root_prefix: &str,
    sub_path: &str,
) -> impl Iterator<Item = ArchiveEntry>
where
    I: IntoIterator<Item = ArchiveEntry>,
{
    let prefix = format!("{common_root_prefix}/{sub_path}");
    entries.into_iter().filter(move |entry| {
        entry
            .path
            .strip_prefix(&prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
