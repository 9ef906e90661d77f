use std::fs;
use std::path::Path;

use crate::feedback::Feedback;
use crate::sync::SyncError;

/// Documentation file carrying the version badge, relative to the root.
pub const README_FILE: &str = "README.md";

/// Sidecar file recording the synced release tag, relative to the root.
pub const VERSION_FILE: &str = ".heroicons-version";

/// Badge lines are recognized by this prefix; everything after it is
/// regenerated wholesale.
pub const BADGE_PREFIX: &str = "[![Heroicons version]";

/// The full badge line for a release tag. The tag appears twice: in the
/// shields.io display URL and in the release link.
pub fn badge_line(tag: &str) -> String {
    format!(
        "[![Heroicons version](https://img.shields.io/badge/heroicons-{tag}-informational?style=flat-square)](https://github.com/tailwindlabs/heroicons/releases/tag/{tag})"
    )
}

/// Rewrite every badge line in the README and record `tag` in the sidecar
/// version file (exactly the tag, no added newline).
///
/// A README without a badge line is reported as a warning rather than
/// silently skipped — a vanished badge means the documentation drifted.
pub fn stamp_version(root: &Path, tag: &str) -> Result<Vec<Feedback>, SyncError> {
    let mut feedback = Vec::new();

    let readme_path = root.join(README_FILE);
    let contents = fs::read_to_string(&readme_path)
        .map_err(|e| SyncError::io("reading", &readme_path, e))?;

    let badge = badge_line(tag);
    let mut replaced = 0usize;
    let lines: Vec<&str> = contents
        .lines()
        .map(|line| {
            if line.starts_with(BADGE_PREFIX) {
                replaced += 1;
                badge.as_str()
            } else {
                line
            }
        })
        .collect();

    if replaced == 0 {
        feedback.push(Feedback::warning(format!(
            "no `{BADGE_PREFIX}` line in {README_FILE}; version badge left as-is"
        )));
    } else {
        let mut updated = lines.join("\n");
        if contents.ends_with('\n') {
            updated.push('\n');
        }
        fs::write(&readme_path, updated)
            .map_err(|e| SyncError::io("writing", &readme_path, e))?;
    }

    let version_path = root.join(VERSION_FILE);
    fs::write(&version_path, tag).map_err(|e| SyncError::io("writing", &version_path, e))?;

    Ok(feedback)
}
