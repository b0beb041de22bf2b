//! Unified diffs of rendered artifacts against what is installed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use mintship_render::Artifact;

use crate::error::{io_err, ApplyError};

/// A single pending file change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Compare each rendered artifact to current on-disk content.
///
/// No files are written. Artifacts whose content already matches are
/// omitted from the result.
pub fn diff_artifacts(artifacts: &[Artifact]) -> Result<Vec<FileDiff>, ApplyError> {
    let mut diffs = Vec::new();
    for artifact in artifacts {
        let existing = read_existing_or_empty(&artifact.path)?;
        if existing == artifact.content {
            continue;
        }

        let old_header = format!("a{}", artifact.path.display());
        let new_header = format!("b{}", artifact.path.display());
        let unified = TextDiff::from_lines(&existing, &artifact.content)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path: artifact.path.clone(),
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

fn read_existing_or_empty(path: &Path) -> Result<String, ApplyError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::writer::apply_artifact;

    use super::*;

    fn artifact(path: PathBuf, content: &str) -> Artifact {
        Artifact {
            path,
            content: content.to_string(),
            mode: 0o644,
        }
    }

    #[test]
    fn missing_file_diffs_against_empty() {
        let tmp = TempDir::new().unwrap();
        let a = artifact(tmp.path().join("config.toml"), "listen_port = 3338\n");
        let diffs = diff_artifacts(std::slice::from_ref(&a)).unwrap();
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].unified_diff.contains("+listen_port = 3338"));
    }

    #[test]
    fn installed_artifact_produces_no_diff() {
        let tmp = TempDir::new().unwrap();
        let a = artifact(tmp.path().join("config.toml"), "listen_port = 3338\n");
        apply_artifact(&a, false).unwrap();
        let diffs = diff_artifacts(std::slice::from_ref(&a)).unwrap();
        assert!(diffs.is_empty(), "clean install should have no diff");
    }

    #[test]
    fn changed_content_shows_both_sides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        apply_artifact(&artifact(path.clone(), "listen_port = 3338\n"), false).unwrap();

        let updated = artifact(path, "listen_port = 8085\n");
        let diffs = diff_artifacts(std::slice::from_ref(&updated)).unwrap();
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].unified_diff.contains("-listen_port = 3338"));
        assert!(diffs[0].unified_diff.contains("+listen_port = 8085"));
    }
}
