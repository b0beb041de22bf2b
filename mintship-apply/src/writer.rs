//! Atomic artifact installation.
//!
//! ## Write protocol
//!
//! 1. SHA-256 hash the rendered content.
//! 2. Hash the file currently on disk (if any) → skip when identical.
//! 3. Write to a `.mintship.tmp` sibling, set the target mode on it.
//! 4. Rename to the final path (atomic on POSIX, same directory so no EXDEV).
//!
//! The installed file itself is the idempotency source of truth: there is no
//! side store to drift out of sync with reality. A deploy whose every
//! artifact comes back [`WriteResult::Unchanged`] can skip the service
//! restart entirely.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use mintship_render::Artifact;

use crate::error::{io_err, ApplyError};

/// Outcome of an individual artifact write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — on-disk content already matches.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Atomically install a single artifact.
pub fn apply_artifact(artifact: &Artifact, dry_run: bool) -> Result<WriteResult, ApplyError> {
    let path = &artifact.path;

    let rendered_hash = sha256_hex(artifact.content.as_bytes());
    let on_disk_hash = match std::fs::read(path) {
        Ok(bytes) => Some(sha256_hex(&bytes)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => return Err(io_err(path, err)),
    };

    if on_disk_hash.as_deref() == Some(rendered_hash.as_str()) {
        if !dry_run {
            set_mode(path, artifact.mode)?;
        }
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.mintship.tmp", path.display()));
    std::fs::write(&tmp, &artifact.content).map_err(|e| io_err(&tmp, e))?;
    set_mode(&tmp, artifact.mode)?;

    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, err));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Install a whole artifact set in order. Stops at the first error.
pub fn apply_artifacts(
    artifacts: &[Artifact],
    dry_run: bool,
) -> Result<Vec<WriteResult>, ApplyError> {
    artifacts
        .iter()
        .map(|artifact| apply_artifact(artifact, dry_run))
        .collect()
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), ApplyError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), ApplyError> {
    Ok(())
}
