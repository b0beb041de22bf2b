//! Error types for mintship-apply.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from applying artifacts.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ApplyError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ApplyError {
    ApplyError::Io {
        path: path.into(),
        source,
    }
}
