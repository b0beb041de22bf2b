//! # mintship-apply
//!
//! Hash-gated atomic writes and change previews for rendered artifacts.
//!
//! Call [`apply_artifacts`] to install a rendered set, or [`diff_artifacts`]
//! to see what an install would change without touching anything.

pub mod diff;
pub mod error;
pub mod writer;

pub use diff::{diff_artifacts, FileDiff};
pub use error::ApplyError;
pub use writer::{apply_artifact, apply_artifacts, WriteResult};
