//! # mintship-render
//!
//! Pure rendering: deployment manifest in, artifact text out. Nothing in
//! this crate touches the filesystem; writing is `mintship-apply`'s job.
//!
//! - [`config`] — settings tree → daemon `config.toml`
//! - [`envfile`] — environment map → `NAME=VALUE` file
//! - [`unit`] — service descriptor → systemd unit (embedded tera template)
//! - [`artifacts`] — the full artifact set for one deploy

pub mod artifacts;
pub mod config;
pub mod envfile;
pub mod error;
pub mod unit;

pub use artifacts::{render_artifacts, Artifact};
pub use config::render_config;
pub use envfile::render_env_file;
pub use error::RenderError;
pub use unit::{render_unit, UnitContext, UnitRenderer};
