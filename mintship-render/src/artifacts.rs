//! The full artifact set for one deploy.

use std::path::{Path, PathBuf};

use mintship_core::descriptor::ServiceDescriptor;
use mintship_core::manifest::Manifest;
use mintship_core::paths;

use crate::config::render_config;
use crate::envfile::render_env_file;
use crate::error::RenderError;
use crate::unit::render_unit;

/// One file a deploy wants on disk. Rendering produces these; writing them
/// is the apply crate's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    /// Unix permission bits for the installed file.
    pub mode: u32,
}

/// Render every artifact for `manifest`, rooted at `root`.
///
/// Produced set:
/// - the installed manifest copy (0640: `mintship run` reads it as the
///   service user, so it gets group read, no world access),
/// - the generated config (0640, same readers) unless an explicit
///   `config_file` overrides it,
/// - the env file (0600: only systemd itself reads it, as root) when the
///   environment map is non-empty,
/// - the systemd unit (0644).
///
/// Deploy chowns the 0640 artifacts to the service group after writing.
pub fn render_artifacts(
    manifest: &Manifest,
    descriptor: &ServiceDescriptor,
    root: &Path,
) -> Result<Vec<Artifact>, RenderError> {
    let mut artifacts = Vec::new();

    artifacts.push(Artifact {
        path: paths::manifest_install_path_at(root),
        content: serde_yaml::to_string(manifest)?,
        mode: 0o640,
    });

    if descriptor.config_generated {
        artifacts.push(Artifact {
            path: descriptor.config_path.clone(),
            content: render_config(&manifest.merged_settings())?,
            mode: 0o640,
        });
    }

    if let Some(env_path) = &descriptor.env_file {
        artifacts.push(Artifact {
            path: env_path.clone(),
            content: render_env_file(&manifest.environment),
            mode: 0o600,
        });
    }

    artifacts.push(Artifact {
        path: paths::unit_path_at(root),
        content: render_unit(descriptor)?,
        mode: 0o644,
    });

    Ok(artifacts)
}
