//! `mintship diff` — unified diffs of what deploy would change.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mintship_apply::diff_artifacts;
use mintship_core::{Manifest, ServiceDescriptor};
use mintship_render::render_artifacts;

/// Arguments for `mintship diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Path to the deployment manifest.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Filesystem root to compare against.
    #[arg(long, default_value = "/")]
    pub root: PathBuf,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)
            .with_context(|| format!("failed to load manifest {}", self.manifest.display()))?;
        let launcher = std::env::current_exe().context("cannot locate the mintship binary")?;
        let descriptor = ServiceDescriptor::resolve(&manifest, &self.root, &launcher);
        let artifacts = render_artifacts(&manifest, &descriptor, &self.root)
            .context("failed to render deployment artifacts")?;

        let diffs = diff_artifacts(&artifacts).context("failed to diff artifacts")?;
        if diffs.is_empty() {
            println!("No differences; the deployment is current.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
