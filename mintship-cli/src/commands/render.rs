//! `mintship render` — print the rendered artifacts without writing them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mintship_core::{Manifest, ServiceDescriptor};
use mintship_render::render_artifacts;

/// Arguments for `mintship render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the deployment manifest.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Filesystem root the artifact paths are resolved against.
    #[arg(long, default_value = "/")]
    pub root: PathBuf,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)
            .with_context(|| format!("failed to load manifest {}", self.manifest.display()))?;
        let launcher = std::env::current_exe().context("cannot locate the mintship binary")?;
        let descriptor = ServiceDescriptor::resolve(&manifest, &self.root, &launcher);
        let artifacts = render_artifacts(&manifest, &descriptor, &self.root)
            .context("failed to render deployment artifacts")?;

        for artifact in &artifacts {
            println!(
                "{}",
                format!("--- {} (mode {:04o}) ---", artifact.path.display(), artifact.mode).bold()
            );
            print!("{}", artifact.content);
            if !artifact.content.ends_with('\n') {
                println!();
            }
            println!();
        }
        Ok(())
    }
}
