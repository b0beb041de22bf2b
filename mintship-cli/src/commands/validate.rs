//! `mintship validate` — settings checks with no side effects.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use mintship_core::Manifest;

/// Arguments for `mintship validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the deployment manifest.
    #[arg(long)]
    pub manifest: PathBuf,
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)
            .with_context(|| format!("failed to load manifest {}", self.manifest.display()))?;

        let errors = mintship_core::validate(&manifest.merged_settings());
        if !errors.is_empty() {
            for error in &errors {
                eprintln!("{} {error}", "error:".red().bold());
            }
            bail!("validation failed with {} error(s)", errors.len());
        }

        println!("{} settings are valid", "ok:".green().bold());
        Ok(())
    }
}
