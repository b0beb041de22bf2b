//! `mintship run` — the unit's `ExecStart` entry point.
//!
//! Loads the installed manifest, performs the startup preconditions
//! (mnemonic read, environment assembly), and execs the daemon. Any
//! precondition failure exits non-zero before the daemon is invoked;
//! systemd then applies the restart policy.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mintship_core::{Manifest, ServiceDescriptor};
use mintship_supervisor::launch;

/// Arguments for `mintship run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the installed deployment manifest.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Filesystem root the deployment was installed under.
    #[arg(long, default_value = "/")]
    pub root: PathBuf,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)
            .with_context(|| format!("failed to load manifest {}", self.manifest.display()))?;
        let launcher = std::env::current_exe().context("cannot locate the mintship binary")?;
        let descriptor = ServiceDescriptor::resolve(&manifest, &self.root, &launcher);

        let err = match launch::exec_daemon(&descriptor) {
            Ok(never) => match never {},
            Err(err) => err,
        };
        Err(anyhow::Error::new(err).context("mint daemon startup aborted"))
    }
}
