//! `mintship uninstall` — stop the service and remove installed artifacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mintship_core::paths;
use mintship_supervisor::systemctl;

/// Arguments for `mintship uninstall`.
#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Filesystem root the deployment was installed under.
    #[arg(long, default_value = "/")]
    pub root: PathBuf,
}

impl UninstallArgs {
    pub fn run(self) -> Result<()> {
        systemctl::stop(paths::SERVICE_NAME)?;
        systemctl::disable(paths::SERVICE_NAME)?;

        let unit = paths::unit_path_at(&self.root);
        if unit.exists() {
            std::fs::remove_file(&unit)
                .with_context(|| format!("failed to remove {}", unit.display()))?;
            println!("removed {}", unit.display());
        }

        let etc_dir = paths::etc_dir_at(&self.root);
        if etc_dir.exists() {
            std::fs::remove_dir_all(&etc_dir)
                .with_context(|| format!("failed to remove {}", etc_dir.display()))?;
            println!("removed {}", etc_dir.display());
        }

        systemctl::daemon_reload()?;
        println!(
            "{} {} uninstalled; the data directory was kept",
            "ok:".green().bold(),
            paths::SERVICE_NAME
        );
        Ok(())
    }
}
