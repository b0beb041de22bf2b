//! `mintship deploy` — the full pipeline: validate, provision, install,
//! activate.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use mintship_apply::{apply_artifacts, WriteResult};
use mintship_core::{paths, Manifest, ServiceDescriptor};
use mintship_render::render_artifacts;
use mintship_supervisor::{firewall, provision, systemctl};

/// Arguments for `mintship deploy`.
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Path to the deployment manifest.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Filesystem root to install under (staging / tests).
    #[arg(long, default_value = "/")]
    pub root: PathBuf,

    /// Show what would be written without touching the system.
    #[arg(long)]
    pub dry_run: bool,
}

impl DeployArgs {
    pub fn run(self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)
            .with_context(|| format!("failed to load manifest {}", self.manifest.display()))?;

        // Validation runs first and reports every violation in one pass.
        let merged = manifest.merged_settings();
        let errors = mintship_core::validate(&merged);
        if !errors.is_empty() {
            for error in &errors {
                eprintln!("{} {error}", "error:".red().bold());
            }
            bail!("validation failed with {} error(s)", errors.len());
        }

        let launcher = std::env::current_exe().context("cannot locate the mintship binary")?;
        let descriptor = ServiceDescriptor::resolve(&manifest, &self.root, &launcher);
        let artifacts = render_artifacts(&manifest, &descriptor, &self.root)
            .context("failed to render deployment artifacts")?;

        if self.dry_run {
            let results = apply_artifacts(&artifacts, true)?;
            print_writes(&results, true);
            println!("[dry-run] no provisioning or service changes performed");
            return Ok(());
        }

        provision::ensure_group(&manifest.group)?;
        provision::ensure_user(&manifest.user, &manifest.group)?;
        provision::ensure_data_dir(&manifest.data_dir, &manifest.user, &manifest.group)?;

        let results = apply_artifacts(&artifacts, false)?;
        print_writes(&results, false);

        // Group-readable artifacts are read by `mintship run` as the
        // service user; hand them to the service group.
        for artifact in artifacts.iter().filter(|a| a.mode == 0o640) {
            provision::grant_group_read(&artifact.path, &manifest.group)?;
        }

        if manifest.open_firewall {
            let port = merged.listen_port().unwrap_or(paths::DEFAULT_LISTEN_PORT);
            firewall::open_tcp_port(port)?;
        }

        systemctl::daemon_reload()?;
        systemctl::enable_now(paths::SERVICE_NAME)?;

        let changed = results
            .iter()
            .any(|r| matches!(r, WriteResult::Written { .. }));
        if changed {
            systemctl::restart(paths::SERVICE_NAME)?;
            println!("{} {} restarted", "ok:".green().bold(), paths::SERVICE_NAME);
        } else {
            println!(
                "{} nothing changed; {} restart skipped",
                "ok:".green().bold(),
                paths::SERVICE_NAME
            );
        }
        Ok(())
    }
}

fn print_writes(results: &[WriteResult], dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    for result in results {
        match result {
            WriteResult::Written { path } => {
                println!("{prefix}{} {}", "wrote".green(), path.display());
            }
            WriteResult::WouldWrite { path } => {
                println!("{prefix}{} {}", "would write".yellow(), path.display());
            }
            WriteResult::Unchanged { path } => {
                println!("{prefix}{} {}", "unchanged".bright_black(), path.display());
            }
        }
    }
}
