//! Mintship — declarative deployment for the cdk-mintd Cashu mint daemon.
//!
//! # Usage
//!
//! ```text
//! mintship deploy    --manifest <path> [--root <dir>] [--dry-run]
//! mintship validate  --manifest <path>
//! mintship render    --manifest <path> [--root <dir>]
//! mintship diff      --manifest <path> [--root <dir>]
//! mintship status    --manifest <path> [--root <dir>] [--json]
//! mintship run       --manifest <path> [--root <dir>]
//! mintship uninstall [--root <dir>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    deploy::DeployArgs, diff::DiffArgs, render::RenderArgs, run::RunArgs, status::StatusArgs,
    uninstall::UninstallArgs, validate::ValidateArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mintship",
    version,
    about = "Deploy and supervise the cdk-mintd Cashu mint under systemd",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the manifest, install artifacts, and (re)start the service.
    Deploy(DeployArgs),

    /// Check required settings without touching the system.
    Validate(ValidateArgs),

    /// Print every rendered artifact to stdout.
    Render(RenderArgs),

    /// Show unified diffs of what deploy would change.
    Diff(DiffArgs),

    /// Show service state, artifact freshness, and mint health.
    Status(StatusArgs),

    /// Startup entry point used as the unit's ExecStart; execs the daemon.
    Run(RunArgs),

    /// Stop the service and remove installed artifacts (data dir is kept).
    Uninstall(UninstallArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Deploy(args) => args.run(),
        Commands::Validate(args) => args.run(),
        Commands::Render(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Run(args) => args.run(),
        Commands::Uninstall(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    // Quiet by default so command output stays parseable; RUST_LOG overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
