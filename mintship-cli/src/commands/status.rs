//! `mintship status` — service state, artifact freshness, mint health.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use mintship_core::{paths, Manifest, ServiceDescriptor};
use mintship_render::{render_artifacts, Artifact};
use mintship_supervisor::systemctl;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// Arguments for `mintship status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to the deployment manifest.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Filesystem root the deployment was installed under.
    #[arg(long, default_value = "/")]
    pub root: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArtifactState {
    /// On-disk content matches the rendered artifact.
    Current,
    /// On-disk content differs; a deploy would rewrite it.
    Stale,
    /// Not installed.
    Missing,
}

#[derive(Debug)]
struct ArtifactStatus {
    path: PathBuf,
    state: ArtifactState,
    age: String,
}

#[derive(Serialize)]
struct StatusJson {
    unit: String,
    unit_state: String,
    health: String,
    artifacts: Vec<ArtifactStatusJson>,
}

#[derive(Serialize)]
struct ArtifactStatusJson {
    path: String,
    state: String,
    age: String,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "artifact")]
    artifact: String,
    #[tabled(rename = "state")]
    state: String,
    #[tabled(rename = "installed")]
    installed: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)
            .with_context(|| format!("failed to load manifest {}", self.manifest.display()))?;
        let launcher = std::env::current_exe().context("cannot locate the mintship binary")?;
        let descriptor = ServiceDescriptor::resolve(&manifest, &self.root, &launcher);
        let artifacts = render_artifacts(&manifest, &descriptor, &self.root)
            .context("failed to render deployment artifacts")?;

        let rows: Vec<ArtifactStatus> = artifacts.iter().map(artifact_status).collect();
        let unit_state =
            systemctl::is_active(paths::SERVICE_NAME).unwrap_or_else(|_| "unknown".to_string());
        let health = probe_health(&manifest);

        if self.json {
            let payload = StatusJson {
                unit: format!("{}.service", paths::SERVICE_NAME),
                unit_state,
                health,
                artifacts: rows
                    .into_iter()
                    .map(|row| ArtifactStatusJson {
                        path: row.path.display().to_string(),
                        state: state_key(row.state).to_string(),
                        age: row.age,
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize status")?
            );
            return Ok(());
        }

        println!(
            "mintship v{} | {}.service {} | mint {}",
            env!("CARGO_PKG_VERSION"),
            paths::SERVICE_NAME,
            state_colored(&unit_state),
            health,
        );

        let table_rows: Vec<StatusTableRow> = rows
            .iter()
            .map(|row| StatusTableRow {
                artifact: row.path.display().to_string(),
                state: state_label(row.state).to_string(),
                installed: row.age.clone(),
            })
            .collect();
        let mut table = Table::new(table_rows);
        table.with(Style::rounded());
        println!("{table}");

        if rows.iter().any(|r| r.state != ArtifactState::Current) {
            println!("Run 'mintship deploy' to bring the installation up to date.");
        }
        Ok(())
    }
}

fn artifact_status(artifact: &Artifact) -> ArtifactStatus {
    match std::fs::read_to_string(&artifact.path) {
        Ok(existing) => {
            let state = if existing == artifact.content {
                ArtifactState::Current
            } else {
                ArtifactState::Stale
            };
            ArtifactStatus {
                path: artifact.path.clone(),
                state,
                age: modified_age(&artifact.path),
            }
        }
        Err(_) => ArtifactStatus {
            path: artifact.path.clone(),
            state: ArtifactState::Missing,
            age: "never".to_string(),
        },
    }
}

fn modified_age(path: &std::path::Path) -> String {
    let Ok(metadata) = std::fs::metadata(path) else {
        return "unknown".to_string();
    };
    let Ok(modified) = metadata.modified() else {
        return "unknown".to_string();
    };
    format_age(DateTime::<Utc>::from(modified))
}

/// Human-readable age of a timestamp, coarsest useful unit.
fn format_age(then: DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(then);
    if elapsed.num_seconds() < 60 {
        return "just now".to_string();
    }
    if elapsed.num_minutes() < 60 {
        return format!("{}m ago", elapsed.num_minutes());
    }
    if elapsed.num_hours() < 24 {
        return format!("{}h ago", elapsed.num_hours());
    }
    format!("{}d ago", elapsed.num_days())
}

/// GET the mint's info endpoint; any HTTP answer counts as alive.
fn probe_health(manifest: &Manifest) -> String {
    let merged = manifest.merged_settings();
    let host = merged.listen_host().unwrap_or("127.0.0.1").to_string();
    let port = merged
        .listen_port()
        .unwrap_or(paths::DEFAULT_LISTEN_PORT);
    let url = format!("http://{host}:{port}/v1/info");

    let agent = ureq::AgentBuilder::new().timeout(HEALTH_TIMEOUT).build();
    match agent.get(&url).call() {
        Ok(response) => format!("ok (HTTP {})", response.status()),
        Err(ureq::Error::Status(code, _)) => format!("responding (HTTP {code})"),
        Err(_) => "unreachable".to_string(),
    }
}

fn state_key(state: ArtifactState) -> &'static str {
    match state {
        ArtifactState::Current => "current",
        ArtifactState::Stale => "stale",
        ArtifactState::Missing => "missing",
    }
}

fn state_label(state: ArtifactState) -> String {
    match state {
        ArtifactState::Current => "CURRENT".green().to_string(),
        ArtifactState::Stale => "STALE".yellow().to_string(),
        ArtifactState::Missing => "MISSING".red().to_string(),
    }
}

fn state_colored(unit_state: &str) -> String {
    match unit_state {
        "active" => unit_state.green().to_string(),
        "failed" => unit_state.red().to_string(),
        other => other.yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;

    #[test]
    fn format_age_picks_coarsest_unit() {
        let now = Utc::now();
        assert_eq!(format_age(now), "just now");
        assert_eq!(format_age(now - ChronoDuration::minutes(5)), "5m ago");
        assert_eq!(format_age(now - ChronoDuration::hours(3)), "3h ago");
        assert_eq!(format_age(now - ChronoDuration::days(2)), "2d ago");
    }

    #[test]
    fn state_keys_are_stable() {
        assert_eq!(state_key(ArtifactState::Current), "current");
        assert_eq!(state_key(ArtifactState::Stale), "stale");
        assert_eq!(state_key(ArtifactState::Missing), "missing");
    }
}
