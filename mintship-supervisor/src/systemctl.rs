//! Thin systemctl wrapper for unit installation and lifecycle.

use std::process::Command;

use crate::error::SupervisorError;

/// Reload systemd's unit definitions after writing the unit file.
pub fn daemon_reload() -> Result<(), SupervisorError> {
    run_systemctl(&["daemon-reload"], false)
}

/// Enable the unit and start it if not already running.
pub fn enable_now(unit: &str) -> Result<(), SupervisorError> {
    run_systemctl(&["enable", "--now", unit], false)
}

/// Restart the unit (used when a deploy changed an artifact).
pub fn restart(unit: &str) -> Result<(), SupervisorError> {
    run_systemctl(&["restart", unit], false)
}

/// Stop the unit; missing units are not an error.
pub fn stop(unit: &str) -> Result<(), SupervisorError> {
    run_systemctl(&["stop", unit], true)
}

/// Disable the unit; missing units are not an error.
pub fn disable(unit: &str) -> Result<(), SupervisorError> {
    run_systemctl(&["disable", unit], true)
}

/// The unit's activation state (`active`, `inactive`, `failed`, ...).
///
/// `systemctl is-active` exits non-zero for inactive units; the state word
/// on stdout is still the answer, so status is ignored here.
pub fn is_active(unit: &str) -> Result<String, SupervisorError> {
    let output = Command::new("systemctl")
        .args(["is-active", unit])
        .output()
        .map_err(|e| SupervisorError::Systemctl(format!("failed to run systemctl: {e}")))?;
    let state = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if state.is_empty() {
        return Err(SupervisorError::Systemctl(format!(
            "systemctl is-active {unit} produced no output"
        )));
    }
    Ok(state)
}

fn run_systemctl(args: &[&str], ignore_failure: bool) -> Result<(), SupervisorError> {
    tracing::debug!("systemctl {}", args.join(" "));
    let output = Command::new("systemctl")
        .args(args)
        .output()
        .map_err(|e| SupervisorError::Systemctl(format!("failed to run systemctl: {e}")))?;

    if output.status.success() || ignore_failure {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Err(SupervisorError::Systemctl(format!(
        "systemctl {} failed (status {}): {} {}",
        args.join(" "),
        output.status,
        stdout,
        stderr
    )))
}
