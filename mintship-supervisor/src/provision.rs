//! System user, group, and data directory provisioning.
//!
//! The daemon runs as a dedicated system account; its data directory is
//! the only path it can write. Directory mode is 0750: owner and group
//! access, nothing for the world.

use std::path::Path;
use std::process::Command;

use crate::error::{io_err, SupervisorError};

/// Create `group` as a system group if it does not exist.
pub fn ensure_group(group: &str) -> Result<(), SupervisorError> {
    if entity_exists("group", group)? {
        return Ok(());
    }
    tracing::info!("creating system group {group}");
    run_checked(Command::new("groupadd").args(["--system", group]), "groupadd")
}

/// Create `user` as a system user in `group` if it does not exist.
///
/// No home directory is created; the daemon's working directory is managed
/// separately by [`ensure_data_dir`].
pub fn ensure_user(user: &str, group: &str) -> Result<(), SupervisorError> {
    if entity_exists("passwd", user)? {
        return Ok(());
    }
    tracing::info!("creating system user {user}");
    run_checked(
        Command::new("useradd").args([
            "--system",
            "--no-create-home",
            "--shell",
            "/usr/sbin/nologin",
            "-g",
            group,
            user,
        ]),
        "useradd",
    )
}

/// Hand a generated file to the service group so the daemon's launcher can
/// read it. Owner is untouched; the writer already set the mode.
pub fn grant_group_read(path: &Path, group: &str) -> Result<(), SupervisorError> {
    let gid = lookup_gid(group)?;
    chown_group(path, gid)
}

/// Create the data directory with mode 0750, owned by `user:group`.
pub fn ensure_data_dir(dir: &Path, user: &str, group: &str) -> Result<(), SupervisorError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    set_dir_mode(dir)?;

    let uid = lookup_uid(user)?;
    let gid = lookup_gid(group)?;
    chown_dir(dir, uid, gid)
}

/// `getent <database> <name>` — exit status says whether the entry exists.
fn entity_exists(database: &str, name: &str) -> Result<bool, SupervisorError> {
    let output = Command::new("getent")
        .args([database, name])
        .output()
        .map_err(|e| SupervisorError::Provision(format!("failed to run getent: {e}")))?;
    Ok(output.status.success())
}

/// Resolve a user's uid via `id -u <user>`.
fn lookup_uid(user: &str) -> Result<u32, SupervisorError> {
    let output = Command::new("id")
        .args(["-u", user])
        .output()
        .map_err(|e| SupervisorError::Provision(format!("failed to run id -u {user}: {e}")))?;
    if !output.status.success() {
        return Err(SupervisorError::Provision(format!(
            "cannot resolve uid of {user} (status {})",
            output.status
        )));
    }
    let uid = String::from_utf8_lossy(&output.stdout).trim().to_string();
    uid.parse()
        .map_err(|_| SupervisorError::Provision(format!("uid of {user} was not numeric: {uid}")))
}

/// Resolve a group's gid from its `getent group` entry.
fn lookup_gid(group: &str) -> Result<u32, SupervisorError> {
    let output = Command::new("getent")
        .args(["group", group])
        .output()
        .map_err(|e| SupervisorError::Provision(format!("failed to run getent group: {e}")))?;
    if !output.status.success() {
        return Err(SupervisorError::Provision(format!(
            "group {group} not found after provisioning"
        )));
    }
    let line = String::from_utf8_lossy(&output.stdout).trim().to_string();
    parse_gid(&line).ok_or_else(|| {
        SupervisorError::Provision(format!("cannot parse gid from getent entry: {line}"))
    })
}

/// `name:x:gid:members` → gid.
fn parse_gid(getent_line: &str) -> Option<u32> {
    getent_line.split(':').nth(2)?.parse().ok()
}

fn run_checked(command: &mut Command, name: &str) -> Result<(), SupervisorError> {
    let output = command
        .output()
        .map_err(|e| SupervisorError::Provision(format!("failed to run {name}: {e}")))?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(SupervisorError::Provision(format!(
        "{name} failed (status {}): {stderr}",
        output.status
    )))
}

#[cfg(unix)]
fn set_dir_mode(dir: &Path) -> Result<(), SupervisorError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o750))
        .map_err(|e| io_err(dir, e))
}

#[cfg(not(unix))]
fn set_dir_mode(_dir: &Path) -> Result<(), SupervisorError> {
    Ok(())
}

#[cfg(unix)]
fn chown_dir(dir: &Path, uid: u32, gid: u32) -> Result<(), SupervisorError> {
    std::os::unix::fs::chown(dir, Some(uid), Some(gid)).map_err(|e| io_err(dir, e))
}

#[cfg(not(unix))]
fn chown_dir(_dir: &Path, _uid: u32, _gid: u32) -> Result<(), SupervisorError> {
    Ok(())
}

#[cfg(unix)]
fn chown_group(path: &Path, gid: u32) -> Result<(), SupervisorError> {
    std::os::unix::fs::chown(path, None, Some(gid)).map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn chown_group(_path: &Path, _gid: u32) -> Result<(), SupervisorError> {
    Ok(())
}
