//! The daemon launch path — `mintship run`'s working half.
//!
//! Sequence: read the mnemonic file (hard failure if configured but
//! absent), assemble the environment and argument list, then `exec` the
//! daemon so it replaces this process and systemd supervises it directly.
//! The daemon is never invoked when a precondition fails.

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::Path;

use mintship_core::descriptor::ServiceDescriptor;

use crate::error::{io_err, SupervisorError};

/// Environment variable the daemon reads its seed phrase from.
pub const ENV_MNEMONIC: &str = "CDK_MINTD_MNEMONIC";

/// Environment variable controlling the daemon's log verbosity.
pub const ENV_RUST_LOG: &str = "RUST_LOG";

/// Read the mnemonic file, stripping the trailing newline editors append.
///
/// A missing file is [`SupervisorError::MnemonicMissing`]: a hard stop
/// rather than a silent empty-seed start.
pub fn read_mnemonic(path: &Path) -> Result<String, SupervisorError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(SupervisorError::MnemonicMissing {
                path: path.to_path_buf(),
            })
        }
        Err(err) => return Err(io_err(path, err)),
    };
    Ok(contents.trim_end_matches(['\r', '\n']).to_string())
}

/// Variables injected into the daemon's environment at launch.
///
/// Always `RUST_LOG`; `CDK_MINTD_MNEMONIC` when a mnemonic file is
/// configured. Reading the file here is the startup precondition: failure
/// propagates before any process is spawned.
pub fn build_environment(
    descriptor: &ServiceDescriptor,
) -> Result<Vec<(String, String)>, SupervisorError> {
    let mut env = vec![(ENV_RUST_LOG.to_string(), descriptor.log_level.to_string())];
    if let Some(mnemonic_file) = &descriptor.mnemonic_file {
        env.push((ENV_MNEMONIC.to_string(), read_mnemonic(mnemonic_file)?));
    }
    Ok(env)
}

/// The daemon argument list: `--work-dir`, `--config`, then operator extras
/// in manifest order.
pub fn build_args(descriptor: &ServiceDescriptor) -> Vec<OsString> {
    let mut args = vec![
        OsString::from("--work-dir"),
        descriptor.data_dir.as_os_str().to_os_string(),
        OsString::from("--config"),
        descriptor.config_path.as_os_str().to_os_string(),
    ];
    args.extend(descriptor.extra_args.iter().map(OsString::from));
    args
}

/// Check preconditions, then replace this process with the daemon.
///
/// Only returns on failure.
#[cfg(unix)]
pub fn exec_daemon(descriptor: &ServiceDescriptor) -> Result<Infallible, SupervisorError> {
    use std::os::unix::process::CommandExt;
    use std::process::Command;

    let env = build_environment(descriptor)?;
    let args = build_args(descriptor);

    tracing::info!(
        daemon = %descriptor.daemon.display(),
        config = %descriptor.config_path.display(),
        "launching mint daemon"
    );

    let mut command = Command::new(&descriptor.daemon);
    command
        .args(&args)
        .envs(env)
        .current_dir(&descriptor.data_dir);

    // exec replaces this process; reaching the next line means it failed.
    let source = command.exec();
    Err(SupervisorError::Exec {
        daemon: descriptor.daemon.clone(),
        source,
    })
}

#[cfg(not(unix))]
pub fn exec_daemon(_descriptor: &ServiceDescriptor) -> Result<Infallible, SupervisorError> {
    Err(SupervisorError::UnsupportedHost)
}
