//! Error surface for provisioning, systemd management, and daemon launch.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("systemctl error: {0}")]
    Systemctl(String),

    #[error("provisioning error: {0}")]
    Provision(String),

    #[error("firewall error: {0}")]
    Firewall(String),

    /// The configured mnemonic file does not exist. Raised before the
    /// daemon executable is ever invoked.
    #[error("mnemonic file not found at {path}; refusing to start the mint without its seed")]
    MnemonicMissing { path: PathBuf },

    #[error("failed to exec daemon {daemon}: {source}")]
    Exec {
        daemon: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("daemon launch is only supported on unix hosts")]
    UnsupportedHost,
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SupervisorError {
    SupervisorError::Io {
        path: path.into(),
        source,
    }
}
