//! The resolved launch contract handed to systemd and to `mintship run`.

use std::path::{Path, PathBuf};

use crate::manifest::{LogLevel, Manifest};
use crate::paths;

/// Everything needed to launch and supervise the daemon process.
///
/// Built once per deploy from the manifest; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    /// The daemon executable.
    pub daemon: PathBuf,
    /// Owning user and group.
    pub user: String,
    pub group: String,
    /// Working directory; the unit's single writable path.
    pub data_dir: PathBuf,
    /// Resolved config path: the explicit override when present, else the
    /// generated artifact path.
    pub config_path: PathBuf,
    /// Whether `config_path` refers to the generated artifact.
    pub config_generated: bool,
    /// Generated environment file, absent when the environment map is empty.
    pub env_file: Option<PathBuf>,
    /// Mnemonic file read at startup, if configured.
    pub mnemonic_file: Option<PathBuf>,
    /// Exported as `RUST_LOG` before the daemon starts.
    pub log_level: LogLevel,
    /// Operator-supplied arguments, appended after `--work-dir`/`--config`.
    pub extra_args: Vec<String>,
    /// The unit's `ExecStart=` line: the mintship binary re-entering as
    /// `run` so the mnemonic precondition executes inside the supervising
    /// process.
    pub exec_start: String,
}

impl ServiceDescriptor {
    /// Resolve the launch contract for `manifest`, rooted at `root`, with
    /// `launcher` as the mintship binary the unit will invoke.
    pub fn resolve(manifest: &Manifest, root: &Path, launcher: &Path) -> ServiceDescriptor {
        let (config_path, config_generated) = match &manifest.config_file {
            Some(explicit) => (explicit.clone(), false),
            None => (paths::config_path_at(root), true),
        };

        let env_file = if manifest.environment.is_empty() {
            None
        } else {
            Some(paths::env_file_path_at(root))
        };

        let mut exec_start = format!(
            "{} run --manifest {}",
            launcher.display(),
            paths::manifest_install_path_at(root).display()
        );
        if root != Path::new("/") {
            exec_start.push_str(&format!(" --root {}", root.display()));
        }

        ServiceDescriptor {
            daemon: manifest.package.clone(),
            user: manifest.user.clone(),
            group: manifest.group.clone(),
            data_dir: manifest.data_dir.clone(),
            config_path,
            config_generated,
            env_file,
            mnemonic_file: manifest.mnemonic_file.clone(),
            log_level: manifest.log_level,
            extra_args: manifest.extra_args.clone(),
            exec_start,
        }
    }
}
