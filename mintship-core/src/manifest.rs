//! The deployment manifest — the single declarative input.
//!
//! One YAML document describes the whole deployment: which daemon binary to
//! run, as whom, where its data lives, its settings tree, and its secrets.
//! Re-running a deploy with an unchanged manifest is a no-op.
//!
//! ```yaml
//! package: /usr/local/bin/cdk-mintd
//! log_level: info
//! open_firewall: true
//! mnemonic_file: /run/keys/mintd-mnemonic
//! environment:
//!   CDK_MINTD_DATABASE: sqlite
//! settings:
//!   info:
//!     listen_port: 3338
//!   ln:
//!     ln_backend: FakeWallet
//!   database:
//!     engine: sqlite
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};
use crate::settings::SettingsTree;

/// Log verbosity handed to the daemon via `RUST_LOG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// The declarative deployment input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Path to the `cdk-mintd` executable.
    pub package: PathBuf,

    /// System user the daemon runs as. Created if absent.
    #[serde(default = "default_user")]
    pub user: String,

    /// System group the daemon runs as. Created if absent.
    #[serde(default = "default_group")]
    pub group: String,

    /// The daemon's working directory; its single writable path.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Explicit config file. When set, the generated config is not written
    /// and this path is handed to the daemon instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,

    /// Variables written to the generated environment file, loaded into the
    /// daemon's process environment by systemd. Empty map → no file.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,

    /// File whose contents become `CDK_MINTD_MNEMONIC` at startup. The file
    /// is read by `mintship run` as the service user, never baked into an
    /// artifact; it must be readable by that user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic_file: Option<PathBuf>,

    /// Daemon log verbosity, exported as `RUST_LOG`.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Open the listen port in the host firewall.
    #[serde(default)]
    pub open_firewall: bool,

    /// Extra CLI arguments appended after `--work-dir` and `--config`,
    /// order preserved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,

    /// The daemon settings tree, deep-merged over built-in defaults.
    #[serde(default)]
    pub settings: SettingsTree,
}

fn default_user() -> String {
    "cdk-mintd".to_string()
}

fn default_group() -> String {
    "cdk-mintd".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/var/lib/cdk-mintd")
}

impl Manifest {
    /// Load a manifest from `path`.
    ///
    /// Returns `CoreError::ManifestNotFound` if absent,
    /// `CoreError::Parse` (with path + line context) if malformed YAML.
    pub fn load(path: &Path) -> Result<Manifest, CoreError> {
        if !path.exists() {
            return Err(CoreError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// The operator's settings deep-merged over the built-in defaults.
    /// This is the tree the validator and the config renderer see.
    pub fn merged_settings(&self) -> SettingsTree {
        self.settings.merged_over_defaults()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const MINIMAL: &str = "\
package: /usr/local/bin/cdk-mintd
settings:
  info:
    listen_port: 3338
  ln:
    ln_backend: FakeWallet
  database:
    engine: sqlite
";

    fn write_manifest(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("manifest.yaml");
        std::fs::write(&path, contents).expect("write manifest");
        path
    }

    #[test]
    fn minimal_manifest_gets_defaults() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::load(&write_manifest(&dir, MINIMAL)).expect("load");
        assert_eq!(manifest.user, "cdk-mintd");
        assert_eq!(manifest.group, "cdk-mintd");
        assert_eq!(manifest.data_dir, PathBuf::from("/var/lib/cdk-mintd"));
        assert_eq!(manifest.log_level, LogLevel::Info);
        assert!(!manifest.open_firewall);
        assert!(manifest.environment.is_empty());
        assert!(manifest.config_file.is_none());
        assert!(manifest.mnemonic_file.is_none());
    }

    #[test]
    fn settings_survive_yaml_to_toml_value() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::load(&write_manifest(&dir, MINIMAL)).expect("load");
        let merged = manifest.merged_settings();
        assert_eq!(merged.listen_port(), Some(3338));
        assert_eq!(
            merged.get("ln", "ln_backend").and_then(toml::Value::as_str),
            Some("FakeWallet")
        );
        // default preserved alongside the explicit settings
        assert_eq!(merged.listen_host(), Some("127.0.0.1"));
    }

    #[test]
    fn full_manifest_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "\
package: /opt/cdk-mintd/bin/cdk-mintd
user: mint
group: mint
data_dir: /srv/mint
log_level: debug
open_firewall: true
mnemonic_file: /run/keys/mnemonic
extra_args: [\"--enable-swagger\"]
environment:
  CDK_MINTD_WORK_DIR: /srv/mint
settings:
  info:
    listen_port: 8085
",
        );
        let manifest = Manifest::load(&path).expect("load");
        assert_eq!(manifest.user, "mint");
        assert_eq!(manifest.log_level, LogLevel::Debug);
        assert!(manifest.open_firewall);
        assert_eq!(manifest.extra_args, vec!["--enable-swagger".to_string()]);
        assert_eq!(
            manifest.environment.get("CDK_MINTD_WORK_DIR"),
            Some(&"/srv/mint".to_string())
        );

        let yaml = serde_yaml::to_string(&manifest).expect("serialize");
        let reparsed: Manifest = serde_yaml::from_str(&yaml).expect("reparse");
        assert_eq!(reparsed, manifest);
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::ManifestNotFound { .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error_with_path() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "package: [unclosed");
        let err = Manifest::load(&path).unwrap_err();
        match err {
            CoreError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn log_level_display_matches_rust_log_syntax() {
        assert_eq!(LogLevel::Error.to_string(), "error");
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}
