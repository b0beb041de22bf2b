//! Installed file layout.
//!
//! Every helper takes the filesystem root explicitly so tests (and staged
//! deploys) can point at a temp directory; production callers pass `/`.

use std::path::{Path, PathBuf};

/// The systemd unit name of the deployed daemon.
pub const SERVICE_NAME: &str = "cdk-mintd";

/// Port the mint listens on when the settings carry a non-integer value.
pub const DEFAULT_LISTEN_PORT: u16 = 3338;

/// `<root>/etc/mintship/`
pub fn etc_dir_at(root: &Path) -> PathBuf {
    root.join("etc").join("mintship")
}

/// `<root>/etc/mintship/manifest.yaml` — the installed manifest copy the
/// generated unit's `ExecStart` points back at.
pub fn manifest_install_path_at(root: &Path) -> PathBuf {
    etc_dir_at(root).join("manifest.yaml")
}

/// `<root>/etc/mintship/cdk-mintd/` — generated daemon artifacts.
pub fn service_etc_dir_at(root: &Path) -> PathBuf {
    etc_dir_at(root).join(SERVICE_NAME)
}

/// `<root>/etc/mintship/cdk-mintd/config.toml`
pub fn config_path_at(root: &Path) -> PathBuf {
    service_etc_dir_at(root).join("config.toml")
}

/// `<root>/etc/mintship/cdk-mintd/mintd.env`
pub fn env_file_path_at(root: &Path) -> PathBuf {
    service_etc_dir_at(root).join("mintd.env")
}

/// `<root>/etc/systemd/system/cdk-mintd.service`
pub fn unit_path_at(root: &Path) -> PathBuf {
    root.join("etc")
        .join("systemd")
        .join("system")
        .join(format!("{SERVICE_NAME}.service"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted() {
        let root = Path::new("/tmp/stage");
        assert_eq!(
            config_path_at(root),
            PathBuf::from("/tmp/stage/etc/mintship/cdk-mintd/config.toml")
        );
        assert_eq!(
            env_file_path_at(root),
            PathBuf::from("/tmp/stage/etc/mintship/cdk-mintd/mintd.env")
        );
        assert_eq!(
            unit_path_at(root),
            PathBuf::from("/tmp/stage/etc/systemd/system/cdk-mintd.service")
        );
        assert_eq!(
            manifest_install_path_at(root),
            PathBuf::from("/tmp/stage/etc/mintship/manifest.yaml")
        );
    }
}
