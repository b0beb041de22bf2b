//! End-to-end tests for `mintship run` using a stub daemon script.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A stand-in daemon that records its invocation, environment, and argv.
fn write_stub_daemon(dir: &Path) -> PathBuf {
    let path = dir.join("fake-mintd.sh");
    let script = "#!/bin/sh\n\
: > \"$(dirname \"$0\")/invoked\"\n\
echo \"MNEMONIC=${CDK_MINTD_MNEMONIC}\"\n\
echo \"RUST_LOG=${RUST_LOG}\"\n\
for arg in \"$@\"; do echo \"ARG=${arg}\"; done\n";
    std::fs::write(&path, script).expect("write stub daemon");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod stub");
    path
}

fn write_manifest(dir: &Path, daemon: &Path, data_dir: &Path, mnemonic: &Path) -> PathBuf {
    let path = dir.join("manifest.yaml");
    let yaml = format!(
        "\
package: {}
data_dir: {}
mnemonic_file: {}
extra_args: [\"--enable-swagger\"]
settings:
  info:
    listen_port: 3338
  ln:
    ln_backend: FakeWallet
  database:
    engine: sqlite
",
        daemon.display(),
        data_dir.display(),
        mnemonic.display(),
    );
    std::fs::write(&path, yaml).expect("write manifest");
    path
}

#[test]
fn run_injects_mnemonic_and_assembles_args_in_order() {
    let tmp = TempDir::new().unwrap();
    let daemon = write_stub_daemon(tmp.path());
    let data_dir = tmp.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();

    let mnemonic = tmp.path().join("mnemonic");
    std::fs::write(&mnemonic, "abandon abandon ability zoo\n").unwrap();

    let manifest = write_manifest(tmp.path(), &daemon, &data_dir, &mnemonic);

    let expected_config = tmp
        .path()
        .join("etc/mintship/cdk-mintd/config.toml")
        .display()
        .to_string();
    let expected_args = format!(
        "ARG=--work-dir\nARG={}\nARG=--config\nARG={}\nARG=--enable-swagger\n",
        data_dir.display(),
        expected_config,
    );

    Command::cargo_bin("mintship")
        .unwrap()
        .arg("run")
        .arg("--manifest")
        .arg(&manifest)
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "MNEMONIC=abandon abandon ability zoo\n",
        ))
        .stdout(predicate::str::contains("RUST_LOG=info\n"))
        .stdout(predicate::str::contains(expected_args));
}

#[test]
fn run_fails_before_daemon_when_mnemonic_file_is_missing() {
    let tmp = TempDir::new().unwrap();
    let daemon = write_stub_daemon(tmp.path());
    let data_dir = tmp.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();

    let manifest = write_manifest(
        tmp.path(),
        &daemon,
        &data_dir,
        &tmp.path().join("no-such-mnemonic"),
    );

    Command::cargo_bin("mintship")
        .unwrap()
        .arg("run")
        .arg("--manifest")
        .arg(&manifest)
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("mnemonic file not found"));

    assert!(
        !tmp.path().join("invoked").exists(),
        "daemon must not be invoked when the mnemonic precondition fails"
    );
}

#[test]
fn run_respects_explicit_config_override() {
    let tmp = TempDir::new().unwrap();
    let daemon = write_stub_daemon(tmp.path());
    let data_dir = tmp.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();

    let mnemonic = tmp.path().join("mnemonic");
    std::fs::write(&mnemonic, "abandon zoo\n").unwrap();

    let manifest = tmp.path().join("manifest.yaml");
    std::fs::write(
        &manifest,
        format!(
            "\
package: {}
data_dir: {}
mnemonic_file: {}
config_file: /etc/custom-mintd.toml
settings:
  info:
    listen_port: 3338
  ln:
    ln_backend: FakeWallet
  database:
    engine: sqlite
",
            daemon.display(),
            data_dir.display(),
            mnemonic.display(),
        ),
    )
    .unwrap();

    Command::cargo_bin("mintship")
        .unwrap()
        .arg("run")
        .arg("--manifest")
        .arg(&manifest)
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ARG=--config\nARG=/etc/custom-mintd.toml\n",
        ));
}
