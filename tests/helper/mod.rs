//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Path of a fixture lockfile under `tests/lockfiles`
pub fn fixture(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/lockfiles")
        .join(path)
}

/// Run the binary with an isolated config directory
pub fn run_cli(args: &[&str]) -> Output {
    let config_home = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_lockfile-diff"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("LOCKFILE_DIFF_LOG")
        .output()
        .unwrap()
}
