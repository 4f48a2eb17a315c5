// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use assert_cmd::Command as BinCommand;
use tempfile::TempDir;

/// Run git in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A repository on `master` with one commit.
pub fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    git(path, &["init", "-q"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/master"]);
    git(path, &["config", "user.email", "dev@example.com"]);
    git(path, &["config", "user.name", "Dev"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    git(path, &["config", "tag.gpgsign", "false"]);
    commit_file(path, "README.md", "hello\n", "initial");
    dir
}

/// Write a file and commit it.
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(dir.join(name), content).unwrap();
    git(dir, &["add", name]);
    git(dir, &["commit", "-q", "-m", message]);
}

/// The gfc binary running in `dir`, isolated from user-level config.
pub fn gfc(dir: &Path) -> BinCommand {
    let mut cmd = BinCommand::cargo_bin("gfc").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("NO_COLOR", "1")
        .arg("--non-interactive");
    cmd
}
