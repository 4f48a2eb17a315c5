// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Wrappers around the `git` command-line tool.

use crate::error::{GfcError, GitError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Runs `git` inside a fixed working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Create a runner rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory commands run in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command and return the raw output.
    ///
    /// Only a failure to spawn `git` is an error here; the exit status is
    /// left to the caller.
    pub fn output(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!("git {} (in {:?})", args.join(" "), self.root);

        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| {
                GfcError::Git(GitError::CommandFailed {
                    command: format!("git {}", args.join(" ")),
                    message: format!("Failed to run git: {}", e),
                })
            })
    }

    /// Run a git command, fail on a non-zero exit, return trimmed stdout.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;

        if !output.status.success() {
            return Err(GfcError::Git(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: diagnostic(&output),
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run a git command and report whether it exited successfully.
    pub fn succeeds(&self, args: &[&str]) -> bool {
        self.output(args)
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Run a git command and return its stdout only when it succeeded with
    /// non-empty output.
    pub fn query(&self, args: &[&str]) -> Option<String> {
        self.run(args).ok().filter(|s| !s.is_empty())
    }

    /// Create a commit from the given message.
    pub fn commit(&self, message: &str) -> Result<String> {
        self.run(&["commit", "-m", message]).map_err(|e| match e {
            GfcError::Git(GitError::CommandFailed { message, .. }) => {
                GfcError::Git(GitError::CommitFailed { message })
            }
            other => other,
        })?;

        self.run(&["rev-parse", "--short=8", "HEAD"])
    }
}

/// Build the diagnostic text for a failed command.
///
/// Merge conflicts are reported on stdout, most other failures on stderr.
pub fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    match (stderr.is_empty(), stdout.is_empty()) {
        (false, false) => format!("{}\n{}", stderr, stdout),
        (false, true) => stderr,
        (true, false) => stdout,
        (true, true) => match output.status.code() {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        },
    }
}
