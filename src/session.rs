// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Per-invocation selection state.

use std::path::{Path, PathBuf};

/// Everything one commit or workflow invocation needs to know about what
/// the user selected. Created per command and passed explicitly to the
/// version resolver and the commit builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    repo_root: PathBuf,
    context_path: Option<PathBuf>,
    project_name: Option<String>,
}

impl Session {
    /// Start a session for the repository rooted at `repo_root`.
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            context_path: None,
            project_name: None,
        }
    }

    /// Set the file or directory the version lookup starts from.
    ///
    /// Relative paths are taken relative to the repository root.
    pub fn with_context_path(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.context_path = Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_root.join(path)
        });
        self
    }

    /// Select a project inside a multi-project version config.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.project_name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// The repository working directory.
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Where the version lookup starts, if anywhere.
    pub fn context_path(&self) -> Option<&Path> {
        self.context_path.as_deref()
    }

    /// The selected project name, if any.
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }
}
