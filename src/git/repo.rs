// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GfcError, GitError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

use super::runner::GitCli;

/// Where HEAD currently points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    /// HEAD is a named local branch with at least one commit.
    Branch(String),
    /// HEAD points directly at a commit.
    Detached,
    /// HEAD names a branch that has no commits yet.
    Unborn,
}

impl HeadState {
    /// The branch name, when HEAD is on a born branch.
    pub fn branch(&self) -> Option<&str> {
        match self {
            HeadState::Branch(name) => Some(name),
            _ => None,
        }
    }
}

/// Wrapper around git2::Repository with additional functionality.
pub struct Repository {
    inner: Git2Repo,
    workdir: PathBuf,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            GfcError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open the repository containing a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GfcError::Git(GitError::NotARepository)
            } else {
                GfcError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                GfcError::Git(GitError::OpenFailed {
                    message: "Repository has no working directory (bare repository)".to_string(),
                })
            })?
            .to_path_buf();

        Ok(Self {
            inner: repo,
            workdir,
        })
    }

    /// Get the working directory path.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// A command runner rooted at the working directory.
    pub fn cli(&self) -> GitCli {
        GitCli::new(&self.workdir)
    }

    /// Inspect HEAD.
    pub fn head_state(&self) -> Result<HeadState> {
        match self.inner.head() {
            Ok(head) if head.is_branch() => {
                let name = head.shorthand().ok_or_else(|| {
                    GfcError::Git(GitError::BranchFailed {
                        message: "Invalid branch name encoding".to_string(),
                    })
                })?;
                Ok(HeadState::Branch(name.to_string()))
            }
            Ok(_) => Ok(HeadState::Detached),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(HeadState::Unborn),
            Err(e) => Err(GfcError::Git(GitError::BranchFailed {
                message: e.message().to_string(),
            })),
        }
    }

    /// Get the current branch name.
    pub fn branch_name(&self) -> Result<String> {
        match self.head_state()? {
            HeadState::Branch(name) => Ok(name),
            HeadState::Detached | HeadState::Unborn => Err(GfcError::Git(GitError::DetachedHead)),
        }
    }

    /// Whether a local branch with this name exists.
    pub fn has_local_branch(&self, name: &str) -> bool {
        self.inner
            .find_branch(name, git2::BranchType::Local)
            .is_ok()
    }
}
