// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! gfc - Git commit templates and branch workflow
//!
//! A CLI tool that composes commit messages from templates, appends the
//! project version and branch, and drives a feature/release/hotfix
//! branching model on top of the `git` command.
//!
//! # Features
//!
//! - **Commit Templates**: `<placeholder>` templates with a gitmoji type catalogue
//! - **Version Resolution**: project config file, exact tag or short hash
//! - **Branch Workflow**: start and finish feature, release, hotfix and support branches
//!
//! # Example
//!
//! ```no_run
//! use gfc::git::Repository;
//! use gfc::session::Session;
//! use gfc::version::VersionResolver;
//!
//! let repo = Repository::open_current().unwrap();
//! let session = Session::new(repo.workdir()).with_project_name("api");
//!
//! let resolver = VersionResolver::for_session(&session, ".projectversion.json");
//! let info = resolver.version_info(&session, &repo.head_state().unwrap());
//! println!("{}", info);
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod session;
pub mod version;
pub mod workflow;

// Re-exports for convenience
pub use config::GfcConfig;
pub use error::{GfcError, Result};

/// Build information embedded at compile time.
pub mod build_info {
    /// The current version of gfc.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
