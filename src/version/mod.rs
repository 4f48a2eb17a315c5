// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Version lookup for commit messages.
//!
//! Resolution order: the nearest project version config file, a tag on
//! HEAD, then the abbreviated HEAD hash.

pub mod project;
mod resolver;

pub use project::{LoadedProjectConfig, ProjectRecord, ProjectVersionConfig, Selection};
pub use resolver::{ResolvedVersion, VersionInfo, VersionResolver, VersionSource, INVALID_VERSION};
