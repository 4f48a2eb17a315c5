// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Repository discovery and HEAD inspection go through `git2`; everything
//! that mutates the working copy shells out to the `git` binary.

mod repo;
pub mod runner;

pub use repo::{HeadState, Repository};
pub use runner::GitCli;

/// Number of hex characters in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
