// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for gfc.
//!
//! This module handles loading and parsing the tool configuration
//! (`gfc.toml`) and provides the built-in defaults.

pub mod default;
mod loader;
mod schema;

pub use loader::{find_config_file, find_config_file_from, load_config, parse_config};
pub use schema::*;
