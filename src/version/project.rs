// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Per-project version config files.
//!
//! A config file names the file holding a project's version and the regex
//! that extracts it:
//!
//! ```json
//! // single project
//! { "projectName": "web", "path": "package.json",
//!   "versionRegex": "\"version\"\\s*:\\s*\"([\\d.]+)\"" }
//! ```
//!
//! or, for several projects sharing one directory,
//! `{ "config": [ { "projectName": ... }, ... ] }`.

use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One project entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Project name.
    pub project_name: String,
    /// File holding the version, relative to the config file's directory.
    pub path: String,
    /// Pattern whose first capture group (or whole match) is the version.
    #[serde(default)]
    pub version_regex: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ProjectRecord {
    /// Read the target file and extract the version from it.
    ///
    /// Any failure (unreadable file, bad pattern, no match, empty match)
    /// yields `None`.
    pub fn extract_version(&self, base_dir: &Path) -> Option<String> {
        let target = base_dir.join(&self.path);
        let content = match std::fs::read_to_string(&target) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Cannot read version file {:?}: {}", target, e);
                return None;
            }
        };

        extract_with_pattern(&self.version_regex, &content)
    }
}

/// Apply `pattern` to `content`; first capture group, else whole match, trimmed.
pub fn extract_with_pattern(pattern: &str, content: &str) -> Option<String> {
    if pattern.is_empty() {
        return None;
    }

    let regex = match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => {
            tracing::debug!("Invalid version pattern {:?}: {}", pattern, e);
            return None;
        }
    };

    let captures = regex.captures(content)?;
    let matched = captures.get(1).or_else(|| captures.get(0))?;
    let version = matched.as_str().trim();

    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// The two accepted file layouts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProjectVersionConfig {
    /// `{ "config": [ ... ] }`
    Multi { config: Vec<ProjectRecord> },
    /// A single record at the top level.
    Single(ProjectRecord),
}

/// Outcome of choosing a record from a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// A usable record.
    Record(&'a ProjectRecord),
    /// Multi-project config without a (matching) project name.
    Ambiguous,
}

impl ProjectVersionConfig {
    /// Parse config text, dropping `//` comment lines first.
    ///
    /// Returns `None` for anything that is not a valid config.
    pub fn parse(content: &str) -> Option<Self> {
        let stripped = strip_comment_lines(content);
        let value: serde_json::Value = match serde_json::from_str(&stripped) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Ignoring invalid project version config: {}", e);
                return None;
            }
        };

        // A present but non-array `config` must not fall back to the single layout.
        if let Some(config) = value.get("config") {
            if !config.is_array() {
                tracing::debug!("Ignoring project version config: `config` is not an array");
                return None;
            }
        }

        match serde_json::from_value(value) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::debug!("Ignoring invalid project version config: {}", e);
                None
            }
        }
    }

    /// Pick the record to use.
    pub fn select(&self, project_name: Option<&str>) -> Selection<'_> {
        match self {
            ProjectVersionConfig::Single(record) => Selection::Record(record),
            ProjectVersionConfig::Multi { config } => project_name
                .and_then(|name| config.iter().find(|r| r.project_name == name))
                .map_or(Selection::Ambiguous, Selection::Record),
        }
    }

    /// Names of all projects in this config.
    pub fn project_names(&self) -> Vec<&str> {
        match self {
            ProjectVersionConfig::Single(record) => vec![record.project_name.as_str()],
            ProjectVersionConfig::Multi { config } => {
                config.iter().map(|r| r.project_name.as_str()).collect()
            }
        }
    }

    /// Whether the file lists several projects.
    pub fn is_multi(&self) -> bool {
        matches!(self, ProjectVersionConfig::Multi { .. })
    }
}

/// A config file found on disk.
#[derive(Debug, Clone)]
pub struct LoadedProjectConfig {
    /// Directory holding the config file; record paths are relative to it.
    pub dir: PathBuf,
    /// Parsed content.
    pub config: ProjectVersionConfig,
}

impl LoadedProjectConfig {
    /// Find and parse the nearest config file at or above `start`.
    ///
    /// The nearest file wins even when it is invalid; an invalid file means
    /// "no config".
    pub fn discover(start: &Path, file_name: &str) -> Option<Self> {
        let dir = find_config_dir(start, file_name)?;
        let path = dir.join(file_name);
        tracing::debug!("Using project version config {:?}", path);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Cannot read {:?}: {}", path, e);
                return None;
            }
        };

        let config = ProjectVersionConfig::parse(&content)?;
        Some(Self { dir, config })
    }
}

/// Nearest directory at or above `start` holding `file_name`.
///
/// `start` may be a file, in which case the search begins at its directory.
pub fn find_config_dir(start: &Path, file_name: &str) -> Option<PathBuf> {
    let first = if start.is_file() { start.parent()? } else { start };

    first
        .ancestors()
        .find(|dir| dir.join(file_name).is_file())
        .map(Path::to_path_buf)
}

fn strip_comment_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}
