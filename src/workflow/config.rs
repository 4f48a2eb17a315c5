// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Branch workflow settings stored in the repository's git config.

use serde::{Deserialize, Serialize};

use crate::git::GitCli;

use super::classify::BranchRole;

pub const KEY_MASTER: &str = "workflow.branch.master";
pub const KEY_DEVELOP: &str = "workflow.branch.develop";
pub const KEY_FEATURE: &str = "workflow.prefix.feature";
pub const KEY_RELEASE: &str = "workflow.prefix.release";
pub const KEY_HOTFIX: &str = "workflow.prefix.hotfix";
pub const KEY_SUPPORT: &str = "workflow.prefix.support";
pub const KEY_VERSION_TAG: &str = "workflow.prefix.versiontag";

/// Trunk branch names and role prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Stable branch (published state).
    pub master: String,
    /// Development branch (integration state).
    pub develop: String,
    pub feature: String,
    pub release: String,
    pub hotfix: String,
    pub support: String,
    /// Prepended to versions when naming tags.
    pub version_tag: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            master: "master".to_string(),
            develop: "develop".to_string(),
            feature: "feature/".to_string(),
            release: "release/".to_string(),
            hotfix: "hotfix/".to_string(),
            support: "support/".to_string(),
            version_tag: String::new(),
        }
    }
}

impl WorkflowConfig {
    /// Every setting as a (git config key, value) pair.
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            (KEY_MASTER, self.master.as_str()),
            (KEY_DEVELOP, self.develop.as_str()),
            (KEY_FEATURE, self.feature.as_str()),
            (KEY_RELEASE, self.release.as_str()),
            (KEY_HOTFIX, self.hotfix.as_str()),
            (KEY_SUPPORT, self.support.as_str()),
            (KEY_VERSION_TAG, self.version_tag.as_str()),
        ]
    }

    /// Read the settings from git config; unset keys keep their defaults.
    pub fn load(git: &GitCli) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: &str| {
            git.query(&["config", "--get", key])
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            master: read(KEY_MASTER, &defaults.master),
            develop: read(KEY_DEVELOP, &defaults.develop),
            feature: read(KEY_FEATURE, &defaults.feature),
            release: read(KEY_RELEASE, &defaults.release),
            hotfix: read(KEY_HOTFIX, &defaults.hotfix),
            support: read(KEY_SUPPORT, &defaults.support),
            version_tag: read(KEY_VERSION_TAG, &defaults.version_tag),
        }
    }

    /// Whether both trunk branch names have been written to git config.
    pub fn is_initialized(git: &GitCli) -> bool {
        [KEY_MASTER, KEY_DEVELOP]
            .iter()
            .all(|key| git.query(&["config", "--get", key]).is_some())
    }

    /// The branch-name prefix for a role.
    pub fn prefix(&self, role: BranchRole) -> Option<&str> {
        match role {
            BranchRole::Feature => Some(&self.feature),
            BranchRole::Release => Some(&self.release),
            BranchRole::Hotfix => Some(&self.hotfix),
            BranchRole::Support => Some(&self.support),
            BranchRole::None => None,
        }
    }

    /// Full branch name for a role and a name or version.
    pub fn branch_name(&self, role: BranchRole, name: &str) -> Option<String> {
        self.prefix(role).map(|prefix| format!("{}{}", prefix, name))
    }

    /// Tag name for a version.
    pub fn tag_name(&self, version: &str) -> String {
        format!("{}{}", self.version_tag, version)
    }
}
