// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Branch roles and prefix classification.

use std::fmt;

use super::config::WorkflowConfig;

/// The workflow role of a branch, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchRole {
    Feature,
    Release,
    Hotfix,
    Support,
    None,
}

impl BranchRole {
    /// Roles in classification priority order.
    pub fn prefixed() -> &'static [BranchRole] {
        &[
            BranchRole::Feature,
            BranchRole::Release,
            BranchRole::Hotfix,
            BranchRole::Support,
        ]
    }

    /// Get the string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchRole::Feature => "feature",
            BranchRole::Release => "release",
            BranchRole::Hotfix => "hotfix",
            BranchRole::Support => "support",
            BranchRole::None => "none",
        }
    }
}

impl std::str::FromStr for BranchRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feature" | "feat" => Ok(BranchRole::Feature),
            "release" => Ok(BranchRole::Release),
            "hotfix" => Ok(BranchRole::Hotfix),
            "support" => Ok(BranchRole::Support),
            "none" => Ok(BranchRole::None),
            other => Err(format!(
                "unknown branch role '{}' (expected feature, release, hotfix, support or none)",
                other
            )),
        }
    }
}

impl fmt::Display for BranchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a branch by the first role prefix it starts with.
///
/// Empty prefixes never match.
pub fn classify(branch_name: &str, config: &WorkflowConfig) -> BranchRole {
    BranchRole::prefixed()
        .iter()
        .copied()
        .find(|role| {
            config
                .prefix(*role)
                .is_some_and(|prefix| !prefix.is_empty() && branch_name.starts_with(prefix))
        })
        .unwrap_or(BranchRole::None)
}
