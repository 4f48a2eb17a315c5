// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from gfc.toml.

use serde::{Deserialize, Serialize};

use crate::commit::Template;
use crate::workflow::WorkflowConfig;

/// Default name of the per-project version config file.
pub const DEFAULT_VERSION_CONFIG_FILE: &str = ".projectversion.json";

/// The main configuration structure for gfc.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GfcConfig {
    /// Commit authoring configuration.
    pub commit: CommitConfig,

    /// Version lookup configuration.
    pub version: VersionConfig,

    /// Defaults offered when initializing the branch workflow.
    pub workflow: WorkflowConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl GfcConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Commit authoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Maximum length of the subject, in characters.
    pub max_subject_length: usize,

    /// Whether the `<icon>` placeholder is filled.
    pub emoji: bool,

    /// Whether version and branch lines are appended to the message.
    pub append_version: bool,

    /// Template used when none is chosen explicitly.
    pub default_template: String,

    /// Available message templates.
    pub templates: Vec<Template>,

    /// Commit types offered for the `<type>` placeholder.
    pub types: Vec<CommitKind>,
}

impl CommitConfig {
    /// Find a template by name.
    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Find a commit type by name.
    pub fn kind(&self, name: &str) -> Option<&CommitKind> {
        self.types.iter().find(|k| k.name == name)
    }
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            max_subject_length: 72,
            emoji: true,
            append_version: true,
            default_template: "default".to_string(),
            templates: vec![
                Template::new(
                    "default",
                    "<icon><space><type>(<scope>):<space><subject><enter><body><enter><footer>",
                ),
                Template::new(
                    "angular",
                    "<type>(<scope>):<space><subject><enter><body><enter><footer>",
                ),
                Template::new("simple", "<icon><space><subject>"),
            ],
            types: CommitKind::defaults(),
        }
    }
}

/// A commit type with its icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitKind {
    /// Type name placed in `<type>`.
    pub name: String,

    /// Icon placed in `<icon>`.
    #[serde(default)]
    pub icon: String,

    /// Description shown in the type picker.
    #[serde(default)]
    pub description: String,
}

impl CommitKind {
    fn new(name: &str, icon: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }

    /// The built-in commit type catalogue.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("feat", "✨", "A new feature"),
            Self::new("fix", "🐛", "A bug fix"),
            Self::new("docs", "📝", "Documentation only changes"),
            Self::new("style", "💄", "Code style changes (formatting, whitespace)"),
            Self::new("refactor", "♻️", "Code refactoring (no feature/fix)"),
            Self::new("perf", "⚡️", "Performance improvements"),
            Self::new("test", "✅", "Adding or updating tests"),
            Self::new("build", "📦️", "Build system or dependency changes"),
            Self::new("ci", "👷", "CI configuration changes"),
            Self::new("chore", "🔧", "Build process or auxiliary tool changes"),
            Self::new("revert", "⏪️", "Reverting a previous commit"),
        ]
    }
}

/// Version lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// File name searched for upwards from the context path.
    pub config_file: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_VERSION_CONFIG_FILE.to_string(),
        }
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Whether to show hints.
    pub hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            hints: true,
        }
    }
}
