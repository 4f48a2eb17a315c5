// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the gfc application.
//!
//! This module defines all error types used throughout the application,
//! with proper error categorization and context propagation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gfc operations.
#[derive(Error, Debug)]
pub enum GfcError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Branch workflow errors
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    // Commit errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // User cancelled operation
    #[error("Operation cancelled by user")]
    Cancelled,

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<dialoguer::Error> for GfcError {
    fn from(err: dialoguer::Error) -> Self {
        GfcError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Failed to get branch: {message}")]
    BranchFailed { message: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("Failed to create commit: {message}")]
    CommitFailed { message: String },

    #[error("Detached HEAD state")]
    DetachedHead,
}

/// Branch workflow errors.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Branch workflow is not initialized in this repository (run `gfc flow init`)")]
    NotInitialized,

    #[error("Invalid {what}: '{value}'")]
    InvalidName { what: String, value: String },

    #[error("'{role}' branches cannot be {action}")]
    Unsupported { role: String, action: String },

    #[error("A {role} name is required (pass it or check out a {role} branch)")]
    NoBranchSelected { role: String },

    #[error("Step '{step}' failed (last completed: {}): {diagnostic}", .last_completed.as_deref().unwrap_or("none"))]
    StepFailed {
        step: String,
        last_completed: Option<String>,
        diagnostic: String,
    },
}

/// Commit-related errors.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Subject is required")]
    MissingSubject,

    #[error("Subject line too long: {length} characters (max: {max})")]
    SubjectTooLong { length: usize, max: usize },

    #[error("Unknown template: '{name}'")]
    UnknownTemplate { name: String },

    #[error("Empty commit message")]
    EmptyMessage,
}

/// Result type alias for gfc operations.
pub type Result<T> = std::result::Result<T, GfcError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| GfcError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config"),
        };
        assert!(err.to_string().contains("/path/to/config"));
    }

    #[test]
    fn test_step_failed_display() {
        let err = WorkflowError::StepFailed {
            step: "merge release/1.0.0 into master".to_string(),
            last_completed: Some("checkout master".to_string()),
            diagnostic: "CONFLICT (content)".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("merge release/1.0.0 into master"));
        assert!(text.contains("last completed: checkout master"));
        assert!(text.contains("CONFLICT"));
    }

    #[test]
    fn test_step_failed_without_completed_steps() {
        let err = WorkflowError::StepFailed {
            step: "checkout develop".to_string(),
            last_completed: None,
            diagnostic: "pathspec did not match".to_string(),
        };
        assert!(err.to_string().contains("last completed: none"));
    }

    #[test]
    fn test_gfc_error_from_commit_error() {
        let err: GfcError = CommitError::SubjectTooLong {
            length: 100,
            max: 72,
        }
        .into();
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("72"));
    }

    #[test]
    fn test_result_ext_context() {
        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        let err = io.context("writing gfc.toml").unwrap_err();
        assert_eq!(err.to_string(), "writing gfc.toml: denied");
    }

    #[test]
    fn test_no_branch_selected_display() {
        let err: GfcError = WorkflowError::NoBranchSelected {
            role: "feature".to_string(),
        }
        .into();
        let text = err.to_string();
        assert!(text.contains("A feature name is required"));
        assert!(!text.contains("''"));
    }
}
