// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The set of values a commit template is rendered from.

use crate::config::CommitKind;
use crate::error::{CommitError, GfcError, Result};

use super::template::Placeholder;

/// Named commit fields collected during one authoring session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitFields {
    /// Icon for the commit type.
    pub icon: Option<String>,
    /// Commit type (feat, fix, etc.).
    pub commit_type: Option<String>,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Optional body, line breaks preserved.
    pub body: Option<String>,
    /// Optional footer (references, breaking changes, etc.).
    pub footer: Option<String>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn trimmed_subject(subject: impl Into<String>) -> Option<String> {
    non_empty(subject.into().trim())
}

impl CommitFields {
    /// Create a field set with a subject.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: trimmed_subject(subject),
            ..Self::default()
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = non_empty(icon);
        self
    }

    /// Set the type.
    pub fn with_type(mut self, commit_type: impl Into<String>) -> Self {
        self.commit_type = non_empty(commit_type);
        self
    }

    /// Set type and icon from a catalogue entry.
    pub fn with_kind(self, kind: &CommitKind) -> Self {
        self.with_type(kind.name.clone()).with_icon(kind.icon.clone())
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = non_empty(scope);
        self
    }

    /// Set the subject, trimmed.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = trimmed_subject(subject);
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = non_empty(body);
        self
    }

    /// Set the footer.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = non_empty(footer);
        self
    }

    /// The value bound to a field placeholder.
    ///
    /// `enter` and `space` are not fields and always yield `None`.
    pub fn value(&self, placeholder: Placeholder) -> Option<&str> {
        let value = match placeholder {
            Placeholder::Icon => &self.icon,
            Placeholder::Type => &self.commit_type,
            Placeholder::Scope => &self.scope,
            Placeholder::Subject => &self.subject,
            Placeholder::Body => &self.body,
            Placeholder::Footer => &self.footer,
            Placeholder::Enter | Placeholder::Space => return None,
        };
        value.as_deref()
    }

    /// Check the subject is present and within `max_subject_length` characters.
    pub fn validate(&self, max_subject_length: usize) -> Result<()> {
        let subject = self
            .subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(GfcError::Commit(CommitError::MissingSubject))?;

        check_subject_length(subject, max_subject_length)
    }
}

/// Reject subjects longer than `max` characters.
pub fn check_subject_length(subject: &str, max: usize) -> Result<()> {
    let length = subject.chars().count();
    if length > max {
        return Err(GfcError::Commit(CommitError::SubjectTooLong { length, max }));
    }
    Ok(())
}
