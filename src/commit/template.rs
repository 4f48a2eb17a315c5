// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message templates and placeholder substitution.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::fields::CommitFields;

lazy_static! {
    /// Matches every recognized placeholder token.
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"<(icon|type|scope|subject|body|footer|enter|space)>").unwrap();
}

/// A placeholder recognized inside template content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Icon,
    Type,
    Scope,
    Subject,
    Body,
    Footer,
    Enter,
    Space,
}

impl Placeholder {
    /// Parse the name between the angle brackets.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "icon" => Some(Placeholder::Icon),
            "type" => Some(Placeholder::Type),
            "scope" => Some(Placeholder::Scope),
            "subject" => Some(Placeholder::Subject),
            "body" => Some(Placeholder::Body),
            "footer" => Some(Placeholder::Footer),
            "enter" => Some(Placeholder::Enter),
            "space" => Some(Placeholder::Space),
            _ => None,
        }
    }

    /// The placeholder name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::Icon => "icon",
            Placeholder::Type => "type",
            Placeholder::Scope => "scope",
            Placeholder::Subject => "subject",
            Placeholder::Body => "body",
            Placeholder::Footer => "footer",
            Placeholder::Enter => "enter",
            Placeholder::Space => "space",
        }
    }

    /// The token as written in templates, e.g. `<subject>`.
    pub fn token(&self) -> String {
        format!("<{}>", self.as_str())
    }

    /// Get all placeholders.
    pub fn all() -> &'static [Placeholder] {
        &[
            Placeholder::Icon,
            Placeholder::Type,
            Placeholder::Scope,
            Placeholder::Subject,
            Placeholder::Body,
            Placeholder::Footer,
            Placeholder::Enter,
            Placeholder::Space,
        ]
    }
}

/// A named commit message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Template name.
    pub name: String,
    /// Content with placeholders.
    pub content: String,
}

impl Template {
    /// Create a new template.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Placeholders used by this template, in order of first appearance.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut seen = Vec::new();
        for caps in PLACEHOLDER_REGEX.captures_iter(&self.content) {
            if let Some(p) = Placeholder::from_name(&caps[1]) {
                if !seen.contains(&p) {
                    seen.push(p);
                }
            }
        }
        seen
    }

    /// Render this template with the given fields.
    pub fn render(&self, fields: &CommitFields, emoji: bool) -> String {
        render(&self.content, fields, emoji)
    }
}

/// Substitute every placeholder in `content` and trim the result.
///
/// Substitution is a single pass over the template, so values coming from
/// the fields are never scanned for placeholders themselves.
pub fn render(content: &str, fields: &CommitFields, emoji: bool) -> String {
    let rendered = PLACEHOLDER_REGEX.replace_all(content, |caps: &Captures<'_>| {
        Placeholder::from_name(&caps[1])
            .map(|p| substitution(p, fields, emoji))
            .unwrap_or_default()
    });

    rendered.trim().to_string()
}

fn substitution(placeholder: Placeholder, fields: &CommitFields, emoji: bool) -> String {
    match placeholder {
        Placeholder::Icon if !emoji => String::new(),
        Placeholder::Enter => "\n\n".to_string(),
        Placeholder::Space => " ".to_string(),
        field => fields.value(field).unwrap_or_default().to_string(),
    }
}

/// Append version metadata below a rendered message.
pub fn append_version_info(rendered: &str, version_info: Option<&str>) -> String {
    match version_info.map(str::trim).filter(|info| !info.is_empty()) {
        Some(info) if rendered.is_empty() => info.to_string(),
        Some(info) => format!("{}\n\n{}", rendered, info),
        None => rendered.to_string(),
    }
}
