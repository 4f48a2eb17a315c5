// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message preview.

use console::{measure_text_width, style, Term};

const BOX_WIDTH: usize = 62;

/// Commit preview renderer.
pub struct CommitPreview<'a> {
    message: &'a str,
}

impl<'a> CommitPreview<'a> {
    /// Create a new preview for a rendered message.
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Print the preview to stderr.
    pub fn print(&self) {
        let term = Term::stderr();
        let _ = self.render(&term);
    }

    /// Render the preview to a terminal.
    fn render(&self, term: &Term) -> std::io::Result<()> {
        term.write_line(&format!(
            "{}",
            style("┌─ Commit Preview ─────────────────────────────────────────────┐").dim()
        ))?;

        for (index, line) in self.message.lines().enumerate() {
            let shown = if index == 0 {
                style(line).bold().to_string()
            } else {
                style(line).dim().to_string()
            };
            term.write_line(&format!(
                "{} {}{}",
                style("│").dim(),
                shown,
                padding(measure_text_width(line))
            ))?;
        }

        term.write_line(&format!(
            "{}",
            style("└──────────────────────────────────────────────────────────────┘").dim()
        ))?;

        Ok(())
    }

    /// The subject line of the message.
    pub fn header(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// Create padding to align the right border.
fn padding(content_len: usize) -> String {
    let padding_needed = BOX_WIDTH.saturating_sub(content_len + 2);
    format!("{}{}", " ".repeat(padding_needed), style("│").dim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let preview = CommitPreview::new("feat: add\n\nbody");
        assert_eq!(preview.header(), "feat: add");
        assert_eq!(CommitPreview::new("").header(), "");
    }

    #[test]
    fn test_padding_shrinks_with_content() {
        let short = console::strip_ansi_codes(&padding(10)).to_string();
        let long = console::strip_ansi_codes(&padding(100)).to_string();
        assert_eq!(short.chars().count(), BOX_WIDTH - 12 + 1);
        assert_eq!(long, "│");
    }
}
