// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Interactive commit builder.

use crate::config::GfcConfig;
use crate::error::{CommitError, GfcError, Result};
use crate::git::{GitCli, Repository};
use crate::session::Session;
use crate::version::{LoadedProjectConfig, VersionInfo, VersionResolver};

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm, Editor, Input, Select};

use super::fields::{check_subject_length, CommitFields};
use super::preview::CommitPreview;
use super::template::{append_version_info, Template};

/// Builds one commit message from fields, a template and version info.
pub struct CommitBuilder {
    config: GfcConfig,
    session: Session,
    fields: CommitFields,
    template: Option<String>,
    append_version: bool,
}

impl CommitBuilder {
    /// Create a new commit builder.
    pub fn new(config: GfcConfig, session: Session) -> Self {
        let append_version = config.commit.append_version;
        Self {
            config,
            session,
            fields: CommitFields::default(),
            template: None,
            append_version,
        }
    }

    /// Set the commit type; the icon comes from the type catalogue.
    pub fn with_type(mut self, type_str: &str) -> Self {
        self.fields = match self.config.commit.kind(type_str) {
            Some(kind) => self.fields.with_kind(kind),
            None => self.fields.with_type(type_str),
        };
        self
    }

    /// Override the icon.
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.fields = self.fields.with_icon(icon);
        self
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: &str) -> Self {
        self.fields = self.fields.with_scope(scope);
        self
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.fields = self.fields.with_subject(subject);
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: &str) -> Self {
        self.fields = self.fields.with_body(body);
        self
    }

    /// Set the footer.
    pub fn with_footer(mut self, footer: &str) -> Self {
        self.fields = self.fields.with_footer(footer);
        self
    }

    /// Choose a template by name.
    pub fn with_template(mut self, name: &str) -> Result<Self> {
        if self.config.commit.template(name).is_none() {
            return Err(GfcError::Commit(CommitError::UnknownTemplate {
                name: name.to_string(),
            }));
        }
        self.template = Some(name.to_string());
        Ok(self)
    }

    /// Turn version/branch lines on or off.
    pub fn with_version_info(mut self, append: bool) -> Self {
        self.append_version = append;
        self
    }

    /// The fields collected so far.
    pub fn fields(&self) -> &CommitFields {
        &self.fields
    }

    fn template(&self) -> Result<&Template> {
        let name = self
            .template
            .as_deref()
            .unwrap_or(&self.config.commit.default_template);

        self.config.commit.template(name).ok_or_else(|| {
            GfcError::Commit(CommitError::UnknownTemplate {
                name: name.to_string(),
            })
        })
    }

    /// Resolve version and branch for this session.
    pub fn version_info(&self) -> Result<VersionInfo> {
        let repo = Repository::open(self.session.repo_root())?;
        let head = repo.head_state()?;
        let resolver = VersionResolver::for_session(&self.session, &self.config.version.config_file);
        Ok(resolver.version_info(&self.session, &head))
    }

    /// Validate the fields and produce the final message text.
    pub fn build_message(&self) -> Result<String> {
        self.fields.validate(self.config.commit.max_subject_length)?;

        let rendered = self.template()?.render(&self.fields, self.config.commit.emoji);
        if rendered.is_empty() {
            return Err(GfcError::Commit(CommitError::EmptyMessage));
        }

        if !self.append_version {
            return Ok(rendered);
        }

        let info = self.version_info()?;
        Ok(append_version_info(&rendered, Some(&info.to_string())))
    }

    /// Commit without interactive prompts.
    ///
    /// With `print_only` the message goes to stdout instead of `git commit`.
    pub fn commit_non_interactive(self, print_only: bool) -> Result<()> {
        let message = self.build_message()?;

        if print_only {
            println!("{}", message);
        } else {
            let git = GitCli::new(self.session.repo_root());
            let sha = git.commit(&message)?;
            println!("[{}] {}", sha, CommitPreview::new(&message).header());
        }

        Ok(())
    }

    /// Run the interactive commit flow.
    pub fn run_interactive(mut self, print_only: bool, skip_confirm: bool) -> Result<()> {
        let term = Term::stderr();
        let theme = ColorfulTheme::default();

        if self.fields.commit_type.is_none() {
            self.prompt_type(&theme)?;
        }

        if self.fields.scope.is_none() {
            let scope = self.prompt_optional(&theme, "Scope (optional)")?;
            self.fields = self.fields.with_scope(scope);
        }

        if self.fields.subject.is_none() {
            let subject = self.prompt_subject(&theme)?;
            self.fields = self.fields.with_subject(subject);
        }

        if self.fields.body.is_none() {
            let wants_body = Confirm::with_theme(&theme)
                .with_prompt("Add a body?")
                .default(false)
                .interact_opt()?
                .ok_or(GfcError::Cancelled)?;

            if wants_body {
                if let Some(body) = self.prompt_body()? {
                    self.fields = self.fields.with_body(body);
                }
            }
        }

        if self.fields.footer.is_none() {
            let footer = self.prompt_optional(&theme, "Footer (optional, e.g. Closes #12)")?;
            self.fields = self.fields.with_footer(footer);
        }

        if self.template.is_none() && self.config.commit.templates.len() > 1 {
            self.prompt_template(&theme)?;
        }

        if self.append_version && self.session.project_name().is_none() {
            self.prompt_project(&theme)?;
        }

        let message = self.build_message()?;

        term.write_line("")?;
        CommitPreview::new(&message).print();

        if !skip_confirm {
            let confirmed = Confirm::with_theme(&theme)
                .with_prompt(if print_only { "Print message?" } else { "Commit?" })
                .default(true)
                .interact_opt()?
                .unwrap_or(false);

            if !confirmed {
                return Err(GfcError::Cancelled);
            }
        }

        if print_only {
            println!("{}", message);
        } else {
            let git = GitCli::new(self.session.repo_root());
            let sha = git.commit(&message)?;
            term.write_line(&format!(
                "\n{} {} {}",
                style("✓").green().bold(),
                style(format!("[{}]", sha)).cyan(),
                CommitPreview::new(&message).header()
            ))?;
        }

        Ok(())
    }

    /// Prompt for commit type.
    fn prompt_type(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let kinds = &self.config.commit.types;
        if kinds.is_empty() {
            let commit_type = self.prompt_optional(theme, "Type")?;
            self.fields = self.fields.clone().with_type(commit_type);
            return Ok(());
        }

        let items: Vec<String> = kinds
            .iter()
            .map(|k| {
                let icon = if self.config.commit.emoji { k.icon.as_str() } else { "" };
                format!("{:3}{:10} {}", icon, k.name, style(&k.description).dim())
            })
            .collect();

        let selection = Select::with_theme(theme)
            .with_prompt("Select commit type")
            .items(&items)
            .default(0)
            .interact_opt()?
            .ok_or(GfcError::Cancelled)?;

        self.fields = self.fields.clone().with_kind(&kinds[selection]);
        Ok(())
    }

    fn prompt_optional(&self, theme: &ColorfulTheme, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    /// Prompt for subject.
    fn prompt_subject(&self, theme: &ColorfulTheme) -> Result<String> {
        let max_len = self.config.commit.max_subject_length;

        let subject: String = Input::with_theme(theme)
            .with_prompt(format!("Subject (max {} chars)", max_len))
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                if input.trim().is_empty() {
                    return Err("Subject is required".to_string());
                }
                check_subject_length(input.trim(), max_len).map_err(|e| e.to_string())
            })
            .interact_text()?;

        Ok(subject.trim().to_string())
    }

    /// Prompt for body.
    fn prompt_body(&self) -> Result<Option<String>> {
        let body = Editor::new()
            .edit("")
            .map_err(|e| GfcError::Ui(e.to_string()))?;

        Ok(body
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    fn prompt_template(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let templates = &self.config.commit.templates;
        let items: Vec<String> = templates
            .iter()
            .map(|t| format!("{:10} {}", t.name, style(&t.content).dim()))
            .collect();

        let default = templates
            .iter()
            .position(|t| t.name == self.config.commit.default_template)
            .unwrap_or(0);

        let selection = Select::with_theme(theme)
            .with_prompt("Select template")
            .items(&items)
            .default(default)
            .interact_opt()?
            .ok_or(GfcError::Cancelled)?;

        self.template = Some(templates[selection].name.clone());
        Ok(())
    }

    /// Ask which project to take the version from when the nearest version
    /// config lists several. Declining leaves the selection empty; the
    /// message then carries an invalid version but the commit goes ahead.
    fn prompt_project(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let Some(context) = self.session.context_path() else {
            return Ok(());
        };
        let Some(loaded) = LoadedProjectConfig::discover(context, &self.config.version.config_file)
        else {
            return Ok(());
        };
        if !loaded.config.is_multi() {
            return Ok(());
        }

        let names: Vec<String> = loaded
            .config
            .project_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let selection = Select::with_theme(theme)
            .with_prompt("Select project (Esc to skip)")
            .items(&names)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(index) => {
                self.session = self.session.clone().with_project_name(names[index].clone());
            }
            None => tracing::debug!("Project selection declined"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path());
        git.run(&["init"]).unwrap();
        git.run(&["config", "user.email", "test@example.com"]).unwrap();
        git.run(&["config", "user.name", "Test User"]).unwrap();
        git.run(&["config", "commit.gpgsign", "false"]).unwrap();
        git.run(&["symbolic-ref", "HEAD", "refs/heads/develop"]).unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        git.run(&["add", "a.txt"]).unwrap();
        git.run(&["commit", "-m", "initial"]).unwrap();
        dir
    }

    fn builder(dir: &TempDir) -> CommitBuilder {
        CommitBuilder::new(GfcConfig::default(), Session::new(dir.path()))
    }

    #[test]
    fn test_type_fills_icon() {
        let dir = TempDir::new().unwrap();
        let b = builder(&dir).with_type("fix");
        assert_eq!(b.fields().icon.as_deref(), Some("🐛"));
        assert_eq!(b.fields().commit_type.as_deref(), Some("fix"));

        let b = builder(&dir).with_type("custom");
        assert_eq!(b.fields().icon, None);
        assert_eq!(b.fields().commit_type.as_deref(), Some("custom"));
    }

    #[test]
    fn test_unknown_template_rejected() {
        let dir = TempDir::new().unwrap();
        let result = builder(&dir).with_template("nope");
        assert!(matches!(
            result,
            Err(GfcError::Commit(CommitError::UnknownTemplate { .. }))
        ));
    }

    #[test]
    fn test_build_message_without_version() {
        let dir = TempDir::new().unwrap();
        let message = builder(&dir)
            .with_type("feat")
            .with_scope("auth")
            .with_subject("add login")
            .with_version_info(false)
            .build_message()
            .unwrap();
        assert_eq!(message, "✨ feat(auth): add login");
    }

    #[test]
    fn test_build_message_requires_subject() {
        let dir = TempDir::new().unwrap();
        let err = builder(&dir)
            .with_type("feat")
            .with_version_info(false)
            .build_message()
            .unwrap_err();
        assert!(matches!(err, GfcError::Commit(CommitError::MissingSubject)));
    }

    #[test]
    fn test_build_message_appends_version_and_branch() {
        let dir = init_repo();
        let message = builder(&dir)
            .with_type("docs")
            .with_subject("update readme")
            .with_template("angular")
            .unwrap()
            .build_message()
            .unwrap();

        let mut parts = message.split("\n\n");
        assert_eq!(parts.next(), Some("docs(): update readme"));
        let info = parts.next().unwrap();
        assert!(info.starts_with("版本: "));
        assert!(info.ends_with("\n分支: develop"));
    }

    #[test]
    fn test_ambiguous_project_still_builds() {
        let dir = init_repo();
        std::fs::write(
            dir.path().join(".projectversion.json"),
            r#"{"config": [
                {"projectName": "a", "path": "a.txt", "versionRegex": "(a)"},
                {"projectName": "b", "path": "a.txt", "versionRegex": "(a)"}
            ]}"#,
        )
        .unwrap();

        let session = Session::new(dir.path()).with_context_path(".");
        let message = CommitBuilder::new(GfcConfig::default(), session)
            .with_type("fix")
            .with_subject("handle empty input")
            .build_message()
            .unwrap();

        assert!(message.contains("版本: invalid"));
        assert!(message.starts_with("🐛 fix(): handle empty input"));
    }

    #[test]
    fn test_commit_non_interactive_creates_commit() {
        let dir = init_repo();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        let git = GitCli::new(dir.path());
        git.run(&["add", "b.txt"]).unwrap();

        builder(&dir)
            .with_type("feat")
            .with_subject("add b")
            .with_version_info(false)
            .commit_non_interactive(false)
            .unwrap();

        assert_eq!(git.run(&["log", "-1", "--format=%s"]).unwrap(), "✨ feat(): add b");
    }
}
