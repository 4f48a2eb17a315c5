// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Version resolution: project config file, then exact tag, then commit hash.

use std::fmt;

use crate::git::{GitCli, HeadState, SHORT_HASH_LEN};
use crate::session::Session;

use super::project::{LoadedProjectConfig, Selection};

/// Text used when no version could be resolved.
pub const INVALID_VERSION: &str = "invalid";

/// Where a resolved version came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Extracted through a project version config.
    ProjectConfig { project_name: String },
    /// A tag pointing exactly at HEAD.
    Tag,
    /// The abbreviated HEAD commit hash.
    Commit,
}

/// A version string and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub value: String,
    pub source: VersionSource,
}

/// Result of looking at the project version config.
enum ConfigLookup {
    Found(ResolvedVersion),
    /// Multi-project config and no usable selection; resolution stops here.
    Ambiguous,
    /// No config, invalid config, or nothing extracted; fall through.
    Missing,
}

/// Resolves versions for a repository.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    git: GitCli,
    config_file: String,
}

impl VersionResolver {
    /// Create a resolver for the repository rooted at `repo_root`, searching
    /// for project configs named `config_file`.
    pub fn new(repo_root: &std::path::Path, config_file: impl Into<String>) -> Self {
        Self {
            git: GitCli::new(repo_root),
            config_file: config_file.into(),
        }
    }

    /// Create a resolver for a session's repository.
    pub fn for_session(session: &Session, config_file: impl Into<String>) -> Self {
        Self::new(session.repo_root(), config_file)
    }

    /// Resolve the version for a session.
    ///
    /// Returns `None` only when a multi-project config applies and no
    /// project was selected, or when the repository has no commits.
    pub fn resolve(&self, session: &Session) -> Option<ResolvedVersion> {
        if let Some(context) = session.context_path() {
            match self.from_project_config(context, session.project_name()) {
                ConfigLookup::Found(version) => return Some(version),
                ConfigLookup::Ambiguous => {
                    tracing::debug!("Multi-project config without a selected project");
                    return None;
                }
                ConfigLookup::Missing => {}
            }
        }

        if let Some(tag) = self.exact_tag() {
            return Some(ResolvedVersion {
                value: tag,
                source: VersionSource::Tag,
            });
        }

        self.short_hash().map(|hash| ResolvedVersion {
            value: hash,
            source: VersionSource::Commit,
        })
    }

    fn from_project_config(
        &self,
        context: &std::path::Path,
        project_name: Option<&str>,
    ) -> ConfigLookup {
        let Some(loaded) = LoadedProjectConfig::discover(context, &self.config_file) else {
            return ConfigLookup::Missing;
        };

        let record = match loaded.config.select(project_name) {
            Selection::Record(record) => record,
            Selection::Ambiguous => return ConfigLookup::Ambiguous,
        };

        match record.extract_version(&loaded.dir) {
            Some(value) => ConfigLookup::Found(ResolvedVersion {
                value,
                source: VersionSource::ProjectConfig {
                    project_name: record.project_name.clone(),
                },
            }),
            None => {
                tracing::debug!(
                    "No version extracted for project '{}', falling back to git",
                    record.project_name
                );
                ConfigLookup::Missing
            }
        }
    }

    /// A tag pointing exactly at HEAD.
    pub fn exact_tag(&self) -> Option<String> {
        self.git.query(&["describe", "--tags", "--exact-match"])
    }

    /// The nearest tag reachable from HEAD.
    pub fn nearest_tag(&self) -> Option<String> {
        self.git.query(&["describe", "--tags", "--abbrev=0"])
    }

    /// The abbreviated HEAD commit hash.
    pub fn short_hash(&self) -> Option<String> {
        let short = format!("--short={}", SHORT_HASH_LEN);
        self.git.query(&["rev-parse", short.as_str(), "HEAD"])
    }

    /// Resolve the version and collect the context shown next to it.
    pub fn version_info(&self, session: &Session, head: &HeadState) -> VersionInfo {
        let version = self.resolve(session);

        let context = match &version {
            Some(ResolvedVersion {
                source: VersionSource::ProjectConfig { project_name },
                ..
            }) => Some(project_name.clone()),
            Some(ResolvedVersion {
                value,
                source: VersionSource::Commit,
            }) => self.nearest_tag().filter(|tag| tag != value),
            _ => None,
        };

        VersionInfo {
            version,
            context,
            branch: head.branch().map(str::to_string),
        }
    }
}

/// Version and branch lines appended to commit messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: Option<ResolvedVersion>,
    pub context: Option<String>,
    pub branch: Option<String>,
}

impl VersionInfo {
    /// The version text, `invalid` when unresolved.
    pub fn value(&self) -> &str {
        self.version
            .as_ref()
            .map_or(INVALID_VERSION, |v| v.value.as_str())
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "版本: {}", self.value())?;
        if let Some(context) = &self.context {
            write!(f, " ({})", context)?;
        }
        if let Some(branch) = &self.branch {
            write!(f, "\n分支: {}", branch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const CONFIG_FILE: &str = ".projectversion.json";

    fn init_repo() -> (TempDir, GitCli) {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path());
        git.run(&["init"]).unwrap();
        git.run(&["config", "user.email", "test@example.com"]).unwrap();
        git.run(&["config", "user.name", "Test User"]).unwrap();
        git.run(&["config", "commit.gpgsign", "false"]).unwrap();
        git.run(&["config", "tag.gpgsign", "false"]).unwrap();
        git.run(&["symbolic-ref", "HEAD", "refs/heads/master"]).unwrap();
        (dir, git)
    }

    fn commit(dir: &Path, git: &GitCli, file: &str, message: &str) {
        std::fs::write(dir.join(file), message).unwrap();
        git.run(&["add", file]).unwrap();
        git.run(&["commit", "-m", message]).unwrap();
    }

    fn write_single_config(dir: &Path) {
        std::fs::write(
            dir.join(CONFIG_FILE),
            r#"{"projectName": "web", "path": "package.json",
                "versionRegex": "\"version\"\\s*:\\s*\"([\\d.]+)\""}"#,
        )
        .unwrap();
        std::fs::write(dir.join("package.json"), r#"{"version": "1.2.3"}"#).unwrap();
    }

    fn write_multi_config(dir: &Path) {
        std::fs::write(
            dir.join(CONFIG_FILE),
            r#"{"config": [
                {"projectName": "api", "path": "api.txt", "versionRegex": "api=(\\S+)"},
                {"projectName": "web", "path": "web.txt", "versionRegex": "web=(\\S+)"}
            ]}"#,
        )
        .unwrap();
        std::fs::write(dir.join("api.txt"), "api=3.0.0").unwrap();
        std::fs::write(dir.join("web.txt"), "web=0.9.1").unwrap();
    }

    #[test]
    fn test_config_file_version() {
        let (dir, git) = init_repo();
        write_single_config(dir.path());
        commit(dir.path(), &git, "a.txt", "initial");

        let session = Session::new(dir.path()).with_context_path("package.json");
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        let version = resolver.resolve(&session).unwrap();

        assert_eq!(version.value, "1.2.3");
        assert_eq!(
            version.source,
            VersionSource::ProjectConfig {
                project_name: "web".to_string()
            }
        );
    }

    #[test]
    fn test_config_beats_exact_tag() {
        let (dir, git) = init_repo();
        write_single_config(dir.path());
        commit(dir.path(), &git, "a.txt", "initial");
        git.run(&["tag", "v9.9.9"]).unwrap();

        let session = Session::new(dir.path()).with_context_path(".");
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        assert_eq!(resolver.resolve(&session).unwrap().value, "1.2.3");
    }

    #[test]
    fn test_multi_config_without_project_is_absent() {
        let (dir, git) = init_repo();
        write_multi_config(dir.path());
        commit(dir.path(), &git, "a.txt", "initial");
        git.run(&["tag", "v1.0.0"]).unwrap();

        let session = Session::new(dir.path()).with_context_path(".");
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        assert_eq!(resolver.resolve(&session), None);

        let session = session.with_project_name("api");
        assert_eq!(resolver.resolve(&session).unwrap().value, "3.0.0");
    }

    #[test]
    fn test_exact_tag_when_no_config() {
        let (dir, git) = init_repo();
        commit(dir.path(), &git, "a.txt", "initial");
        git.run(&["tag", "-a", "v2.0.0", "-m", "Release v2.0.0"]).unwrap();

        let session = Session::new(dir.path()).with_context_path(".");
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        let version = resolver.resolve(&session).unwrap();
        assert_eq!(version.value, "v2.0.0");
        assert_eq!(version.source, VersionSource::Tag);
    }

    #[test]
    fn test_unmatched_pattern_falls_through_to_hash() {
        let (dir, git) = init_repo();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"projectName": "web", "path": "package.json", "versionRegex": "nomatch(\\d)"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        commit(dir.path(), &git, "a.txt", "initial");

        let session = Session::new(dir.path()).with_context_path(".");
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        let version = resolver.resolve(&session).unwrap();
        assert_eq!(version.source, VersionSource::Commit);
        assert_eq!(version.value.len(), SHORT_HASH_LEN);
        assert!(version.value.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_without_context_ignores_config() {
        let (dir, git) = init_repo();
        write_single_config(dir.path());
        commit(dir.path(), &git, "a.txt", "initial");

        let session = Session::new(dir.path());
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        assert_eq!(resolver.resolve(&session).unwrap().source, VersionSource::Commit);
    }

    #[test]
    fn test_version_info_for_config_source() {
        let (dir, git) = init_repo();
        write_single_config(dir.path());
        commit(dir.path(), &git, "a.txt", "initial");

        let session = Session::new(dir.path()).with_context_path(".");
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        let info = resolver.version_info(&session, &HeadState::Branch("develop".to_string()));
        assert_eq!(info.to_string(), "版本: 1.2.3 (web)\n分支: develop");
    }

    #[test]
    fn test_version_info_hash_with_nearest_tag() {
        let (dir, git) = init_repo();
        commit(dir.path(), &git, "a.txt", "initial");
        git.run(&["tag", "v1.0.0"]).unwrap();
        commit(dir.path(), &git, "b.txt", "second");

        let session = Session::new(dir.path());
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        let info = resolver.version_info(&session, &HeadState::Detached);

        let hash = resolver.short_hash().unwrap();
        assert_eq!(info.to_string(), format!("版本: {} (v1.0.0)", hash));
    }

    #[test]
    fn test_version_info_exact_tag_has_no_context() {
        let (dir, git) = init_repo();
        commit(dir.path(), &git, "a.txt", "initial");
        git.run(&["tag", "v1.0.0"]).unwrap();

        let session = Session::new(dir.path());
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        let info = resolver.version_info(&session, &HeadState::Branch("master".to_string()));
        assert_eq!(info.to_string(), "版本: v1.0.0\n分支: master");
    }

    #[test]
    fn test_version_info_invalid_when_ambiguous() {
        let (dir, git) = init_repo();
        write_multi_config(dir.path());
        commit(dir.path(), &git, "a.txt", "initial");

        let session = Session::new(dir.path()).with_context_path(".");
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        let info = resolver.version_info(&session, &HeadState::Branch("master".to_string()));
        assert_eq!(info.value(), INVALID_VERSION);
        assert_eq!(info.to_string(), "版本: invalid\n分支: master");
    }

    #[test]
    fn test_unborn_repository_has_no_version() {
        let (dir, _git) = init_repo();
        let session = Session::new(dir.path());
        let resolver = VersionResolver::for_session(&session, CONFIG_FILE);
        assert_eq!(resolver.resolve(&session), None);

        let info = resolver.version_info(&session, &HeadState::Unborn);
        assert_eq!(info.to_string(), "版本: invalid");
    }
}
