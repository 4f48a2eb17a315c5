// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Start and finish operations for workflow branches.

use crate::error::{GfcError, Result, WorkflowError};
use crate::git::GitCli;

use super::classify::{classify, BranchRole};
use super::config::WorkflowConfig;
use super::pipeline::{Pipeline, PipelineReport, Step};

/// Options for finishing a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinishOptions {
    /// Keep the local branch after merging.
    pub keep_branch: bool,
    /// Tag message for releases and hotfixes.
    pub tag_message: Option<String>,
}

impl FinishOptions {
    pub fn keep_branch(mut self, keep: bool) -> Self {
        self.keep_branch = keep;
        self
    }

    pub fn tag_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.tag_message = if message.trim().is_empty() {
            None
        } else {
            Some(message)
        };
        self
    }
}

/// Runs branch workflow operations against one repository.
#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    git: GitCli,
    config: WorkflowConfig,
}

impl WorkflowEngine {
    /// Create an engine for the repository at `git`'s root, reading the
    /// stored settings (or defaults when none are stored).
    pub fn new(git: GitCli) -> Self {
        let config = WorkflowConfig::load(&git);
        Self { git, config }
    }

    /// The settings this engine works with.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// The underlying command runner.
    pub fn git(&self) -> &GitCli {
        &self.git
    }

    /// Whether `initialize` has been run in this repository.
    pub fn is_initialized(&self) -> bool {
        WorkflowConfig::is_initialized(&self.git)
    }

    /// The current branch, `None` when HEAD is detached.
    pub fn current_branch(&self) -> Option<String> {
        self.git.query(&["symbolic-ref", "--short", "-q", "HEAD"])
    }

    /// Role of the checked-out branch.
    pub fn current_branch_role(&self) -> BranchRole {
        self.current_branch()
            .map_or(BranchRole::None, |branch| classify(&branch, &self.config))
    }

    /// Local branches with the given role.
    ///
    /// For prefixed roles the prefix is stripped, leaving the name or
    /// version that `finish` expects. For `BranchRole::None` the full names
    /// of all unprefixed branches are returned.
    pub fn list_branches(&self, role: BranchRole) -> Result<Vec<String>> {
        let listing = self.git.run(&["branch", "--list"])?;

        Ok(parse_branch_listing(&listing)
            .into_iter()
            .filter(|name| classify(name, &self.config) == role)
            .map(|name| match self.config.prefix(role) {
                Some(prefix) => name[prefix.len()..].to_string(),
                None => name,
            })
            .collect())
    }

    fn branch_exists(&self, branch: &str) -> bool {
        let reference = format!("refs/heads/{}", branch);
        self.git
            .succeeds(&["rev-parse", "--verify", "--quiet", reference.as_str()])
    }

    fn require_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(GfcError::Workflow(WorkflowError::NotInitialized))
        }
    }

    fn validate_branch(&self, what: &str, value: &str, branch: &str) -> Result<()> {
        let valid = !value.trim().is_empty()
            && self
                .git
                .succeeds(&["check-ref-format", "--branch", branch]);
        if valid {
            Ok(())
        } else {
            Err(GfcError::Workflow(WorkflowError::InvalidName {
                what: what.to_string(),
                value: value.to_string(),
            }))
        }
    }

    // ---- initialize ----------------------------------------------------

    /// Steps that store `config` and create its development branch.
    pub fn plan_initialize(&self, config: &WorkflowConfig) -> Result<Pipeline> {
        self.validate_branch("stable branch", &config.master, &config.master)?;
        self.validate_branch("development branch", &config.develop, &config.develop)?;

        let mut pipeline = Pipeline::new("initialize");
        for (key, value) in config.entries() {
            pipeline = pipeline.step(Step::fatal(
                format!("set {}", key),
                ["config", key, value],
            ));
        }

        Ok(pipeline.step_if(
            !self.branch_exists(&config.develop),
            Step::fatal(
                format!("create {}", config.develop),
                ["branch", config.develop.as_str()],
            ),
        ))
    }

    /// Store `config` in the repository and make sure its development
    /// branch exists. Re-running overwrites earlier settings.
    pub fn initialize(&mut self, config: WorkflowConfig) -> Result<PipelineReport> {
        let report = self.plan_initialize(&config)?.run(&self.git)?;
        self.config = config;
        Ok(report)
    }

    // ---- start ---------------------------------------------------------

    /// Steps that create a workflow branch.
    ///
    /// `base` only applies to support branches and defaults to the stable
    /// branch.
    pub fn plan_start(&self, role: BranchRole, name: &str, base: Option<&str>) -> Result<Pipeline> {
        let Some(branch) = self.config.branch_name(role, name) else {
            return Err(unsupported(role, "started"));
        };

        match role {
            BranchRole::Feature | BranchRole::Release => self.require_initialized()?,
            _ => {}
        }
        self.validate_branch(&format!("{} name", role), name, &branch)?;

        let pipeline = Pipeline::new(format!("start {}", branch));

        if role == BranchRole::Support {
            let base = base.unwrap_or(self.config.master.as_str());
            return Ok(pipeline.step(Step::fatal(
                format!("create {} from {}", branch, base),
                ["checkout", "-b", branch.as_str(), base],
            )));
        }

        let source = if role == BranchRole::Hotfix {
            &self.config.master
        } else {
            &self.config.develop
        };

        Ok(pipeline
            .step(checkout(source))
            .step(pull(source))
            .step(Step::fatal(
                format!("create {}", branch),
                ["checkout", "-b", branch.as_str()],
            )))
    }

    /// Create and switch to a workflow branch.
    pub fn start(&self, role: BranchRole, name: &str, base: Option<&str>) -> Result<PipelineReport> {
        self.plan_start(role, name, base)?.run(&self.git)
    }

    pub fn start_feature(&self, name: &str) -> Result<PipelineReport> {
        self.start(BranchRole::Feature, name, None)
    }

    pub fn start_release(&self, version: &str) -> Result<PipelineReport> {
        self.start(BranchRole::Release, version, None)
    }

    pub fn start_hotfix(&self, version: &str) -> Result<PipelineReport> {
        self.start(BranchRole::Hotfix, version, None)
    }

    pub fn start_support(&self, version: &str, base: Option<&str>) -> Result<PipelineReport> {
        self.start(BranchRole::Support, version, base)
    }

    // ---- finish --------------------------------------------------------

    /// Steps that merge a workflow branch back and clean up.
    pub fn plan_finish(&self, role: BranchRole, name: &str, options: &FinishOptions) -> Result<Pipeline> {
        let branch = match role {
            BranchRole::Feature | BranchRole::Release | BranchRole::Hotfix => {
                self.config.branch_name(role, name)
            }
            BranchRole::Support | BranchRole::None => None,
        }
        .ok_or_else(|| unsupported(role, "finished"))?;

        self.require_initialized()?;
        self.validate_branch(&format!("{} name", role), name, &branch)?;

        let develop = self.config.develop.as_str();
        let master = self.config.master.as_str();
        let mut pipeline = Pipeline::new(format!("finish {}", branch));

        if role != BranchRole::Feature {
            let tag = self.config.tag_name(name);
            let message = options.tag_message.clone().unwrap_or_else(|| {
                let kind = if role == BranchRole::Release { "Release" } else { "Hotfix" };
                format!("{} {}", kind, name)
            });

            pipeline = pipeline
                .step(checkout(master))
                .step(pull(master))
                .step(merge(&branch, master))
                .step(Step::fatal(
                    format!("tag {}", tag),
                    ["tag", "-a", tag.as_str(), "-m", message.as_str()],
                ));
        }

        Ok(pipeline
            .step(checkout(develop))
            .step(pull(develop))
            .step(merge(&branch, develop))
            .step_if(
                !options.keep_branch,
                Step::fatal(format!("delete {}", branch), ["branch", "-d", branch.as_str()]),
            ))
    }

    /// Merge a workflow branch back into its trunk branches.
    pub fn finish(&self, role: BranchRole, name: &str, options: &FinishOptions) -> Result<PipelineReport> {
        self.plan_finish(role, name, options)?.run(&self.git)
    }

    pub fn finish_feature(&self, name: &str, keep_branch: bool) -> Result<PipelineReport> {
        self.finish(
            BranchRole::Feature,
            name,
            &FinishOptions::default().keep_branch(keep_branch),
        )
    }

    pub fn finish_release(
        &self,
        version: &str,
        keep_branch: bool,
        tag_message: Option<&str>,
    ) -> Result<PipelineReport> {
        let mut options = FinishOptions::default().keep_branch(keep_branch);
        if let Some(message) = tag_message {
            options = options.tag_message(message);
        }
        self.finish(BranchRole::Release, version, &options)
    }

    pub fn finish_hotfix(
        &self,
        version: &str,
        keep_branch: bool,
        tag_message: Option<&str>,
    ) -> Result<PipelineReport> {
        let mut options = FinishOptions::default().keep_branch(keep_branch);
        if let Some(message) = tag_message {
            options = options.tag_message(message);
        }
        self.finish(BranchRole::Hotfix, version, &options)
    }
}

fn checkout(branch: &str) -> Step {
    Step::fatal(format!("checkout {}", branch), ["checkout", branch])
}

fn pull(branch: &str) -> Step {
    Step::advisory(format!("pull {}", branch), ["pull", "--no-edit"])
}

fn merge(branch: &str, into: &str) -> Step {
    Step::fatal(
        format!("merge {} into {}", branch, into),
        ["merge", "--no-ff", "--no-edit", branch],
    )
}

fn unsupported(role: BranchRole, action: &str) -> GfcError {
    GfcError::Workflow(WorkflowError::Unsupported {
        role: role.to_string(),
        action: action.to_string(),
    })
}

/// Branch names from `git branch` output.
///
/// Drops the current-branch and worktree markers, detached-HEAD entries,
/// symbolic refs, and `remotes/<remote>/` decoration.
pub fn parse_branch_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(|line| line.trim_start_matches(['*', '+']).trim())
        .filter(|line| !line.is_empty() && !line.starts_with('(') && !line.contains(" -> "))
        .map(|line| match line.strip_prefix("remotes/") {
            Some(rest) => rest.split_once('/').map_or(rest, |(_, name)| name),
            None => line,
        })
        .map(str::to_string)
        .collect()
}
