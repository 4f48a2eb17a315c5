// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Ordered sequences of git commands.
//!
//! Each step is either fatal (failure stops the pipeline) or advisory
//! (failure is logged and the pipeline continues). Nothing is rolled back:
//! after a fatal failure the repository stays where the failing command
//! left it.

use std::fmt;

use crate::error::{GfcError, GitError, Result, WorkflowError};
use crate::git::GitCli;

/// How a step failure is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Stops the pipeline.
    Fatal,
    /// Logged and ignored.
    Advisory,
}

/// One named git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    name: String,
    args: Vec<String>,
    severity: Severity,
}

impl Step {
    /// A step whose failure aborts the pipeline.
    pub fn fatal<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, args, Severity::Fatal)
    }

    /// A step whose failure is only reported.
    pub fn advisory<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, args, Severity::Advisory)
    }

    fn new<I, S>(name: impl Into<String>, args: I, severity: Severity) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            severity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The command as it would be typed.
    pub fn command_line(&self) -> String {
        format!("git {}", self.args.join(" "))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.command_line())
    }
}

/// What happened to a step that did not stop the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// The command succeeded.
    Done,
    /// An advisory command failed.
    Ignored { diagnostic: String },
}

/// A step together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
}

/// Progress notifications emitted while a pipeline runs.
#[derive(Debug)]
pub enum StepEvent<'a> {
    Started(&'a Step),
    Finished(&'a StepRecord),
}

/// Outcome of a pipeline that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub records: Vec<StepRecord>,
}

impl PipelineReport {
    /// Names of steps whose command succeeded.
    pub fn completed(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.status == StepStatus::Done)
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Advisory failures, as (step name, diagnostic).
    pub fn warnings(&self) -> Vec<(&str, &str)> {
        self.records
            .iter()
            .filter_map(|r| match &r.status {
                StepStatus::Ignored { diagnostic } => Some((r.name.as_str(), diagnostic.as_str())),
                StepStatus::Done => None,
            })
            .collect()
    }
}

/// A named, ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    name: String,
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a step when `condition` holds.
    pub fn step_if(self, condition: bool, step: Step) -> Self {
        if condition {
            self.step(step)
        } else {
            self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order.
    pub fn run(&self, git: &GitCli) -> Result<PipelineReport> {
        self.run_observed(git, |_| {})
    }

    /// Run every step in order, reporting progress to `observer`.
    pub fn run_observed<F>(&self, git: &GitCli, mut observer: F) -> Result<PipelineReport>
    where
        F: FnMut(StepEvent<'_>),
    {
        tracing::debug!("Running pipeline '{}' ({} steps)", self.name, self.steps.len());

        let mut report = PipelineReport::default();
        let mut last_completed: Option<String> = None;

        for step in &self.steps {
            observer(StepEvent::Started(step));

            let args: Vec<&str> = step.args.iter().map(String::as_str).collect();
            let status = match git.run(&args) {
                Ok(_) => {
                    last_completed = Some(step.name.clone());
                    StepStatus::Done
                }
                Err(err) => {
                    let diagnostic = failure_text(err);
                    match step.severity {
                        Severity::Advisory => {
                            tracing::warn!("{} failed, continuing: {}", step.name, diagnostic);
                            StepStatus::Ignored { diagnostic }
                        }
                        Severity::Fatal => {
                            tracing::debug!("{} failed, stopping '{}'", step.name, self.name);
                            return Err(GfcError::Workflow(WorkflowError::StepFailed {
                                step: step.name.clone(),
                                last_completed,
                                diagnostic,
                            }));
                        }
                    }
                }
            };

            report.records.push(StepRecord {
                name: step.name.clone(),
                status,
            });
            if let Some(record) = report.records.last() {
                observer(StepEvent::Finished(record));
            }
        }

        Ok(report)
    }
}

fn failure_text(err: GfcError) -> String {
    match err {
        GfcError::Git(GitError::CommandFailed { message, .. }) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitCli) {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path());
        git.run(&["init"]).unwrap();
        (dir, git)
    }

    #[test]
    fn test_step_command_line() {
        let step = Step::fatal("checkout develop", ["checkout", "develop"]);
        assert_eq!(step.command_line(), "git checkout develop");
        assert_eq!(step.severity(), Severity::Fatal);
        assert_eq!(
            step.to_string(),
            "checkout develop (git checkout develop)"
        );
    }

    #[test]
    fn test_step_if() {
        let pipeline = Pipeline::new("p")
            .step_if(false, Step::fatal("skipped", ["status"]))
            .step_if(true, Step::fatal("kept", ["status"]));
        assert_eq!(pipeline.steps().len(), 1);
        assert_eq!(pipeline.steps()[0].name(), "kept");
    }

    #[test]
    fn test_advisory_failure_is_ignored() {
        let (_dir, git) = init_repo();
        let pipeline = Pipeline::new("p")
            .step(Step::advisory("bogus", ["not-a-git-command"]))
            .step(Step::fatal("set key", ["config", "gfc.test", "1"]));

        let report = pipeline.run(&git).unwrap();
        assert_eq!(report.completed(), vec!["set key"]);
        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.warnings()[0].0, "bogus");
        assert_eq!(git.run(&["config", "--get", "gfc.test"]).unwrap(), "1");
    }

    #[test]
    fn test_fatal_failure_stops_and_names_last_completed() {
        let (_dir, git) = init_repo();
        let pipeline = Pipeline::new("p")
            .step(Step::fatal("set a", ["config", "gfc.a", "1"]))
            .step(Step::fatal("checkout missing", ["checkout", "missing-branch"]))
            .step(Step::fatal("set b", ["config", "gfc.b", "1"]));

        let err = pipeline.run(&git).unwrap_err();
        match err {
            GfcError::Workflow(WorkflowError::StepFailed {
                step,
                last_completed,
                diagnostic,
            }) => {
                assert_eq!(step, "checkout missing");
                assert_eq!(last_completed.as_deref(), Some("set a"));
                assert!(!diagnostic.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }

        // Earlier steps stay applied, later steps never ran.
        assert!(git.query(&["config", "--get", "gfc.a"]).is_some());
        assert!(git.query(&["config", "--get", "gfc.b"]).is_none());
    }

    #[test]
    fn test_observer_sees_every_step() {
        let (_dir, git) = init_repo();
        let pipeline = Pipeline::new("p")
            .step(Step::fatal("one", ["status"]))
            .step(Step::advisory("two", ["not-a-git-command"]));

        let mut started = Vec::new();
        let mut finished = Vec::new();
        pipeline
            .run_observed(&git, |event| match event {
                StepEvent::Started(step) => started.push(step.name().to_string()),
                StepEvent::Finished(record) => finished.push(record.status.clone()),
            })
            .unwrap();

        assert_eq!(started, vec!["one", "two"]);
        assert_eq!(finished[0], StepStatus::Done);
        assert!(matches!(finished[1], StepStatus::Ignored { .. }));
    }
}
