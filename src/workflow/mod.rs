// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Branch-per-purpose workflow.
//!
//! Feature, release, hotfix and support branches are created from and
//! merged back into two trunk branches (stable and development). Every
//! operation is an ordered [`Pipeline`] of git commands.

mod classify;
mod config;
mod engine;
mod pipeline;

pub use classify::{classify, BranchRole};
pub use config::WorkflowConfig;
pub use engine::{parse_branch_listing, FinishOptions, WorkflowEngine};
pub use pipeline::{Pipeline, PipelineReport, Severity, Step, StepEvent, StepRecord, StepStatus};
