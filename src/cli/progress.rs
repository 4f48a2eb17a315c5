// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Terminal rendering of workflow pipelines.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::git::GitCli;
use crate::workflow::{Pipeline, PipelineReport, StepEvent, StepStatus};

/// Print the commands a pipeline would run.
pub fn print_plan(pipeline: &Pipeline) {
    println!(
        "{} {} ({} steps)",
        style("Plan:").bold(),
        pipeline.name(),
        pipeline.steps().len()
    );
    for (index, step) in pipeline.steps().iter().enumerate() {
        println!(
            "  {}. {} {}",
            index + 1,
            step.name(),
            style(step.command_line()).dim()
        );
    }
}

/// Run a pipeline behind a spinner, printing one line per finished step.
pub fn run_with_progress(pipeline: &Pipeline, git: &GitCli) -> Result<PipelineReport> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = pipeline.run_observed(git, |event| match event {
        StepEvent::Started(step) => spinner.set_message(step.command_line()),
        StepEvent::Finished(record) => match &record.status {
            StepStatus::Done => {
                spinner.println(format!("{} {}", style("✓").green(), record.name));
            }
            StepStatus::Ignored { diagnostic } => {
                spinner.println(format!(
                    "{} {} {}",
                    style("⚠").yellow(),
                    record.name,
                    style(format!("(ignored: {})", first_line(diagnostic))).dim()
                ));
            }
        },
    });

    spinner.finish_and_clear();
    result
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
