// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::workflow::BranchRole;

/// gfc - commit message templates and branch workflow for Git
#[derive(Parser, Debug)]
#[command(name = "gfc")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit message templates and branch workflow helper", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to commit if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Stage all changes before committing
    #[arg(short, long, global = true)]
    pub all: bool,

    /// Show what would be done without actually doing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Disable all interactive prompts
    #[arg(long, global = true, env = "GFC_NON_INTERACTIVE")]
    pub non_interactive: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build a commit message from a template (default command)
    Commit(CommitArgs),

    /// Show the version and branch lines appended to commit messages
    Version(VersionArgs),

    /// Branch workflow: init, start and finish feature/release/hotfix branches
    Flow(FlowArgs),

    /// List configured commit templates
    Templates,

    /// Initialize gfc configuration
    Init(InitArgs),

    /// Print build information
    About,
}

/// Arguments for the commit command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CommitArgs {
    /// Pre-fill the commit type
    #[arg(short = 't', long)]
    pub r#type: Option<String>,

    /// Override the icon picked from the commit type
    #[arg(short, long)]
    pub icon: Option<String>,

    /// Pre-fill the scope
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Pre-fill the subject
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    /// Pre-fill the body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Pre-fill the footer
    #[arg(short, long)]
    pub footer: Option<String>,

    /// Template to render with
    #[arg(long)]
    pub template: Option<String>,

    /// File or directory the version lookup starts from (default: current directory)
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Project to take the version from in a multi-project version config
    #[arg(short, long)]
    pub project: Option<String>,

    /// Do not append version and branch lines
    #[arg(long)]
    pub no_version: bool,

    /// Print the message instead of committing
    #[arg(long)]
    pub print: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the version command.
#[derive(Parser, Debug, Default, Clone)]
pub struct VersionArgs {
    /// File or directory the version lookup starts from (default: current directory)
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Project to take the version from in a multi-project version config
    #[arg(short, long)]
    pub project: Option<String>,
}

/// Arguments for the flow command.
#[derive(Parser, Debug, Clone)]
pub struct FlowArgs {
    /// Workflow action to perform
    #[command(subcommand)]
    pub action: FlowAction,
}

/// Workflow actions.
#[derive(Subcommand, Debug, Clone)]
pub enum FlowAction {
    /// Store branch names and prefixes and create the development branch
    Init(FlowInitArgs),

    /// Show workflow settings and branches
    Status,

    /// List local branches of a role
    List {
        /// feature, release, hotfix, support or none
        role: BranchRole,
    },

    /// Create a workflow branch
    Start {
        /// feature, release, hotfix or support
        role: BranchRole,

        /// Feature name or version
        name: String,

        /// Start point for support branches (default: stable branch)
        #[arg(long)]
        base: Option<String>,
    },

    /// Merge a workflow branch back into its trunk branches
    Finish {
        /// feature, release or hotfix
        role: BranchRole,

        /// Feature name or version (default: the current branch, or a prompt)
        name: Option<String>,

        /// Keep the branch after merging
        #[arg(short, long)]
        keep: bool,

        /// Tag message for releases and hotfixes
        #[arg(short, long)]
        message: Option<String>,
    },
}

/// Arguments for `flow init`.
#[derive(Parser, Debug, Default, Clone)]
pub struct FlowInitArgs {
    /// Accept defaults without prompting
    #[arg(long)]
    pub defaults: bool,

    /// Stable branch name
    #[arg(long)]
    pub master: Option<String>,

    /// Development branch name
    #[arg(long)]
    pub develop: Option<String>,

    /// Feature branch prefix
    #[arg(long)]
    pub feature: Option<String>,

    /// Release branch prefix
    #[arg(long)]
    pub release: Option<String>,

    /// Hotfix branch prefix
    #[arg(long)]
    pub hotfix: Option<String>,

    /// Support branch prefix
    #[arg(long)]
    pub support: Option<String>,

    /// Version tag prefix
    #[arg(long)]
    pub version_tag: Option<String>,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Configuration preset
    #[arg(long)]
    pub preset: Option<ConfigPreset>,
}

/// Configuration presets for init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigPreset {
    /// Minimal configuration
    Minimal,
    /// Standard configuration (recommended)
    Standard,
    /// Full configuration with all options
    Full,
}

impl Cli {
    /// Get the effective command, defaulting to Commit if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Commit(CommitArgs::default()))
    }
}
