// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::path::{Path, PathBuf};

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::commit::{CommitFields, Placeholder};
use crate::config::GfcConfig;
use crate::error::{ConfigError, GfcError, Result, ResultExt, WorkflowError};
use crate::git::Repository;
use crate::session::Session;
use crate::workflow::{BranchRole, FinishOptions, WorkflowConfig, WorkflowEngine};

use super::args::{Cli, Commands, CommitArgs, FlowAction, FlowInitArgs, InitArgs, VersionArgs};
use super::progress::{print_plan, run_with_progress};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        GfcConfig::load_from(config_path)?
    } else {
        GfcConfig::load()?
    };

    if !config.ui.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // Dispatch to the appropriate command handler
    match cli.effective_command() {
        Commands::Commit(args) => run_commit(&cli, &config, args),
        Commands::Version(args) => run_version(&config, args),
        Commands::Flow(args) => run_flow(&cli, &config, args.action),
        Commands::Templates => run_templates(&config),
        Commands::Init(args) => run_init(args),
        Commands::About => run_about(),
    }
}

/// Build the per-invocation session from the repository and context flags.
fn open_session(context: Option<PathBuf>, project: Option<String>) -> Result<(Repository, Session)> {
    let repo = Repository::open_current()?;

    let cwd = std::env::current_dir()?;
    let context = match context {
        Some(path) => cwd.join(path),
        None => cwd,
    };

    let mut session = Session::new(repo.workdir()).with_context_path(context);
    if let Some(project) = project {
        session = session.with_project_name(project);
    }

    Ok((repo, session))
}

/// Run the commit command.
fn run_commit(cli: &Cli, config: &GfcConfig, args: CommitArgs) -> Result<()> {
    use crate::commit::CommitBuilder;

    tracing::debug!("Running commit command with args: {:?}", args);

    let (repo, session) = open_session(args.context.clone(), args.project.clone())?;
    let mut builder = CommitBuilder::new(config.clone(), session);

    // Pre-fill values from arguments
    if let Some(ref t) = args.r#type {
        builder = builder.with_type(t);
    }
    if let Some(ref icon) = args.icon {
        builder = builder.with_icon(icon);
    }
    if let Some(ref scope) = args.scope {
        builder = builder.with_scope(scope);
    }
    if let Some(ref message) = args.message {
        builder = builder.with_subject(message);
    }
    if let Some(ref body) = args.body {
        builder = builder.with_body(body);
    }
    if let Some(ref footer) = args.footer {
        builder = builder.with_footer(footer);
    }
    if let Some(ref template) = args.template {
        builder = builder.with_template(template)?;
    }
    if args.no_version {
        builder = builder.with_version_info(false);
    }

    let print_only = args.print || cli.dry_run;

    // Stage all if requested
    if cli.all && !print_only {
        repo.cli().run(&["add", "--all"])?;
    }

    if cli.non_interactive {
        builder.commit_non_interactive(print_only)
    } else {
        builder.run_interactive(print_only, args.yes)
    }
}

/// Run the version command.
fn run_version(config: &GfcConfig, args: VersionArgs) -> Result<()> {
    use crate::version::VersionResolver;

    let (repo, session) = open_session(args.context, args.project)?;
    let resolver = VersionResolver::for_session(&session, &config.version.config_file);
    let info = resolver.version_info(&session, &repo.head_state()?);

    println!("{}", info);
    if let Some(resolved) = &info.version {
        tracing::debug!("Version {} resolved from {:?}", resolved.value, resolved.source);
    }

    Ok(())
}

/// Run a workflow action.
fn run_flow(cli: &Cli, config: &GfcConfig, action: FlowAction) -> Result<()> {
    let repo = Repository::open_current()?;
    let engine = WorkflowEngine::new(repo.cli());

    tracing::debug!("Running flow action: {:?}", action);

    match action {
        FlowAction::Init(args) => flow_init(cli, config, engine, args),
        FlowAction::Status => flow_status(&repo, &engine),
        FlowAction::List { role } => {
            for name in engine.list_branches(role)? {
                println!("{}", name);
            }
            Ok(())
        }
        FlowAction::Start { role, name, base } => {
            let pipeline = engine.plan_start(role, &name, base.as_deref())?;
            if cli.dry_run {
                print_plan(&pipeline);
                return Ok(());
            }

            let report = run_with_progress(&pipeline, engine.git())?;
            report_warnings(report.warnings());
            if let Some(branch) = engine.config().branch_name(role, &name) {
                println!("{} Switched to {}", style("✓").green(), style(branch).cyan());
            }
            print_hint(config, &format!("finish it with `gfc flow finish {} {}`", role, name));
            Ok(())
        }
        FlowAction::Finish {
            role,
            name,
            keep,
            message,
        } => {
            let name = match name {
                Some(name) => name,
                None => pick_branch(cli, &engine, role)?,
            };

            let mut options = FinishOptions::default().keep_branch(keep);
            if let Some(message) = message {
                options = options.tag_message(message);
            }

            let pipeline = engine.plan_finish(role, &name, &options)?;
            if cli.dry_run {
                if let Some(branch) = engine.config().branch_name(role, &name) {
                    if !repo.has_local_branch(&branch) {
                        tracing::warn!("{} does not exist yet", branch);
                    }
                }
                print_plan(&pipeline);
                return Ok(());
            }

            let report = run_with_progress(&pipeline, engine.git())?;
            report_warnings(report.warnings());
            println!("{} Finished {} {}", style("✓").green(), role, style(&name).cyan());
            Ok(())
        }
    }
}

/// Store workflow settings, prompting for each unless told otherwise.
fn flow_init(cli: &Cli, config: &GfcConfig, engine: WorkflowEngine, args: FlowInitArgs) -> Result<()> {
    let mut settings = if engine.is_initialized() {
        engine.config().clone()
    } else {
        config.workflow.clone()
    };

    apply_overrides(&mut settings, &args);

    if !args.defaults && !cli.non_interactive {
        settings = prompt_workflow_config(settings)?;
    }

    let pipeline = engine.plan_initialize(&settings)?;
    if cli.dry_run {
        print_plan(&pipeline);
        return Ok(());
    }

    run_with_progress(&pipeline, engine.git())?;
    println!(
        "{} Workflow initialized ({} / {})",
        style("✓").green(),
        settings.master,
        settings.develop
    );
    Ok(())
}

fn apply_overrides(settings: &mut WorkflowConfig, args: &FlowInitArgs) {
    let overrides = [
        (&mut settings.master, &args.master),
        (&mut settings.develop, &args.develop),
        (&mut settings.feature, &args.feature),
        (&mut settings.release, &args.release),
        (&mut settings.hotfix, &args.hotfix),
        (&mut settings.support, &args.support),
        (&mut settings.version_tag, &args.version_tag),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value.clone();
        }
    }
}

fn prompt_workflow_config(defaults: WorkflowConfig) -> Result<WorkflowConfig> {
    let theme = ColorfulTheme::default();
    let ask = |prompt: &str, default: String| -> Result<String> {
        Ok(Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .default(default)
            .allow_empty(true)
            .interact_text()?)
    };

    Ok(WorkflowConfig {
        master: ask("Branch for production releases", defaults.master)?,
        develop: ask("Branch for next release development", defaults.develop)?,
        feature: ask("Feature branch prefix", defaults.feature)?,
        release: ask("Release branch prefix", defaults.release)?,
        hotfix: ask("Hotfix branch prefix", defaults.hotfix)?,
        support: ask("Support branch prefix", defaults.support)?,
        version_tag: ask("Version tag prefix", defaults.version_tag)?,
    })
}

fn flow_status(repo: &Repository, engine: &WorkflowEngine) -> Result<()> {
    if !engine.is_initialized() {
        println!("{} Workflow not initialized, run `gfc flow init`", style("!").yellow());
        return Ok(());
    }

    let settings = engine.config();
    match repo.branch_name() {
        Ok(branch) => println!(
            "On {} ({})",
            style(&branch).cyan(),
            engine.current_branch_role()
        ),
        Err(_) => println!("No branch checked out"),
    }

    println!();
    for (key, value) in settings.entries() {
        println!("  {:<28} {}", key, value);
    }

    println!();
    for role in [
        BranchRole::Feature,
        BranchRole::Release,
        BranchRole::Hotfix,
        BranchRole::Support,
    ] {
        let branches = engine.list_branches(role)?;
        if branches.is_empty() {
            continue;
        }
        println!("{}:", style(role).bold());
        for name in branches {
            println!("  {}", name);
        }
    }

    Ok(())
}

/// Name of the branch to finish when none was given.
fn pick_branch(cli: &Cli, engine: &WorkflowEngine, role: BranchRole) -> Result<String> {
    if engine.current_branch_role() == role {
        if let Some(prefix) = engine.config().prefix(role) {
            if let Some(branch) = engine.current_branch() {
                return Ok(branch[prefix.len()..].to_string());
            }
        }
    }

    let candidates = engine.list_branches(role)?;
    if candidates.is_empty() || cli.non_interactive {
        return Err(GfcError::Workflow(WorkflowError::NoBranchSelected {
            role: role.to_string(),
        }));
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Which {} to finish?", role))
        .items(&candidates)
        .default(0)
        .interact_opt()?;

    match selection {
        Some(index) => Ok(candidates[index].clone()),
        None => Err(GfcError::Cancelled),
    }
}

fn report_warnings(warnings: Vec<(&str, &str)>) {
    for (step, diagnostic) in warnings {
        tracing::warn!("{} skipped: {}", step, diagnostic);
    }
}

fn print_hint(config: &GfcConfig, hint: &str) {
    if config.ui.hints {
        println!("{} {}", style("hint:").dim(), style(hint).dim());
    }
}

/// List configured templates with a sample render.
fn run_templates(config: &GfcConfig) -> Result<()> {
    let sample = CommitFields::new("describe the change").with_scope("core");
    let sample = match config.commit.kind("feat") {
        Some(kind) => sample.with_kind(kind),
        None => sample.with_type("feat"),
    };

    for template in &config.commit.templates {
        let marker = if template.name == config.commit.default_template {
            style("*").green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {}", marker, style(&template.name).bold());
        println!("    {}", style(&template.content).dim());
        println!("    uses: {}", tokens(&template.placeholders()));
        for line in template.render(&sample, config.commit.emoji).lines() {
            println!("    │ {}", line);
        }
    }

    println!();
    println!("Placeholders: {}", tokens(Placeholder::all()));

    Ok(())
}

fn tokens(placeholders: &[Placeholder]) -> String {
    placeholders
        .iter()
        .map(Placeholder::token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print build information.
fn run_about() -> Result<()> {
    println!("gfc {}", crate::build_info::version_string());

    if let Some(sha) = crate::build_info::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::build_info::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use super::args::ConfigPreset;
    use crate::config::default::{example_config, minimal_config, standard_config};

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("gfc.toml");

    if config_path.exists() && !args.force {
        return Err(GfcError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    let config_content = match args.preset {
        Some(ConfigPreset::Minimal) => minimal_config(),
        Some(ConfigPreset::Standard) => standard_config(),
        Some(ConfigPreset::Full) | None => example_config(),
    };

    std::fs::write(config_path, config_content).context("Failed to write gfc.toml")?;

    println!("✓ Created gfc.toml");

    Ok(())
}
