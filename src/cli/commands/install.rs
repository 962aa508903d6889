//! ct-skills install - Resolve an install set and hand it to the install tool

use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use super::version_label;
use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, emit_jsonl, robot_ok};
use crate::core::registry::SkillRegistry;
use crate::error::Result;
use crate::installer::InstallerClient;

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Skill to install along with its dependencies
    #[arg(conflicts_with = "profile")]
    pub skill: Option<String>,

    /// Profile to install (defaults to [install] default_profile)
    #[arg(long)]
    pub profile: Option<String>,

    /// Run the install tool instead of only printing the command
    #[arg(long)]
    pub exec: bool,
}

/// What the install set was resolved from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
enum InstallSource {
    Skill(String),
    Profile(String),
}

#[derive(Debug, Serialize)]
struct InstallPlan {
    source: InstallSource,
    /// Registered skills handed to the tool, in resolution order
    skills: Vec<String>,
    /// Resolved names absent from the registry
    skipped: Vec<String>,
    command: String,
    executed: bool,
}

pub fn run(ctx: &AppContext, args: &InstallArgs) -> Result<()> {
    let library = &ctx.library;

    let (source, resolved) = match &args.skill {
        Some(skill) => {
            library.require_skill(skill)?;
            (
                InstallSource::Skill(skill.clone()),
                library.resolve_dependency_tree([skill.as_str()]),
            )
        }
        None => {
            let profile = args
                .profile
                .clone()
                .unwrap_or_else(|| ctx.config.install.default_profile.clone());
            library.require_profile(&profile)?;
            let resolved = library.resolve_profile(&profile)?;
            (InstallSource::Profile(profile), resolved)
        }
    };

    let client = InstallerClient::from_config(&ctx.config.install);
    let mut plan = plan(library.registry(), &client, source, resolved);
    debug!(target: "install", skills = plan.skills.len(), skipped = plan.skipped.len(), tool = client.tool(), "install plan ready");

    if ctx.output_format == OutputFormat::Human {
        print_plan(library.registry(), &plan, client.tool());
    }

    if args.exec {
        info!(target: "install", command = %plan.command, "handing off to install tool");
        client.install(&plan.skills)?;
        plan.executed = true;
    }

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(&plan)),
        OutputFormat::Jsonl => emit_jsonl(&plan.skills),
        OutputFormat::Plain => {
            println!("{}", plan.command);
            Ok(())
        }
        OutputFormat::Human => Ok(()),
    }
}

fn plan(
    registry: &SkillRegistry,
    client: &InstallerClient,
    source: InstallSource,
    resolved: Vec<String>,
) -> InstallPlan {
    let (skills, skipped): (Vec<String>, Vec<String>) =
        resolved.into_iter().partition(|name| registry.contains(name));
    let command = client.command_line(&skills);
    InstallPlan {
        source,
        skills,
        skipped,
        command,
        executed: false,
    }
}

fn header(plan: &InstallPlan) -> String {
    let total = plan.skills.len() + plan.skipped.len();
    match &plan.source {
        InstallSource::Skill(skill) => format!(
            "Installing {skill} + {} dependencies...",
            total.saturating_sub(1)
        ),
        InstallSource::Profile(profile) => {
            format!("Installing profile '{profile}' ({total} skills)...")
        }
    }
}

fn print_plan(registry: &SkillRegistry, plan: &InstallPlan, tool: &str) {
    println!("{}", header(plan));
    for name in &plan.skills {
        if let Some(skill) = registry.get(name) {
            println!("  {name} {}", version_label(skill));
        }
    }
    for name in &plan.skipped {
        eprintln!("  SKIP: {name} (not found in registry)");
    }
    println!("\nInstall via {tool}:");
    println!("  {}", plan.command);
}
