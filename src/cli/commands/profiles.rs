//! ct-skills profiles - List install profiles

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::core::profile::ProfileDefinition;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ProfilesArgs {
    /// Also list the resolved skills of each profile
    #[arg(long)]
    pub skills: bool,
}

#[derive(Debug, Serialize)]
struct ProfileSummary {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    extends: Option<String>,
    /// Size of the resolved install set
    skill_count: usize,
    skills: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &ProfilesArgs) -> Result<()> {
    let library = &ctx.library;
    let mut summaries = Vec::new();
    for name in library.profiles().list_profiles()? {
        let definition = library.require_profile(&name)?;
        let skills = library.resolve_profile(&name)?;
        summaries.push(summarize(name, definition, skills));
    }
    debug!(target: "profiles", count = summaries.len(), "listing profiles");

    if emit_machine(ctx.output_format, &summaries)? {
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Plain {
        for summary in &summaries {
            println!(
                "{}\t{}\t{}",
                summary.name,
                summary.skill_count,
                summary.extends.as_deref().unwrap_or("-")
            );
        }
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    for summary in &summaries {
        println!("{}", header_line(summary));
        if !summary.description.is_empty() {
            println!("    {}", summary.description);
        }
        if args.skills {
            for skill in &summary.skills {
                println!("      - {skill}");
            }
        }
    }
    Ok(())
}

/// Profiles are keyed by file name; the `name` field inside is informational.
fn summarize(name: String, definition: ProfileDefinition, skills: Vec<String>) -> ProfileSummary {
    ProfileSummary {
        name,
        description: definition.description,
        extends: definition.extends.filter(|parent| !parent.is_empty()),
        skill_count: skills.len(),
        skills,
    }
}

fn header_line(summary: &ProfileSummary) -> String {
    let extends = summary
        .extends
        .as_deref()
        .map(|parent| format!(" (extends: {parent})"))
        .unwrap_or_default();
    format!("  {:15} {} skills{extends}", summary.name, summary.skill_count)
}
