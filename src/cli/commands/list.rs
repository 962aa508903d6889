//! ct-skills list - List skills from the index

use clap::Args;
use tracing::debug;

use super::{or_dash, version_label};
use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::core::registry::SkillQuery;
use crate::core::skill::{SkillCategory, SkillRecord};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only skills marked core
    #[arg(long)]
    pub core: bool,

    /// Only skills in this category
    #[arg(long, value_enum)]
    pub category: Option<SkillCategory>,

    /// Only skills selected by this profile (with dependencies)
    #[arg(long)]
    pub profile: Option<String>,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let library = &ctx.library;

    let names = match &args.profile {
        Some(profile) => {
            library.require_profile(profile)?;
            Some(library.resolve_profile(profile)?)
        }
        None => None,
    };

    let query = SkillQuery {
        core_only: args.core,
        category: args.category,
        names,
    };
    let skills = library.registry().search(&query);
    debug!(target: "list", count = skills.len(), core = args.core, category = ?args.category, profile = ?args.profile, "listing skills");

    if emit_machine(ctx.output_format, &skills)? {
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Plain {
        for skill in &skills {
            println!("{}", plain_row(skill));
        }
        return Ok(());
    }

    if skills.is_empty() {
        println!("No skills match the given filters.");
        return Ok(());
    }

    let width = skills.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for skill in &skills {
        println!("{}", human_row(skill, width));
    }
    println!("\n{} skill(s)", skills.len());
    Ok(())
}

fn human_row(skill: &SkillRecord, width: usize) -> String {
    let core = if skill.is_core() { " [core]" } else { "" };
    let proto = skill
        .protocol_name()
        .map(|p| format!(" proto:{p}"))
        .unwrap_or_default();
    format!(
        "  {:width$}  {}  tier:{}  {}{core}{proto}",
        skill.name,
        version_label(skill),
        or_dash(skill.tier.as_ref()),
        or_dash(skill.category.as_ref()),
    )
}

fn plain_row(skill: &SkillRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        skill.name,
        skill.version().unwrap_or("-"),
        or_dash(skill.tier.as_ref()),
        or_dash(skill.category.as_ref()),
        skill.is_core(),
        skill.protocol_name().unwrap_or("-"),
    )
}
