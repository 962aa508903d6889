//! ct-skills info - Show skill details

use clap::Args;
use serde::Serialize;
use tracing::debug;

use super::or_dash;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, emit_jsonl, robot_ok};
use crate::core::skill::SkillRecord;
use crate::error::Result;

const DESCRIPTION_PREVIEW_CHARS: usize = 120;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Skill name
    pub skill: String,
}

#[derive(Serialize)]
struct SkillInfo<'a> {
    #[serde(flatten)]
    skill: &'a SkillRecord,
    skill_dir: String,
    skill_path: String,
    /// Dependency closure, the skill itself excluded
    resolved_dependencies: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &InfoArgs) -> Result<()> {
    let library = &ctx.library;
    let skill = library.require_skill(&args.skill)?;
    debug!(target: "info", skill = %skill.name, "showing skill");

    let info = SkillInfo {
        skill,
        skill_dir: library.skill_dir(&skill.name).display().to_string(),
        skill_path: library.skill_path(&skill.name).display().to_string(),
        resolved_dependencies: library
            .resolve_dependency_tree([skill.name.as_str()])
            .into_iter()
            .skip(1)
            .collect(),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(&info)),
        OutputFormat::Jsonl => emit_jsonl(&[&info]),
        OutputFormat::Human | OutputFormat::Plain => {
            emit_human(layout(skill));
            Ok(())
        }
    }
}

fn layout(skill: &SkillRecord) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout
        .kv("Name", &skill.name)
        .kv("Version", skill.version().unwrap_or("-"))
        .kv("Description", &preview(skill.description()))
        .kv("Category", &or_dash(skill.category.as_ref()))
        .kv("Tier", &or_dash(skill.tier.as_ref()))
        .kv("Core", &or_dash(skill.core.as_ref()))
        .kv("Protocol", skill.protocol_name().unwrap_or("none"))
        .kv("License", skill.license.as_deref().unwrap_or("-"))
        .kv("Dependencies", &join_or_none(skill.dependencies()))
        .kv("Shared", &join_or_none(&skill.shared_resources))
        .kv("Compatibility", &join_or_none(&skill.compatibility))
        .kv("References", &skill.references.len().to_string())
        .kv("Path", &skill.path);
    layout
}

fn preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}
