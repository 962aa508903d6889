//! ct-skills deps - Show the dependency closure of skills

use clap::Args;
use serde::Serialize;
use tracing::debug;

use super::version_label;
use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, emit_jsonl, robot_ok};
use crate::core::dependencies::{DependencyNode, DependencyResolver};
use crate::core::registry::SkillRegistry;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Skills to resolve
    #[arg(required = true, num_args = 1..)]
    pub skills: Vec<String>,

    /// Show each skill's dependency tree instead of the flat closure
    #[arg(long)]
    pub tree: bool,
}

#[derive(Debug, Serialize)]
struct Closure<'a> {
    requested: &'a [String],
    resolved: Vec<String>,
    /// Resolved names with no registry entry
    missing: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &DepsArgs) -> Result<()> {
    let registry = ctx.library.registry();
    let resolver = DependencyResolver::new(registry);

    if args.tree {
        let trees: Vec<DependencyNode> = args.skills.iter().map(|s| resolver.tree(s)).collect();
        debug!(target: "deps", roots = trees.len(), "rendering dependency trees");
        return match ctx.output_format {
            OutputFormat::Json => emit_json(&robot_ok(&trees)),
            OutputFormat::Jsonl => emit_jsonl(&trees),
            OutputFormat::Human | OutputFormat::Plain => {
                let rendered: Vec<String> = trees.iter().map(DependencyNode::render).collect();
                println!("{}", rendered.join("\n\n"));
                Ok(())
            }
        };
    }

    let closure = closure(registry, &args.skills);
    debug!(target: "deps", requested = args.skills.len(), resolved = closure.resolved.len(), missing = closure.missing.len(), "resolved closure");

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(&closure)),
        OutputFormat::Jsonl => emit_jsonl(&closure.resolved),
        OutputFormat::Plain => {
            for name in &closure.resolved {
                println!("{name}");
            }
            Ok(())
        }
        OutputFormat::Human => {
            println!(
                "Dependency closure for {} ({} skills):",
                args.skills.join(", "),
                closure.resolved.len()
            );
            for name in &closure.resolved {
                match registry.get(name) {
                    Some(skill) => println!("  {name} {}", version_label(skill)),
                    None => println!("  {name} (not registered)"),
                }
            }
            Ok(())
        }
    }
}

fn closure<'a>(registry: &SkillRegistry, requested: &'a [String]) -> Closure<'a> {
    let resolved = DependencyResolver::new(registry).resolve(requested);
    let missing = resolved
        .iter()
        .filter(|name| !registry.contains(name))
        .cloned()
        .collect();
    Closure {
        requested,
        resolved,
        missing,
    }
}
