//! ct-skills manifest - Build or inspect the dispatch manifest

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, emit_jsonl, robot_ok};
use crate::error::Result;
use crate::manifest::{DispatchConfig, DispatchMatrix, build_manifest};

#[derive(Args, Debug)]
pub struct ManifestArgs {
    #[command(subcommand)]
    pub command: ManifestCommand,
}

#[derive(Subcommand, Debug)]
pub enum ManifestCommand {
    /// Generate the manifest from the index and dispatch-config.json
    Build(BuildArgs),

    /// Print the dispatch matrix of the current manifest
    Dispatch,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Write here instead of the configured manifest path
    #[arg(long, short, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the manifest instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Serialize)]
struct BuildSummary {
    path: String,
    total_skills: usize,
}

#[derive(Debug, Serialize)]
struct DispatchRoute<'a> {
    table: &'static str,
    key: &'a str,
    skill: &'a str,
}

pub fn run(ctx: &AppContext, args: &ManifestArgs) -> Result<()> {
    match &args.command {
        ManifestCommand::Build(build) => run_build(ctx, build),
        ManifestCommand::Dispatch => run_dispatch(ctx),
    }
}

fn run_build(ctx: &AppContext, args: &BuildArgs) -> Result<()> {
    let paths = ctx.library.paths();
    let dispatch = DispatchConfig::load(&paths.dispatch_config)?;
    let manifest = build_manifest(ctx.library.registry().all(), &dispatch);
    debug!(target: "manifest", skills = manifest.skills.len(), overrides = dispatch.skill_overrides.len(), "built manifest");

    if args.stdout {
        print!("{}", manifest.to_pretty_json()?);
        return Ok(());
    }

    let target = args.output.clone().unwrap_or_else(|| paths.manifest.clone());
    manifest.write(&target)?;
    info!(target: "manifest", path = %target.display(), "wrote manifest");

    let summary = BuildSummary {
        path: target.display().to_string(),
        total_skills: manifest.meta.total_skills,
    };
    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(&summary)),
        OutputFormat::Jsonl => emit_jsonl(&[&summary]),
        OutputFormat::Plain => {
            println!("{}", summary.path);
            Ok(())
        }
        OutputFormat::Human => {
            println!("Generated {} ({} skills)", summary.path, summary.total_skills);
            Ok(())
        }
    }
}

fn run_dispatch(ctx: &AppContext) -> Result<()> {
    let matrix = ctx.library.dispatch_matrix();
    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(&matrix)),
        OutputFormat::Jsonl => emit_jsonl(&routes(&matrix)),
        OutputFormat::Plain => {
            for route in routes(&matrix) {
                println!("{}\t{}\t{}", route.table, route.key, route.skill);
            }
            Ok(())
        }
        OutputFormat::Human => {
            if matrix.is_empty() {
                println!("No dispatch matrix (manifest missing or empty).");
                return Ok(());
            }
            for (title, table) in [
                ("By task type", &matrix.by_task_type),
                ("By keyword", &matrix.by_keyword),
                ("By protocol", &matrix.by_protocol),
            ] {
                if table.is_empty() {
                    continue;
                }
                println!("{title}:");
                let width = table.keys().map(String::len).max().unwrap_or(0);
                for (key, skill) in table {
                    println!("  {key:width$}  -> {skill}");
                }
            }
            Ok(())
        }
    }
}

fn routes(matrix: &DispatchMatrix) -> Vec<DispatchRoute<'_>> {
    [
        ("task_type", &matrix.by_task_type),
        ("keyword", &matrix.by_keyword),
        ("protocol", &matrix.by_protocol),
    ]
    .into_iter()
    .flat_map(|(table, entries)| {
        entries.iter().map(move |(key, skill)| DispatchRoute { table, key, skill })
    })
    .collect()
}
