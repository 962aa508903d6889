//! ct-skills shared - List shared resources or print one

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, emit_jsonl, emit_machine, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SharedArgs {
    /// Resource to print, by file stem (lists all when omitted)
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct SharedContent<'a> {
    name: &'a str,
    path: String,
    content: String,
}

pub fn run(ctx: &AppContext, args: &SharedArgs) -> Result<()> {
    let shared = ctx.library.shared();

    if let Some(name) = &args.name {
        let content = shared.read(name)?;
        let path = shared
            .path(name)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        debug!(target: "shared", resource = %name, path = %path, "printing shared resource");
        let doc = SharedContent { name, path, content };
        return match ctx.output_format {
            OutputFormat::Json => emit_json(&robot_ok(&doc)),
            OutputFormat::Jsonl => emit_jsonl(&[&doc]),
            OutputFormat::Human | OutputFormat::Plain => {
                print!("{}", doc.content);
                Ok(())
            }
        };
    }

    let names = shared.list();
    debug!(target: "shared", count = names.len(), root = %shared.root().display(), "listing shared resources");

    if emit_machine(ctx.output_format, &names)? {
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Plain {
        for name in &names {
            println!("{name}");
        }
        return Ok(());
    }

    if names.is_empty() {
        println!("No shared resources found.");
        return Ok(());
    }
    for name in &names {
        println!("  {name}");
    }
    println!("\n{} shared resource(s)", names.len());
    Ok(())
}
