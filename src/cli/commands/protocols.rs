//! ct-skills protocols - List protocols or print one

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, emit_jsonl, emit_machine, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ProtocolsArgs {
    /// Protocol to print (lists all when omitted)
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProtocolEntry {
    name: String,
    path: String,
}

#[derive(Debug, Serialize)]
struct ProtocolContent<'a> {
    name: &'a str,
    content: String,
}

pub fn run(ctx: &AppContext, args: &ProtocolsArgs) -> Result<()> {
    let protocols = ctx.library.protocols();

    if let Some(name) = &args.name {
        let content = protocols.read(name)?;
        debug!(target: "protocols", protocol = %name, bytes = content.len(), "printing protocol");
        let doc = ProtocolContent { name, content };
        return match ctx.output_format {
            OutputFormat::Json => emit_json(&robot_ok(&doc)),
            OutputFormat::Jsonl => emit_jsonl(&[&doc]),
            OutputFormat::Human | OutputFormat::Plain => {
                print!("{}", doc.content);
                Ok(())
            }
        };
    }

    let entries: Vec<ProtocolEntry> = protocols
        .list()
        .into_iter()
        .map(|name| {
            let path = protocols.root().join(format!("{name}.md")).display().to_string();
            ProtocolEntry { name, path }
        })
        .collect();
    debug!(target: "protocols", count = entries.len(), root = %protocols.root().display(), "listing protocols");

    if emit_machine(ctx.output_format, &entries)? {
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Plain {
        for entry in &entries {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    if entries.is_empty() {
        println!("No protocols found.");
        return Ok(());
    }
    for entry in &entries {
        println!("  {}", entry.name);
    }
    println!("\n{} protocol(s)", entries.len());
    Ok(())
}
