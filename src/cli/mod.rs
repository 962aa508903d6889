//! Command-line interface

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

pub mod commands;
pub mod output;

pub use output::OutputFormat;

/// ct-skills - skills registry CLI
#[derive(Parser, Debug)]
#[command(name = "ct-skills", version, about, long_about = None)]
pub struct Cli {
    /// Library root (directory containing skills.json)
    #[arg(long, global = true, env = "CT_SKILLS_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file to use instead of the global and project files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Machine-readable output: JSON results and JSON errors on stdout
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format (overrides config)
    #[arg(long, short = 'f', global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Format requested on the command line, if any. `--format` beats `--robot`.
    #[must_use]
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
            .or_else(|| self.robot.then_some(OutputFormat::Json))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List skills, optionally filtered
    List(commands::list::ListArgs),

    /// Show details of one skill
    Info(commands::info::InfoArgs),

    /// Validate skill frontmatter
    Validate(commands::validate::ValidateArgs),

    /// List install profiles
    Profiles(commands::profiles::ProfilesArgs),

    /// List protocols, or print one
    Protocols(commands::protocols::ProtocolsArgs),

    /// List shared resources, or print one
    Shared(commands::shared::SharedArgs),

    /// Show the dependency closure of skills
    Deps(commands::deps::DepsArgs),

    /// Resolve an install set and hand it to the install tool
    Install(commands::install::InstallArgs),

    /// Build or inspect the dispatch manifest
    Manifest(commands::manifest::ManifestArgs),
}
