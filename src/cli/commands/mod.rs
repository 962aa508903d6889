//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

pub mod deps;
pub mod info;
pub mod install;
pub mod list;
pub mod manifest;
pub mod profiles;
pub mod protocols;
pub mod shared;
pub mod validate;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::core::skill::SkillRecord;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::List(args) => list::run(ctx, args),
        Commands::Info(args) => info::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Profiles(args) => profiles::run(ctx, args),
        Commands::Protocols(args) => protocols::run(ctx, args),
        Commands::Shared(args) => shared::run(ctx, args),
        Commands::Deps(args) => deps::run(ctx, args),
        Commands::Install(args) => install::run(ctx, args),
        Commands::Manifest(args) => manifest::run(ctx, args),
    }
}

/// `vX.Y.Z`, or `v-` when the index has no version.
pub(crate) fn version_label(skill: &SkillRecord) -> String {
    format!("v{}", skill.version().unwrap_or("-"))
}

/// Display value of an optional field, `-` when absent.
pub(crate) fn or_dash<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}
