use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::{Result, SkillsError};
use crate::library::{LibraryPaths, SkillLibrary, find_library_root};

pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub library: SkillLibrary,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = Self::find_root(cli.root.as_deref())?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let output_format = match cli.output_format() {
            Some(format) => format,
            None => config.output.format.parse()?,
        };
        debug!(target: "app", root = %root.display(), format = %output_format, "resolved library");

        Self::open(root, config, output_format, cli.robot, cli.verbose)
    }

    /// Build a context from already-resolved parts.
    pub fn open(
        root: PathBuf,
        config: Config,
        output_format: OutputFormat,
        robot_mode: bool,
        verbosity: u8,
    ) -> Result<Self> {
        let library = SkillLibrary::open(LibraryPaths::from_config(&root, &config.paths))?;
        Ok(Self {
            root,
            config,
            library,
            robot_mode,
            output_format,
            verbosity,
        })
    }

    /// `--root` / `CT_SKILLS_ROOT` when given, else the nearest ancestor of
    /// the working directory holding `skills.json`.
    fn find_root(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(root) = explicit {
            return Ok(root.to_path_buf());
        }
        let cwd = std::env::current_dir()?;
        find_library_root(&cwd).ok_or_else(|| {
            SkillsError::MissingConfig(
                "no skills library found: pass --root, set CT_SKILLS_ROOT, or run inside a directory containing skills.json"
                    .to_string(),
            )
        })
    }
}
