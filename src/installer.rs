//! Hand-off to the external skill installer (`caamp` by default).

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::config::InstallConfig;
use crate::error::{Result, SkillsError};

/// Client for the external install tool.
pub struct InstallerClient {
    tool: String,
    extra_args: Vec<String>,
}

impl InstallerClient {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            extra_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &InstallConfig) -> Self {
        Self {
            tool: config.tool.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    #[must_use]
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Resolved binary, if the tool is on PATH (or is a path that exists).
    #[must_use]
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.tool).ok()
    }

    /// Argument vector after the program name.
    #[must_use]
    pub fn args<S: AsRef<str>>(&self, skills: &[S]) -> Vec<String> {
        std::iter::once("install".to_string())
            .chain(skills.iter().map(|s| s.as_ref().to_string()))
            .chain(self.extra_args.iter().cloned())
            .collect()
    }

    /// The hand-off command as one shell-style line.
    #[must_use]
    pub fn command_line<S: AsRef<str>>(&self, skills: &[S]) -> String {
        std::iter::once(self.tool.clone())
            .chain(self.args(skills))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the tool, inheriting stdio.
    pub fn install<S: AsRef<str>>(&self, skills: &[S]) -> Result<()> {
        let program = self.locate().ok_or_else(|| {
            SkillsError::ToolUnavailable(format!(
                "{tool} is required for install operations. Install it with: npm install -g @cleocode/{tool}, \
                 or set [install] tool / CT_SKILLS_INSTALL_TOOL",
                tool = self.tool
            ))
        })?;

        let mut cmd = Command::new(&program);
        cmd.args(self.args(skills));
        debug!(target: "install", command = %self.command_line(skills), "running install tool");

        let status = cmd
            .status()
            .map_err(|err| SkillsError::ToolFailed(format!("failed to execute {}: {err}", self.tool)))?;
        if !status.success() {
            return Err(SkillsError::ToolFailed(format!("{} exited with {status}", self.tool)));
        }
        Ok(())
    }
}
