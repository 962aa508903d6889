use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use crate::error::{Result, SkillsError};

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminals
    #[default]
    Human,
    /// One pretty JSON document wrapped in a status envelope
    Json,
    /// One compact JSON object per line, no envelope
    Jsonl,
    /// Tab-separated fields, no headers or colour
    Plain,
}

impl OutputFormat {
    #[must_use]
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Human => "human",
            Self::Json => "json",
            Self::Jsonl => "jsonl",
            Self::Plain => "plain",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = SkillsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "jsonl" => Ok(Self::Jsonl),
            "plain" => Ok(Self::Plain),
            _ => Err(SkillsError::Config(format!(
                "invalid output format {s} (expected human|json|jsonl|plain)"
            ))),
        }
    }
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    /// Command completed but found problems (e.g. failed validation)
    Failed,
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

pub fn robot_failed<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Failed,
        ..robot_ok(data)
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| SkillsError::Serialization(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

/// One compact JSON line per item.
pub fn emit_jsonl<T: Serialize>(items: &[T]) -> Result<()> {
    for item in items {
        let line = serde_json::to_string(item)
            .map_err(|err| SkillsError::Serialization(format!("serialize output: {err}")))?;
        println!("{line}");
    }
    Ok(())
}

/// Write `items` in a machine format: an enveloped document for JSON,
/// bare lines for JSONL. Returns false for human/plain.
pub fn emit_machine<T: Serialize>(format: OutputFormat, items: &[T]) -> Result<bool> {
    match format {
        OutputFormat::Json => emit_json(&robot_ok(items)).map(|()| true),
        OutputFormat::Jsonl => emit_jsonl(items).map(|()| true),
        OutputFormat::Human | OutputFormat::Plain => Ok(false),
    }
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 15,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    /// `Key:` padded to a fixed column, then the value.
    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let label = format!("{key}:");
        self.lines.push(format!(
            "{label:width$} {value}",
            width = self.key_width
        ));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("  {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}
