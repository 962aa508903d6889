//! Error types for ct-skills

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkillsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    /// A library data file (index, manifest, profile) is malformed
    #[error("library error: {0}")]
    Library(String),

    #[error("duplicate skill in index: {0}")]
    DuplicateSkill(String),

    #[error("{0}")]
    SkillNotFound(String),

    #[error("{0}")]
    ProfileNotFound(String),

    #[error("{0}")]
    ProtocolNotFound(String),

    #[error("{0}")]
    ResourceNotFound(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("{0}")]
    ToolUnavailable(String),

    #[error("install tool failed: {0}")]
    ToolFailed(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SkillsError {
    /// Stable machine-readable code used in robot output
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Config(_) => "config_error",
            Self::MissingConfig(_) => "missing_config",
            Self::Library(_) => "library_error",
            Self::DuplicateSkill(_) => "duplicate_skill",
            Self::SkillNotFound(_) => "skill_not_found",
            Self::ProfileNotFound(_) => "profile_not_found",
            Self::ProtocolNotFound(_) => "protocol_not_found",
            Self::ResourceNotFound(_) => "resource_not_found",
            Self::ValidationFailed(_) => "validation_failed",
            Self::ToolUnavailable(_) => "tool_unavailable",
            Self::ToolFailed(_) => "tool_failed",
            Self::Serialization(_) => "serialization_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillsError>;
