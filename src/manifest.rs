//! Dispatch manifest: loading, and generation from the skills index plus
//! `dispatch-config.json`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::skill::{FieldValue, SkillRecord};
use crate::error::{Result, SkillsError};

pub const MANIFEST_SCHEMA_URL: &str = "https://cleo-dev.com/schemas/v1/skills-manifest.schema.json";
pub const MANIFEST_SCHEMA_VERSION: &str = "2.2.0";
pub const GENERATED_FROM: &str = "ct-skills manifest build (frontmatter + dispatch-config.json)";
pub const ARCHITECTURE_NOTE: &str = "Universal Subagent Architecture: All spawns use single agent type 'cleo-subagent' with skill/protocol injection.";

const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_STATUS: &str = "active";
const DEFAULT_TOKEN_BUDGET: u64 = 6000;
const DEFAULT_SUBAGENT_TYPE: &str = "general-purpose";

/// Routing table from task type, keyword and protocol to a skill name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchMatrix {
    pub by_task_type: BTreeMap<String, String>,
    pub by_keyword: BTreeMap<String, String>,
    pub by_protocol: BTreeMap<String, String>,
}

impl DispatchMatrix {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_task_type.is_empty() && self.by_keyword.is_empty() && self.by_protocol.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchKeywords {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub max_context_tokens: u64,
    pub requires_session: bool,
    pub requires_epic: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_context_tokens: 60_000,
            requires_session: false,
            requires_epic: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub dependencies: Vec<String>,
    pub dispatch_triggers: Vec<String>,
    pub compatible_subagent_types: Vec<String>,
    pub chains_to: Vec<String>,
    pub dispatch_keywords: DispatchKeywords,
}

/// One generated manifest entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestSkill {
    pub name: String,
    pub version: String,
    pub description: String,
    pub path: String,
    pub tags: Vec<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<FieldValue<serde_json::Number>>,
    pub token_budget: u64,
    pub references: Vec<String>,
    pub capabilities: Capabilities,
    pub constraints: Constraints,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestMeta {
    pub schema_version: String,
    pub last_updated: String,
    pub total_skills: usize,
    pub generated_from: String,
    pub architecture_note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "_meta")]
    pub meta: ManifestMeta,
    pub dispatch_matrix: DispatchMatrix,
    pub skills: Vec<ManifestSkill>,
}

impl Manifest {
    /// Read a manifest file; `None` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        read_json(path)
    }

    /// Write pretty JSON with a trailing newline, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_pretty_json()?)?;
        debug!(target: "manifest", path = %path.display(), skills = self.skills.len(), "wrote manifest");
        Ok(())
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)
            .map_err(|err| SkillsError::Serialization(format!("serialize manifest: {err}")))?;
        out.push('\n');
        Ok(out)
    }
}

/// Hand-maintained per-skill dispatch settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SkillOverride {
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub token_budget: Option<u64>,
    pub capabilities: Option<CapabilitiesOverride>,
    pub constraints: Option<Constraints>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CapabilitiesOverride {
    pub inputs: Option<Vec<String>>,
    pub outputs: Option<Vec<String>>,
    pub dispatch_triggers: Option<Vec<String>>,
    pub compatible_subagent_types: Option<Vec<String>>,
    pub chains_to: Option<Vec<String>>,
    pub dispatch_keywords: Option<DispatchKeywords>,
}

/// Contents of `dispatch-config.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub skill_overrides: BTreeMap<String, SkillOverride>,
    pub dispatch_matrix: DispatchMatrix,
}

impl DispatchConfig {
    /// Read the dispatch configuration; a missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)?.ok_or_else(|| {
            SkillsError::Library(format!("dispatch config not found: {}", path.display()))
        })
    }
}

/// Merge index entries with their overrides, stamped with today's UTC date.
#[must_use]
pub fn build_manifest(skills: &[SkillRecord], config: &DispatchConfig) -> Manifest {
    build_manifest_on(skills, config, Utc::now().date_naive())
}

#[must_use]
pub fn build_manifest_on(
    skills: &[SkillRecord],
    config: &DispatchConfig,
    date: NaiveDate,
) -> Manifest {
    let entries: Vec<ManifestSkill> = skills
        .iter()
        .map(|skill| manifest_entry(skill, config.skill_overrides.get(&skill.name)))
        .collect();

    Manifest {
        schema: MANIFEST_SCHEMA_URL.to_string(),
        meta: ManifestMeta {
            schema_version: MANIFEST_SCHEMA_VERSION.to_string(),
            last_updated: date.format("%Y-%m-%d").to_string(),
            total_skills: entries.len(),
            generated_from: GENERATED_FROM.to_string(),
            architecture_note: ARCHITECTURE_NOTE.to_string(),
        },
        dispatch_matrix: config.dispatch_matrix.clone(),
        skills: entries,
    }
}

fn manifest_entry(skill: &SkillRecord, over: Option<&SkillOverride>) -> ManifestSkill {
    let over = over.cloned().unwrap_or_default();
    let caps = over.capabilities.unwrap_or_default();

    ManifestSkill {
        name: skill.name.clone(),
        version: skill
            .version()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION)
            .to_string(),
        description: skill.description().to_string(),
        path: format!("skills/{}", skill.name),
        tags: over.tags.unwrap_or_default(),
        status: over.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        tier: skill.tier.clone(),
        token_budget: over
            .token_budget
            .filter(|budget| *budget > 0)
            .unwrap_or(DEFAULT_TOKEN_BUDGET),
        references: skill.references.clone(),
        capabilities: Capabilities {
            inputs: caps.inputs.unwrap_or_default(),
            outputs: caps.outputs.unwrap_or_default(),
            dependencies: skill.dependencies().to_vec(),
            dispatch_triggers: caps.dispatch_triggers.unwrap_or_default(),
            compatible_subagent_types: caps
                .compatible_subagent_types
                .unwrap_or_else(|| vec![DEFAULT_SUBAGENT_TYPE.to_string()]),
            chains_to: caps.chains_to.unwrap_or_default(),
            dispatch_keywords: caps.dispatch_keywords.unwrap_or_default(),
        },
        constraints: over.constraints.unwrap_or_default(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| SkillsError::Library(format!("parse {}: {err}", path.display())))
}
