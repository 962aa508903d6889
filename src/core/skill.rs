//! Skill record types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::{Result, SkillsError};

/// Closed set of skill categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Core,
    Recommended,
    Specialist,
    Composition,
    Meta,
}

impl SkillCategory {
    pub const ALL: [Self; 5] = [
        Self::Core,
        Self::Recommended,
        Self::Specialist,
        Self::Composition,
        Self::Meta,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Recommended => "recommended",
            Self::Specialist => "specialist",
            Self::Composition => "composition",
            Self::Meta => "meta",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = SkillsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| SkillsError::Library(format!("unknown category: {s}")))
    }
}

/// A frontmatter value that is either of the expected type or kept raw.
///
/// The index is produced upstream and may carry values of the wrong type;
/// keeping them raw lets the validator report them instead of failing the
/// whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue<T> {
    Typed(T),
    Raw(Value),
}

impl<T> FieldValue<T> {
    pub const fn typed(&self) -> Option<&T> {
        match self {
            Self::Typed(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// The mistyped value, if any.
    pub const fn raw(&self) -> Option<&Value> {
        match self {
            Self::Typed(_) => None,
            Self::Raw(value) => Some(value),
        }
    }
}

impl<T: Default> Default for FieldValue<T> {
    fn default() -> Self {
        Self::Typed(T::default())
    }
}

impl<T: fmt::Display> fmt::Display for FieldValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(value) => write!(f, "{value}"),
            Self::Raw(Value::String(value)) => f.write_str(value),
            Self::Raw(value) => write!(f, "{value}"),
        }
    }
}

/// One entry of the skills index.
///
/// Fields other than `name` keep mistyped values raw, so one malformed entry
/// shows up as validation issues rather than a failed load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecord {
    #[serde(default, deserialize_with = "name_text")]
    pub name: String,
    #[serde(default)]
    pub description: FieldValue<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<FieldValue<String>>,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub core: Option<FieldValue<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FieldValue<SkillCategory>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tier: Option<FieldValue<Number>>,
    #[serde(default)]
    pub protocol: Option<FieldValue<String>>,
    #[serde(default)]
    pub dependencies: FieldValue<Vec<String>>,
    #[serde(default)]
    pub shared_resources: Vec<String>,
    #[serde(default)]
    pub compatibility: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,
}

/// An explicit `null` is kept as a raw value instead of collapsing to `None`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<FieldValue<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

/// Names key the registry, so scalars are taken as their JSON text.
fn name_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl SkillRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: FieldValue::Typed(description.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(FieldValue::Typed(version.into()));
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: SkillCategory) -> Self {
        self.category = Some(FieldValue::Typed(category));
        self
    }

    #[must_use]
    pub fn with_core(mut self, core: bool) -> Self {
        self.core = Some(FieldValue::Typed(core));
        self
    }

    #[must_use]
    pub fn with_tier(mut self, tier: i64) -> Self {
        self.tier = Some(FieldValue::Typed(Number::from(tier)));
        self
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(FieldValue::Typed(protocol.into()));
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = FieldValue::Typed(deps.into_iter().map(Into::into).collect());
        self
    }

    /// Only an explicit boolean `true` marks a skill as core.
    #[must_use]
    pub fn is_core(&self) -> bool {
        matches!(self.core, Some(FieldValue::Typed(true)))
    }

    #[must_use]
    pub fn category(&self) -> Option<SkillCategory> {
        self.category.as_ref().and_then(FieldValue::typed).copied()
    }

    /// Integral tier, if the index carries one.
    #[must_use]
    pub fn tier(&self) -> Option<i64> {
        self.tier.as_ref().and_then(FieldValue::typed).and_then(Number::as_i64)
    }

    /// Empty when the index carries a non-string description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.typed().map_or("", String::as_str)
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_ref().and_then(FieldValue::typed).map(String::as_str)
    }

    /// Direct dependencies; empty when the index carries a non-array value.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        self.dependencies
            .typed()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Protocol name, treating the literal string `"null"` as absent.
    #[must_use]
    pub fn protocol_name(&self) -> Option<&str> {
        self.protocol
            .as_ref()
            .and_then(FieldValue::typed)
            .map(String::as_str)
            .filter(|name| !name.is_empty() && *name != "null")
    }
}

/// Top-level shape of `skills.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsIndex {
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
}
