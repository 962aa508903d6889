//! Validation configuration and rule context.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::diagnostic::Severity;
use crate::core::registry::SkillRegistry;
use crate::core::resources::ProtocolLookup;
use crate::core::skill::SkillRecord;

/// Soft upper bound on description length, in characters
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 1024;

/// Configuration for validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Rules to disable by ID
    #[serde(default)]
    pub disabled_rules: HashSet<String>,

    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,

    #[serde(default = "default_max_description_len")]
    pub max_description_len: usize,
}

const fn default_max_description_len() -> usize {
    DEFAULT_MAX_DESCRIPTION_LEN
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            disabled_rules: HashSet::new(),
            strict: false,
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
        }
    }
}

impl ValidationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict mode
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Disable a rule
    #[must_use]
    pub fn disable_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.disabled_rules.insert(rule_id.into());
        self
    }

    #[must_use]
    pub fn is_rule_disabled(&self, rule_id: &str) -> bool {
        self.disabled_rules.contains(rule_id)
    }

    #[must_use]
    pub fn effective_severity(&self, severity: Severity) -> Severity {
        if self.strict && severity == Severity::Warn {
            Severity::Error
        } else {
            severity
        }
    }
}

/// Everything a rule may look at while checking one skill
pub struct ValidationContext<'a> {
    pub skill: &'a SkillRecord,
    /// For cross-references (dependencies)
    pub registry: &'a SkillRegistry,
    pub protocols: &'a dyn ProtocolLookup,
    pub config: &'a ValidationConfig,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        skill: &'a SkillRecord,
        registry: &'a SkillRegistry,
        protocols: &'a dyn ProtocolLookup,
        config: &'a ValidationConfig,
    ) -> Self {
        Self {
            skill,
            registry,
            protocols,
            config,
        }
    }
}
