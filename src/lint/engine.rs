//! Validation engine for running rules against skills.

use serde::Serialize;
use tracing::debug;

use crate::core::registry::SkillRegistry;
use crate::core::resources::ProtocolLookup;

use super::config::{ValidationConfig, ValidationContext};
use super::diagnostic::{Severity, ValidationIssue};
use super::rule::BoxedRule;
use super::rules::all_rules;

/// Outcome of validating one skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True iff no issue has error severity
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    #[must_use]
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let valid = !issues.iter().any(ValidationIssue::is_error);
        Self { valid, issues }
    }

    /// Get error issues
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Get warning issues
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warn)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

/// Per-skill results in index order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub entries: Vec<(String, ValidationResult)>,
}

impl ValidationReport {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValidationResult> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationResult)> {
        self.entries
            .iter()
            .map(|(name, result)| (name.as_str(), result))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.valid).count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|(_, r)| !r.valid)
    }
}

/// The validation engine that manages and runs rules
pub struct ValidationEngine {
    rules: Vec<BoxedRule>,
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Engine with the built-in rules and the given config
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            rules: all_rules(),
            config,
        }
    }

    /// Engine with no rules registered
    #[must_use]
    pub const fn empty(config: ValidationConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Built-in rules with default config
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Register a validation rule
    pub fn register(&mut self, rule: BoxedRule) {
        self.rules.push(rule);
    }

    /// Register a validation rule (builder pattern)
    #[must_use]
    pub fn with_rule(mut self, rule: BoxedRule) -> Self {
        self.register(rule);
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[BoxedRule] {
        &self.rules
    }

    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate the skill named `name`.
    ///
    /// An unknown name yields a single error issue on `name` and no rule runs.
    #[must_use]
    pub fn validate(
        &self,
        name: &str,
        registry: &SkillRegistry,
        protocols: &dyn ProtocolLookup,
    ) -> ValidationResult {
        let Some(skill) = registry.get(name) else {
            return ValidationResult::from_issues(vec![ValidationIssue::error(
                "name",
                format!("Skill '{name}' not found"),
            )]);
        };

        let ctx = ValidationContext::new(skill, registry, protocols, &self.config);
        let mut issues = Vec::new();
        for rule in &self.rules {
            if self.config.is_rule_disabled(rule.id()) {
                continue;
            }
            for mut issue in rule.validate(&ctx) {
                issue.severity = self.config.effective_severity(issue.severity);
                issues.push(issue);
            }
        }

        debug!(target: "validate", skill = name, issues = issues.len(), "validated");
        ValidationResult::from_issues(issues)
    }

    /// Validate every skill in the registry, in index order.
    #[must_use]
    pub fn validate_all(
        &self,
        registry: &SkillRegistry,
        protocols: &dyn ProtocolLookup,
    ) -> ValidationReport {
        let entries = registry
            .names()
            .into_iter()
            .map(|name| (name.to_string(), self.validate(name, registry, protocols)))
            .collect();
        ValidationReport { entries }
    }

    /// List all registered rules
    #[must_use]
    pub fn list_rules(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .map(|r| RuleInfo {
                id: r.id().to_string(),
                field: r.field().to_string(),
                description: r.description().to_string(),
                default_severity: r.default_severity(),
                disabled: self.config.is_rule_disabled(r.id()),
            })
            .collect()
    }
}

/// Information about a registered rule
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub id: String,
    pub field: String,
    pub description: String,
    pub default_severity: Severity,
    pub disabled: bool,
}
