//! Structural rules: required fields and field types/domains.

use std::sync::LazyLock;

use regex::Regex;

use super::json_type;
use crate::core::skill::{FieldValue, SkillCategory};
use crate::lint::config::ValidationContext;
use crate::lint::diagnostic::{Severity, ValidationIssue};
use crate::lint::rule::{BoxedRule, ValidationRule};

static SEMVER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid regex"));

/// Name and description must be non-empty.
pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn id(&self) -> &'static str {
        "required-fields"
    }

    fn field(&self) -> &'static str {
        "name"
    }

    fn description(&self) -> &'static str {
        "Skills must have a name and a description"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if ctx.skill.name.is_empty() {
            issues.push(ValidationIssue::error("name", "Missing name"));
        }
        match &ctx.skill.description {
            FieldValue::Typed(text) if text.is_empty() => {
                issues.push(ValidationIssue::error("description", "Missing description"));
            }
            FieldValue::Raw(serde_json::Value::Null) => {
                issues.push(ValidationIssue::error("description", "Missing description"));
            }
            FieldValue::Raw(value) => issues.push(ValidationIssue::error(
                "description",
                format!("description must be a string, got {}", json_type(value)),
            )),
            FieldValue::Typed(_) => {}
        }
        issues
    }
}

/// Version must be present and MAJOR.MINOR.PATCH.
pub struct VersionFormatRule;

impl ValidationRule for VersionFormatRule {
    fn id(&self) -> &'static str {
        "version-format"
    }

    fn field(&self) -> &'static str {
        "version"
    }

    fn description(&self) -> &'static str {
        "Version should be present and match MAJOR.MINOR.PATCH"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warn
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        match &ctx.skill.version {
            None | Some(FieldValue::Raw(serde_json::Value::Null)) => {
                vec![self.issue("Missing version".to_string())]
            }
            Some(FieldValue::Typed(version)) if version.is_empty() => {
                vec![self.issue("Missing version".to_string())]
            }
            Some(FieldValue::Typed(version)) if SEMVER_REGEX.is_match(version) => vec![],
            Some(version) => vec![self.issue(format!("Invalid semver: {version}"))],
        }
    }
}

/// Category, when present, must be one of the known categories.
pub struct CategoryRule;

impl ValidationRule for CategoryRule {
    fn id(&self) -> &'static str {
        "valid-category"
    }

    fn field(&self) -> &'static str {
        "category"
    }

    fn description(&self) -> &'static str {
        "Category must be one of: core, recommended, specialist, composition, meta"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        let Some(FieldValue::Raw(value)) = &ctx.skill.category else {
            return vec![];
        };
        // Empty values count as absent.
        if value.is_null() || value.as_str() == Some("") {
            return vec![];
        }
        let allowed = SkillCategory::ALL.map(SkillCategory::as_str).join(", ");
        let shown = value.as_str().map_or_else(|| value.to_string(), String::from);
        vec![self.issue(format!(
            "Invalid category '{shown}', must be one of: {allowed}"
        ))]
    }
}

/// The `core` flag, when present, must be a boolean.
pub struct CoreFlagRule;

impl ValidationRule for CoreFlagRule {
    fn id(&self) -> &'static str {
        "core-boolean"
    }

    fn field(&self) -> &'static str {
        "core"
    }

    fn description(&self) -> &'static str {
        "The core flag must be a boolean"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        match &ctx.skill.core {
            Some(FieldValue::Raw(value)) => {
                vec![self.issue(format!("core must be boolean, got {}", json_type(value)))]
            }
            _ => vec![],
        }
    }
}

/// Tier, when present, must be a number in 0..=3.
pub struct TierRangeRule;

impl ValidationRule for TierRangeRule {
    fn id(&self) -> &'static str {
        "tier-range"
    }

    fn field(&self) -> &'static str {
        "tier"
    }

    fn description(&self) -> &'static str {
        "Tier should be a number between 0 and 3"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warn
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        match &ctx.skill.tier {
            None => vec![],
            Some(FieldValue::Typed(tier))
                if tier.as_f64().is_some_and(|t| (0.0..=3.0).contains(&t)) =>
            {
                vec![]
            }
            Some(tier) => vec![self.issue(format!("Tier should be 0-3, got {tier}"))],
        }
    }
}

/// Description length must stay within the configured limit.
pub struct DescriptionLengthRule;

impl ValidationRule for DescriptionLengthRule {
    fn id(&self) -> &'static str {
        "description-length"
    }

    fn field(&self) -> &'static str {
        "description"
    }

    fn description(&self) -> &'static str {
        "Description must not exceed the maximum length"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        let len = ctx.skill.description().chars().count();
        let max = ctx.config.max_description_len;
        if len > max {
            vec![self.issue(format!("Description too long: {len} chars (max {max})"))]
        } else {
            vec![]
        }
    }
}

pub fn structural_rules() -> Vec<BoxedRule> {
    vec![
        Box::new(RequiredFieldsRule),
        Box::new(VersionFormatRule),
        Box::new(CategoryRule),
        Box::new(CoreFlagRule),
        Box::new(TierRangeRule),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::core::registry::SkillRegistry;
    use crate::core::skill::SkillRecord;
    use crate::lint::config::ValidationConfig;

    fn check(rule: &dyn ValidationRule, skill: &SkillRecord) -> Vec<ValidationIssue> {
        let registry = SkillRegistry::new();
        let protocols: HashSet<String> = HashSet::new();
        let config = ValidationConfig::new();
        rule.validate(&ValidationContext::new(skill, &registry, &protocols, &config))
    }

    fn from_json(raw: &str) -> SkillRecord {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn required_fields() {
        let issues = check(&RequiredFieldsRule, &SkillRecord::new("", ""));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "name");
        assert_eq!(issues[1].field, "description");
        assert!(check(&RequiredFieldsRule, &SkillRecord::new("a", "b")).is_empty());
    }

    #[test]
    fn description_must_be_text() {
        let listed = check(&RequiredFieldsRule, &from_json(r#"{"name": "a", "description": ["d"]}"#));
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].message, "description must be a string, got array");

        let null = check(&RequiredFieldsRule, &from_json(r#"{"name": "a", "description": null}"#));
        assert_eq!(null[0].message, "Missing description");
    }

    #[test]
    fn version_boundaries() {
        let missing = check(&VersionFormatRule, &SkillRecord::new("a", "b"));
        assert_eq!(missing[0].message, "Missing version");
        assert_eq!(missing[0].severity, Severity::Warn);

        let short = check(&VersionFormatRule, &SkillRecord::new("a", "b").with_version("1.2"));
        assert_eq!(short[0].message, "Invalid semver: 1.2");

        let ok = check(&VersionFormatRule, &SkillRecord::new("a", "b").with_version("1.2.3"));
        assert!(ok.is_empty());

        let prerelease =
            check(&VersionFormatRule, &SkillRecord::new("a", "b").with_version("1.2.3-beta"));
        assert_eq!(prerelease.len(), 1);

        let numeric = check(&VersionFormatRule, &from_json(r#"{"name": "a", "version": 1}"#));
        assert_eq!(numeric.len(), 1);
        assert_eq!(numeric[0].message, "Invalid semver: 1");

        let null = check(&VersionFormatRule, &from_json(r#"{"name": "a", "version": null}"#));
        assert_eq!(null[0].message, "Missing version");
    }

    #[test]
    fn unknown_category_is_error() {
        let issues = check(&CategoryRule, &from_json(r#"{"name": "a", "category": "misc"}"#));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("'misc'"));
        assert!(issues[0].message.contains("core, recommended, specialist, composition, meta"));

        let fine = SkillRecord::new("a", "b").with_category(SkillCategory::Meta);
        assert!(check(&CategoryRule, &fine).is_empty());
        assert!(check(&CategoryRule, &SkillRecord::new("a", "b")).is_empty());
    }

    #[test]
    fn core_must_be_boolean() {
        let issues = check(&CoreFlagRule, &from_json(r#"{"name": "a", "core": "yes"}"#));
        assert_eq!(issues[0].message, "core must be boolean, got string");
        assert!(check(&CoreFlagRule, &SkillRecord::new("a", "b").with_core(false)).is_empty());
        assert!(check(&CoreFlagRule, &SkillRecord::new("a", "b")).is_empty());
    }

    #[test]
    fn explicit_null_core_and_tier_are_reported() {
        let skill = from_json(r#"{"name": "a", "core": null, "tier": null}"#);
        let core = check(&CoreFlagRule, &skill);
        assert_eq!(core.len(), 1);
        assert_eq!(core[0].severity, Severity::Error);
        assert_eq!(core[0].message, "core must be boolean, got null");

        let tier = check(&TierRangeRule, &skill);
        assert_eq!(tier.len(), 1);
        assert_eq!(tier[0].severity, Severity::Warn);
        assert_eq!(tier[0].message, "Tier should be 0-3, got null");

        let category = check(&CategoryRule, &from_json(r#"{"name": "a", "category": null}"#));
        assert!(category.is_empty());
    }

    #[test]
    fn tier_boundaries() {
        let four = check(&TierRangeRule, &SkillRecord::new("a", "b").with_tier(4));
        assert_eq!(four.len(), 1);
        assert_eq!(four[0].severity, Severity::Warn);
        assert_eq!(four[0].message, "Tier should be 0-3, got 4");

        for tier in 0..=3 {
            assert!(check(&TierRangeRule, &SkillRecord::new("a", "b").with_tier(tier)).is_empty());
        }
        assert_eq!(check(&TierRangeRule, &SkillRecord::new("a", "b").with_tier(-1)).len(), 1);

        let text = check(&TierRangeRule, &from_json(r#"{"name": "a", "tier": "high"}"#));
        assert_eq!(text[0].message, "Tier should be 0-3, got high");

        for fractional in [r#"{"name": "a", "tier": 2.0}"#, r#"{"name": "a", "tier": 2.5}"#] {
            assert!(check(&TierRangeRule, &from_json(fractional)).is_empty(), "{fractional}");
        }
        let above = check(&TierRangeRule, &from_json(r#"{"name": "a", "tier": 3.5}"#));
        assert_eq!(above[0].message, "Tier should be 0-3, got 3.5");
    }

    #[test]
    fn description_length_limit() {
        let at_limit = SkillRecord::new("a", "x".repeat(1024));
        assert!(check(&DescriptionLengthRule, &at_limit).is_empty());

        let over = SkillRecord::new("a", "x".repeat(1025));
        let issues = check(&DescriptionLengthRule, &over);
        assert_eq!(issues[0].message, "Description too long: 1025 chars (max 1024)");
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn description_length_counts_characters() {
        let multibyte = SkillRecord::new("a", "é".repeat(1024));
        assert!(check(&DescriptionLengthRule, &multibyte).is_empty());
    }
}
