//! Skill frontmatter validation with the built-in rule set

use super::registry::SkillRegistry;
use super::resources::ProtocolLookup;
use crate::lint::{ValidationEngine, ValidationReport, ValidationResult};

/// Validate one skill's index entry with default settings.
#[must_use]
pub fn validate_skill_frontmatter(
    registry: &SkillRegistry,
    protocols: &dyn ProtocolLookup,
    name: &str,
) -> ValidationResult {
    ValidationEngine::with_defaults().validate(name, registry, protocols)
}

/// Validate every skill with default settings, in index order.
#[must_use]
pub fn validate_all(registry: &SkillRegistry, protocols: &dyn ProtocolLookup) -> ValidationReport {
    ValidationEngine::with_defaults().validate_all(registry, protocols)
}
