//! Reference rules: dependencies and protocols must point at something real.

use serde_json::Value;

use super::json_type;
use crate::core::skill::FieldValue;
use crate::lint::config::ValidationContext;
use crate::lint::diagnostic::{Severity, ValidationIssue};
use crate::lint::rule::{BoxedRule, ValidationRule};

/// Every declared dependency must name a skill in the registry.
pub struct DependencyReferenceRule;

impl ValidationRule for DependencyReferenceRule {
    fn id(&self) -> &'static str {
        "known-dependencies"
    }

    fn field(&self) -> &'static str {
        "dependencies"
    }

    fn description(&self) -> &'static str {
        "Dependencies must reference skills in the index"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        match &ctx.skill.dependencies {
            FieldValue::Typed(deps) => deps
                .iter()
                .filter(|dep| !ctx.registry.contains(dep))
                .map(|dep| self.issue(format!("Unknown dependency: {dep}")))
                .collect(),
            // Mixed arrays: anything that is not a registered name is unknown
            FieldValue::Raw(Value::Array(values)) => values
                .iter()
                .filter(|value| value.as_str().is_none_or(|dep| !ctx.registry.contains(dep)))
                .map(|value| {
                    let shown = value.as_str().map_or_else(|| value.to_string(), String::from);
                    self.issue(format!("Unknown dependency: {shown}"))
                })
                .collect(),
            FieldValue::Raw(Value::Null) => vec![],
            FieldValue::Raw(value) => vec![self.issue(format!(
                "dependencies must be an array, got {}",
                json_type(value)
            ))],
        }
    }
}

/// A declared protocol should have a matching protocol file.
pub struct ProtocolReferenceRule;

impl ValidationRule for ProtocolReferenceRule {
    fn id(&self) -> &'static str {
        "protocol-exists"
    }

    fn field(&self) -> &'static str {
        "protocol"
    }

    fn description(&self) -> &'static str {
        "Protocol should reference an existing protocol file"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warn
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        if let Some(FieldValue::Raw(value)) = &ctx.skill.protocol {
            return vec![self.issue(format!(
                "protocol must be a string, got {}",
                json_type(value)
            ))];
        }
        match ctx.skill.protocol_name() {
            Some(protocol) if !ctx.protocols.protocol_exists(protocol) => {
                vec![self.issue(format!("Protocol file not found: {protocol}.md"))]
            }
            _ => vec![],
        }
    }
}

pub fn reference_rules() -> Vec<BoxedRule> {
    vec![Box::new(DependencyReferenceRule), Box::new(ProtocolReferenceRule)]
}
