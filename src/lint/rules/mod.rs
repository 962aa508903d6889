//! Built-in frontmatter rules.
//!
//! - **Structural rules** (`structural`): required fields, field types and domains
//! - **Reference rules** (`reference`): dependencies and protocols resolve
//!
//! `all_rules` returns them in the order issues are reported.

pub mod reference;
pub mod structural;

use crate::lint::rule::BoxedRule;

pub use reference::{DependencyReferenceRule, ProtocolReferenceRule};
pub use structural::{
    CategoryRule, CoreFlagRule, DescriptionLengthRule, RequiredFieldsRule, TierRangeRule,
    VersionFormatRule,
};

pub fn structural_rules() -> Vec<BoxedRule> {
    structural::structural_rules()
}

pub fn reference_rules() -> Vec<BoxedRule> {
    reference::reference_rules()
}

/// JSON type name of a mistyped frontmatter value, for messages.
pub(crate) const fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// All built-in rules, description length last.
pub fn all_rules() -> Vec<BoxedRule> {
    let mut rules = structural_rules();
    rules.extend(reference_rules());
    rules.push(Box::new(DescriptionLengthRule));
    rules
}
