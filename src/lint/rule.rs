//! Validation rule trait.

use super::config::ValidationContext;
use super::diagnostic::{Severity, ValidationIssue};

/// A validation rule that checks one aspect of a skill's frontmatter.
///
/// Rules are stateless. All state needed for validation is passed through
/// the `ValidationContext`.
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule (e.g., "version-format")
    fn id(&self) -> &'static str;

    /// Frontmatter field the rule checks
    fn field(&self) -> &'static str;

    /// What this rule checks
    fn description(&self) -> &'static str;

    fn default_severity(&self) -> Severity;

    /// Run the check
    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue>;

    /// Issue on this rule's field at its default severity
    fn issue(&self, message: String) -> ValidationIssue {
        ValidationIssue::new(self.default_severity(), self.field(), message)
    }
}

/// A boxed validation rule for dynamic dispatch
pub type BoxedRule = Box<dyn ValidationRule>;
