//! Frontmatter validation framework.
//!
//! - `ValidationRule` trait, one implementation per checked field
//! - `ValidationEngine` runs the rules against registry entries
//! - `ValidationIssue` / `Severity` describe what was found
//! - `ValidationConfig` toggles strict mode, disabled rules and limits
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//! use ct_skills::core::registry::SkillRegistry;
//! use ct_skills::core::skill::SkillRecord;
//! use ct_skills::lint::ValidationEngine;
//!
//! let registry = SkillRegistry::from_records(vec![
//!     SkillRecord::new("ct-docs-write", "Writes docs").with_version("1.0.0"),
//! ])
//! .unwrap();
//! let protocols: HashSet<String> = HashSet::new();
//!
//! let engine = ValidationEngine::with_defaults();
//! let result = engine.validate("ct-docs-write", &registry, &protocols);
//! assert!(result.valid);
//! ```

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod rule;
pub mod rules;

pub use config::{DEFAULT_MAX_DESCRIPTION_LEN, ValidationConfig, ValidationContext};
pub use diagnostic::{Severity, ValidationIssue};
pub use engine::{RuleInfo, ValidationEngine, ValidationReport, ValidationResult};
pub use rule::{BoxedRule, ValidationRule};
