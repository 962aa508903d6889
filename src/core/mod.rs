//! Core skill types and logic

pub mod dependencies;
pub mod profile;
pub mod registry;
pub mod resources;
pub mod skill;
pub mod validation;

pub use dependencies::{DependencyNode, DependencyResolver, NodeStatus, resolve_dependency_tree};
pub use profile::{
    ProfileChain, ProfileDefinition, ProfileDirectory, ProfileResolver, ProfileSource,
    StaticProfiles,
};
pub use registry::{SkillQuery, SkillRegistry};
pub use resources::{ProtocolDirectory, ProtocolLookup, SharedDirectory};
pub use skill::{FieldValue, SkillCategory, SkillRecord, SkillsIndex};
pub use validation::{validate_all, validate_skill_frontmatter};
