use std::collections::HashSet;

use proptest::prelude::*;

use ct_skills::core::{SkillRecord, SkillRegistry, validate_skill_frontmatter};

proptest! {
    #[test]
    fn validation_is_deterministic(
        version in prop::option::of("[0-9a-z.]{0,8}"),
        tier in prop::option::of(-2i64..6),
        description in ".{0,40}",
    ) {
        let mut skill = SkillRecord::new("s", description);
        if let Some(version) = version {
            skill = skill.with_version(version);
        }
        if let Some(tier) = tier {
            skill = skill.with_tier(tier);
        }
        let registry = SkillRegistry::from_records([skill]).unwrap();
        let protocols: HashSet<String> = HashSet::new();

        let first = validate_skill_frontmatter(&registry, &protocols, "s");
        let second = validate_skill_frontmatter(&registry, &protocols, "s");
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.valid, first.error_count() == 0);
    }

    #[test]
    fn version_warning_matches_semver_shape(major in 0u32..100, minor in 0u32..100, patch in 0u32..100) {
        let version = format!("{major}.{minor}.{patch}");
        let registry = SkillRegistry::from_records([SkillRecord::new("s", "d").with_version(version)]).unwrap();
        let result = validate_skill_frontmatter(&registry, &HashSet::<String>::new(), "s");
        prop_assert!(result.issues.iter().all(|issue| issue.field != "version"));
    }
}
