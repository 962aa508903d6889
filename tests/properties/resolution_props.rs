use std::collections::HashSet;

use proptest::prelude::*;

use ct_skills::core::{
    DependencyResolver, ProfileDefinition, ProfileResolver, SkillRecord, SkillRegistry,
    StaticProfiles, resolve_dependency_tree,
};

const POOL: usize = 8;

fn skill_name(idx: usize) -> String {
    format!("ct-skill-{idx}")
}

/// Random dependency graphs over a fixed pool, cycles and dangling edges included.
fn arb_registry() -> impl Strategy<Value = SkillRegistry> {
    prop::collection::vec(prop::collection::vec(0..POOL + 2, 0..4), POOL).prop_map(|edges| {
        let records = edges.into_iter().enumerate().map(|(idx, deps)| {
            SkillRecord::new(skill_name(idx), "generated")
                .with_dependencies(deps.into_iter().map(skill_name))
        });
        SkillRegistry::from_records(records).expect("unique generated names")
    })
}

fn arb_seeds() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((0..POOL + 2).prop_map(skill_name), 0..5)
}

proptest! {
    #[test]
    fn closure_is_idempotent(registry in arb_registry(), seeds in arb_seeds()) {
        let once = resolve_dependency_tree(&registry, &seeds);
        let twice = resolve_dependency_tree(&registry, &once);
        let once_set: HashSet<&String> = once.iter().collect();
        let twice_set: HashSet<&String> = twice.iter().collect();
        prop_assert_eq!(once_set, twice_set);
    }

    #[test]
    fn closure_contains_seeds_and_their_dependencies(registry in arb_registry(), seeds in arb_seeds()) {
        let resolved = resolve_dependency_tree(&registry, &seeds);
        let set: HashSet<&str> = resolved.iter().map(String::as_str).collect();
        for seed in &seeds {
            prop_assert!(set.contains(seed.as_str()));
        }
        for name in &resolved {
            for dep in registry.dependencies_of(name) {
                prop_assert!(set.contains(dep.as_str()));
            }
        }
    }

    #[test]
    fn closure_has_no_duplicates(registry in arb_registry(), seeds in arb_seeds()) {
        let resolved = resolve_dependency_tree(&registry, &seeds);
        let unique: HashSet<&String> = resolved.iter().collect();
        prop_assert_eq!(unique.len(), resolved.len());
        // Termination bound: pool plus the dangling names
        prop_assert!(resolved.len() <= POOL + 2);
    }

    #[test]
    fn trees_terminate_on_cyclic_graphs(registry in arb_registry(), idx in 0..POOL) {
        let tree = DependencyResolver::new(&registry).tree(&skill_name(idx));
        prop_assert_eq!(tree.name, skill_name(idx));
    }

    #[test]
    fn profile_chains_terminate(parents in prop::collection::vec(0..6usize, 5)) {
        let mut profiles = StaticProfiles::new();
        for (idx, parent) in parents.iter().enumerate() {
            let name = format!("p{idx}");
            // Index 5 does not exist, which truncates the chain
            profiles = profiles.with(
                ProfileDefinition::new(name, [skill_name(idx)]).extending(format!("p{parent}")),
            );
        }
        let resolver = ProfileResolver::new(profiles);
        let chain = resolver.resolve_chain("p0").unwrap();
        prop_assert!(chain.profiles.len() <= 5);
        prop_assert!(chain.cycle || chain.truncated);
    }
}
