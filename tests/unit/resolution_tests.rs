use ct_skills::core::{
    DependencyResolver, NodeStatus, ProfileDefinition, ProfileResolver, SkillRecord,
    SkillRegistry, StaticProfiles, resolve_dependency_tree,
};
use ct_skills::test_utils::{TestCase, run_table_tests};

fn registry() -> SkillRegistry {
    SkillRegistry::from_records(vec![
        SkillRecord::new("ct-task-executor", "d"),
        SkillRecord::new("ct-research-agent", "d").with_dependencies(["ct-task-executor"]),
        SkillRecord::new("ct-spec-writer", "d").with_dependencies(["ct-research-agent"]),
        SkillRecord::new("ct-ping", "d").with_dependencies(["ct-pong"]),
        SkillRecord::new("ct-pong", "d").with_dependencies(["ct-ping"]),
        SkillRecord::new("ct-orphan", "d").with_dependencies(["ct-ghost"]),
    ])
    .unwrap()
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn dependency_closure_table() -> Result<(), String> {
    let cases = vec![
        TestCase::new("leaf", vec!["ct-task-executor"], names(&["ct-task-executor"])),
        TestCase::new(
            "chain",
            vec!["ct-spec-writer"],
            names(&["ct-spec-writer", "ct-research-agent", "ct-task-executor"]),
        ),
        TestCase::new("mutual cycle", vec!["ct-ping"], names(&["ct-ping", "ct-pong"])),
        TestCase::new("unknown seed kept", vec!["ct-ghost"], names(&["ct-ghost"])),
        TestCase::new(
            "unknown dependency kept",
            vec!["ct-orphan"],
            names(&["ct-orphan", "ct-ghost"]),
        ),
        TestCase::new(
            "overlapping seeds deduplicated",
            vec!["ct-research-agent", "ct-task-executor"],
            names(&["ct-research-agent", "ct-task-executor"]),
        ),
        TestCase::new("empty", vec![], Vec::new()),
    ];

    run_table_tests(cases, |seeds: Vec<&str>| {
        resolve_dependency_tree(&registry(), seeds)
    })
}

#[test]
fn tree_marks_missing_and_repeated_nodes() {
    let registry = registry();
    let resolver = DependencyResolver::new(&registry);

    let tree = resolver.tree("ct-orphan");
    assert_eq!(tree.status, NodeStatus::Resolved);
    assert_eq!(tree.children[0].name, "ct-ghost");
    assert_eq!(tree.children[0].status, NodeStatus::Missing);

    let tree = resolver.tree("ct-ping");
    assert_eq!(tree.children[0].name, "ct-pong");
    assert_eq!(tree.children[0].children[0].status, NodeStatus::Repeated);
    assert_eq!(tree.render(), "ct-ping\n└── ct-pong\n    └── ct-ping (*)");
}

#[test]
fn cycles_are_found_once() {
    let registry = registry();
    let cycles = DependencyResolver::new(&registry).find_cycles();
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].contains(&"ct-ping".to_string()));
    assert!(cycles[0].contains(&"ct-pong".to_string()));
}

#[test]
fn profile_chain_cycle_terminates() {
    let profiles = StaticProfiles::new()
        .with(ProfileDefinition::new("a", ["ct-task-executor"]).extending("b"))
        .with(ProfileDefinition::new("b", ["ct-spec-writer"]).extending("a"));
    let resolver = ProfileResolver::new(profiles);

    let chain = resolver.resolve_chain("a").unwrap();
    assert!(chain.cycle);
    assert_eq!(chain.profiles, vec!["a", "b"]);

    let skills = resolver.resolve_profile(&registry(), "a").unwrap();
    assert_eq!(
        skills,
        vec!["ct-task-executor", "ct-spec-writer", "ct-research-agent"]
    );
}

#[test]
fn profile_with_missing_parent_is_truncated() {
    let profiles = StaticProfiles::new()
        .with(ProfileDefinition::new("child", ["ct-task-executor"]).extending("gone"));
    let resolver = ProfileResolver::new(profiles);
    let chain = resolver.resolve_chain("child").unwrap();
    assert!(chain.truncated);
    assert_eq!(chain.skills, vec!["ct-task-executor"]);
}
