use ct_skills::core::skill::SkillCategory;
use ct_skills::library::{LibraryPaths, SkillLibrary, find_library_root};

use crate::fixture_path;

fn fixture_library() -> SkillLibrary {
    SkillLibrary::open_root(fixture_path("tests/fixtures/library")).expect("open fixture library")
}

#[test]
fn loads_index_in_order() {
    let library = fixture_library();
    assert_eq!(
        library.list_skills(),
        vec![
            "ct-task-executor",
            "ct-research-agent",
            "ct-spec-writer",
            "ct-docs-write",
            "ct-skill-creator",
        ]
    );
}

#[test]
fn typed_fields_are_available() {
    let library = fixture_library();
    let skill = library.get_skill("ct-research-agent").unwrap();
    assert!(skill.is_core());
    assert_eq!(skill.tier(), Some(1));
    assert_eq!(skill.category(), Some(SkillCategory::Core));
    assert_eq!(skill.protocol_name(), Some("research"));
    assert_eq!(skill.shared_resources, vec!["task-system-integration"]);

    let docs = library.get_skill("ct-docs-write").unwrap();
    assert_eq!(docs.protocol_name(), None);
}

#[test]
fn unknown_skill_lookup() {
    let library = fixture_library();
    assert!(library.get_skill("ct-nope").is_none());
    let err = library.require_skill("ct-nope").unwrap_err();
    assert_eq!(err.code(), "skill_not_found");
    assert!(err.to_string().contains("ct-skill-creator"));
}

#[test]
fn skill_paths_and_content() {
    let library = fixture_library();
    let path = library.skill_path("ct-task-executor");
    assert!(path.ends_with("skills/ct-task-executor/SKILL.md"));
    let content = library.read_skill_content("ct-task-executor").unwrap();
    assert!(content.contains("# Task Executor"));

    let err = library.read_skill_content("ct-docs-write").unwrap_err();
    assert_eq!(err.code(), "skill_not_found");
}

#[test]
fn protocols_and_shared_resources() {
    let library = fixture_library();
    assert_eq!(
        library.protocols().list(),
        vec!["implementation", "research", "specification"]
    );
    assert!(library.protocols().read("research").unwrap().starts_with("# Research Protocol"));
    assert_eq!(
        library.shared().list(),
        vec!["placeholders", "task-system-integration"]
    );
    let placeholders = library.placeholders().unwrap();
    assert_eq!(placeholders["required"][0], "TASK_ID");
}

#[test]
fn manifest_dispatch_matrix() {
    let library = fixture_library();
    let matrix = library.dispatch_matrix();
    assert_eq!(
        matrix.by_task_type.get("research").map(String::as_str),
        Some("ct-research-agent")
    );
    assert_eq!(matrix.by_keyword.len(), 2);
}

#[test]
fn profiles_resolve_through_extends() {
    let library = fixture_library();
    assert_eq!(
        library.profiles().list_profiles().unwrap(),
        vec!["core", "full", "minimal"]
    );
    let full = library.resolve_profile("full").unwrap();
    assert_eq!(full.len(), 5);
    assert_eq!(full[0], "ct-spec-writer");

    let chain = library.profiles().resolve_chain("full").unwrap();
    assert_eq!(chain.profiles, vec!["full", "core", "minimal"]);
    assert!(!chain.cycle);
    assert!(!chain.truncated);

    assert_eq!(library.require_profile("nope").unwrap_err().code(), "profile_not_found");
    assert!(library.resolve_profile("nope").unwrap().is_empty());
}

#[test]
fn library_root_is_found_from_nested_dir() {
    let root = fixture_path("tests/fixtures/library");
    let nested = root.join("skills/ct-task-executor");
    assert_eq!(find_library_root(&nested), Some(root));
}

#[test]
fn missing_manifest_and_placeholders_are_optional() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("skills.json"), r#"{"skills": []}"#).unwrap();
    let library = SkillLibrary::open(LibraryPaths::new(dir.path())).unwrap();
    assert!(library.manifest().is_none());
    assert!(library.placeholders().is_none());
    assert!(library.dispatch_matrix().is_empty());
    assert!(library.list_skills().is_empty());
}

#[test]
fn duplicate_skill_names_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("skills.json"),
        r#"{"skills": [{"name": "a", "description": "x"}, {"name": "a", "description": "y"}]}"#,
    )
    .unwrap();
    let err = SkillLibrary::open_root(dir.path()).err().unwrap();
    assert_eq!(err.code(), "duplicate_skill");
}
