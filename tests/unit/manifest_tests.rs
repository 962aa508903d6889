use chrono::NaiveDate;
use ct_skills::library::SkillLibrary;
use ct_skills::manifest::{DispatchConfig, Manifest, build_manifest_on};

use crate::fixture_path;

fn built() -> Manifest {
    let library = SkillLibrary::open_root(fixture_path("tests/fixtures/library")).unwrap();
    let config = DispatchConfig::load(&library.paths().dispatch_config).unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    build_manifest_on(library.registry().all(), &config, date)
}

#[test]
fn meta_block_is_stamped() {
    let manifest = built();
    assert_eq!(manifest.meta.schema_version, "2.2.0");
    assert_eq!(manifest.meta.last_updated, "2026-03-01");
    assert_eq!(manifest.meta.total_skills, 5);
    assert_eq!(manifest.skills.len(), 5);
    assert_eq!(
        manifest.dispatch_matrix.by_protocol.get("research").map(String::as_str),
        Some("ct-research-agent")
    );
}

#[test]
fn overrides_merge_with_index_fields() {
    let manifest = built();
    let research = manifest
        .skills
        .iter()
        .find(|s| s.name == "ct-research-agent")
        .unwrap();
    assert_eq!(research.tags, vec!["research", "investigation"]);
    assert_eq!(research.token_budget, 8000);
    assert_eq!(research.capabilities.dependencies, vec!["ct-task-executor"]);
    assert_eq!(research.capabilities.chains_to, vec!["ct-spec-writer"]);
    assert_eq!(research.capabilities.compatible_subagent_types, vec!["general-purpose"]);
    assert_eq!(research.constraints.max_context_tokens, 80_000);
    assert!(research.constraints.requires_session);
}

#[test]
fn skills_without_overrides_get_defaults() {
    let manifest = built();
    let docs = manifest.skills.iter().find(|s| s.name == "ct-docs-write").unwrap();
    assert_eq!(docs.status, "active");
    assert_eq!(docs.token_budget, 6000);
    assert_eq!(docs.path, "skills/ct-docs-write");
    assert!(docs.tags.is_empty());
    assert_eq!(docs.constraints.max_context_tokens, 60_000);
    assert!(!docs.constraints.requires_epic);
}

#[test]
fn written_manifest_loads_back() {
    let manifest = built();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/manifest.json");
    manifest.write(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.ends_with("}\n"));
    assert!(raw.contains("\"$schema\""));
    let loaded = Manifest::load(&path).unwrap().unwrap();
    assert_eq!(loaded, manifest);
}

#[test]
fn missing_dispatch_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DispatchConfig::load(&dir.path().join("dispatch-config.json")).unwrap_err();
    assert_eq!(err.code(), "library_error");
}
