use std::collections::HashSet;

use ct_skills::core::{SkillRecord, SkillRegistry, validate_all, validate_skill_frontmatter};
use ct_skills::library::SkillLibrary;
use ct_skills::lint::{Severity, ValidationConfig, ValidationEngine};
use ct_skills::test_utils::{TestCase, run_table_tests};

use crate::fixture_path;

fn protocols() -> HashSet<String> {
    ["research".to_string(), "implementation".to_string()]
        .into_iter()
        .collect()
}

fn registry_from(raw: &str) -> SkillRegistry {
    let index: ct_skills::core::SkillsIndex = serde_json::from_str(raw).unwrap();
    SkillRegistry::from_records(index.skills).unwrap()
}

/// (field, level) pairs for the single skill `s` in `raw`.
fn issues_for(raw: &str) -> Vec<(String, Severity)> {
    let registry = registry_from(raw);
    validate_skill_frontmatter(&registry, &protocols(), "s")
        .issues
        .into_iter()
        .map(|issue| (issue.field, issue.severity))
        .collect()
}

#[test]
fn fixture_library_is_clean() {
    let library = SkillLibrary::open_root(fixture_path("tests/fixtures/library")).unwrap();
    let report = validate_all(library.registry(), library.protocols());
    assert_eq!(report.len(), 5);
    assert_eq!(report.valid_count(), 5);
    assert!(report.iter().all(|(_, result)| result.issues.is_empty()));
}

#[test]
fn tier_boundaries() -> Result<(), String> {
    let cases = vec![
        TestCase::new("zero", r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","tier":0}]}"#, vec![]),
        TestCase::new("three", r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","tier":3}]}"#, vec![]),
        TestCase::new("whole float", r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","tier":2.0}]}"#, vec![]),
        TestCase::new("fraction", r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","tier":2.5}]}"#, vec![]),
        TestCase::new(
            "null",
            r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","tier":null}]}"#,
            vec![("tier".to_string(), Severity::Warn)],
        ),
        TestCase::new(
            "four",
            r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","tier":4}]}"#,
            vec![("tier".to_string(), Severity::Warn)],
        ),
        TestCase::new(
            "negative",
            r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","tier":-1}]}"#,
            vec![("tier".to_string(), Severity::Warn)],
        ),
        TestCase::new(
            "string",
            r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","tier":"2"}]}"#,
            vec![("tier".to_string(), Severity::Warn)],
        ),
    ];
    run_table_tests(cases, issues_for)
}

#[test]
fn version_boundaries() -> Result<(), String> {
    let cases = vec![
        TestCase::new("semver", r#"{"skills":[{"name":"s","description":"d","version":"10.20.30"}]}"#, vec![]),
        TestCase::new(
            "missing",
            r#"{"skills":[{"name":"s","description":"d"}]}"#,
            vec![("version".to_string(), Severity::Warn)],
        ),
        TestCase::new(
            "two parts",
            r#"{"skills":[{"name":"s","description":"d","version":"1.0"}]}"#,
            vec![("version".to_string(), Severity::Warn)],
        ),
        TestCase::new(
            "prerelease",
            r#"{"skills":[{"name":"s","description":"d","version":"1.0.0-beta"}]}"#,
            vec![("version".to_string(), Severity::Warn)],
        ),
    ];
    run_table_tests(cases, issues_for)
}

#[test]
fn type_errors_are_reported_not_fatal() {
    let issues = issues_for(
        r#"{"skills":[{"name":"s","description":"d","version":"1.0.0","core":"yes","category":"misc"}]}"#,
    );
    assert_eq!(
        issues,
        vec![
            ("category".to_string(), Severity::Error),
            ("core".to_string(), Severity::Error),
        ]
    );
}

#[test]
fn unknown_skill_yields_single_name_error() {
    let registry = registry_from(r#"{"skills":[]}"#);
    let result = validate_skill_frontmatter(&registry, &protocols(), "ct-nope");
    assert!(!result.valid);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].field, "name");
    assert_eq!(result.issues[0].message, "Skill 'ct-nope' not found");
}

#[test]
fn dependency_and_protocol_references() {
    let registry = SkillRegistry::from_records(vec![
        SkillRecord::new("a", "d")
            .with_version("1.0.0")
            .with_dependencies(["b", "ghost"])
            .with_protocol("consensus"),
        SkillRecord::new("b", "d").with_version("1.0.0").with_protocol("research"),
    ])
    .unwrap();

    let a = validate_skill_frontmatter(&registry, &protocols(), "a");
    assert!(!a.valid);
    let messages: Vec<&str> = a.issues.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Unknown dependency: ghost", "Protocol file not found: consensus.md"]
    );
    assert_eq!(a.error_count(), 1);
    assert_eq!(a.warning_count(), 1);

    assert!(validate_skill_frontmatter(&registry, &protocols(), "b").valid);
}

#[test]
fn validation_is_deterministic() {
    let registry = registry_from(
        r#"{"skills":[{"name":"s","description":"","version":"x","tier":9,"dependencies":["q"]}]}"#,
    );
    let first = validate_skill_frontmatter(&registry, &protocols(), "s");
    let second = validate_skill_frontmatter(&registry, &protocols(), "s");
    assert_eq!(first, second);
}

#[test]
fn engine_config_controls_rules_and_severity() {
    let registry = registry_from(r#"{"skills":[{"name":"s","description":"d"}]}"#);

    let strict = ValidationEngine::new(ValidationConfig::new().strict());
    let result = strict.validate("s", &registry, &protocols());
    assert!(!result.valid);
    assert_eq!(result.errors().next().unwrap().field, "version");

    let relaxed = ValidationEngine::new(ValidationConfig::new().disable_rule("version-format"));
    assert!(relaxed.validate("s", &registry, &protocols()).issues.is_empty());

    let rules = relaxed.list_rules();
    assert!(rules.iter().any(|r| r.id == "version-format" && r.disabled));
}
