use std::collections::HashMap;
use std::fs;

use ct_skills::config::Config;
use ct_skills::test_utils::{TestCase, run_table_tests};

use crate::fixture_path;

#[test]
fn config_sections_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase::new(
            "default",
            "tests/fixtures/configs/default.toml",
            ("caamp".to_string(), "full".to_string(), 1024usize, false, "human".to_string()),
        ),
        TestCase::new(
            "custom",
            "tests/fixtures/configs/custom.toml",
            ("skillpm".to_string(), "minimal".to_string(), 40usize, true, "plain".to_string()),
        ),
    ];

    run_table_tests(cases, |relative_path| {
        let content = fs::read_to_string(fixture_path(relative_path)).expect("read fixture");
        let config = Config::from_toml(&content).expect("parse config");
        (
            config.install.tool,
            config.install.default_profile,
            config.validation.max_description_len,
            config.validation.strict,
            config.output.format,
        )
    })
}

#[test]
fn custom_config_disables_rules_and_adds_args() {
    let content = fs::read_to_string(fixture_path("tests/fixtures/configs/custom.toml")).unwrap();
    let config = Config::from_toml(&content).unwrap();
    assert_eq!(config.install.extra_args, vec!["--yes"]);

    let engine_config = config.validation.to_engine_config(false);
    assert!(engine_config.strict);
    assert!(engine_config.is_rule_disabled("protocol-exists"));
    assert_eq!(engine_config.max_description_len, 40);
}

#[test]
fn path_overrides_keep_unset_defaults() {
    let content = fs::read_to_string(fixture_path("tests/fixtures/configs/paths.toml")).unwrap();
    let config = Config::from_toml(&content).unwrap();
    assert_eq!(config.paths.profiles_dir.to_str(), Some("config/profiles"));
    assert_eq!(config.paths.protocols_dir.to_str(), Some("docs/protocols"));
    assert_eq!(config.paths.skills_index.to_str(), Some("skills.json"));
}

#[test]
fn env_overrides_apply_over_file_values() {
    let content = fs::read_to_string(fixture_path("tests/fixtures/configs/custom.toml")).unwrap();
    let mut config = Config::from_toml(&content).unwrap();
    let env: HashMap<&str, &str> = HashMap::from([
        ("CT_SKILLS_INSTALL_TOOL", "caamp"),
        ("CT_SKILLS_VALIDATION_STRICT", "false"),
        ("CT_SKILLS_MAX_DESCRIPTION_LEN", "2048"),
    ]);
    config
        .apply_overrides(|key| env.get(key).map(ToString::to_string))
        .unwrap();

    assert_eq!(config.install.tool, "caamp");
    assert!(!config.validation.strict);
    assert_eq!(config.validation.max_description_len, 2048);
    assert_eq!(config.install.default_profile, "minimal");
}

#[test]
fn invalid_numeric_env_is_config_error() {
    let mut config = Config::default();
    let err = config
        .apply_overrides(|key| (key == "CT_SKILLS_MAX_DESCRIPTION_LEN").then(|| "lots".to_string()))
        .unwrap_err();
    assert_eq!(err.code(), "config_error");
}

#[test]
fn explicit_missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = Config::load(Some(&missing), dir.path()).unwrap_err();
    assert_eq!(err.code(), "missing_config");
}
