use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillsError};
use crate::lint::{DEFAULT_MAX_DESCRIPTION_LEN, ValidationConfig};

/// File name of the per-library config, looked up at the library root
pub const PROJECT_CONFIG_FILE: &str = "ct-skills.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub install: InstallConfig,
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("CT_SKILLS_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                SkillsError::MissingConfig(format!("config file {} not found", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Parse a single TOML document on top of the defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| SkillsError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("ct-skills/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join(PROJECT_CONFIG_FILE))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkillsError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw).map_err(|err| {
            SkillsError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.install {
            self.install.merge(patch);
        }
        if let Some(patch) = patch.validation {
            self.validation.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `CT_SKILLS_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("CT_SKILLS_INSTALL_TOOL") {
            self.install.tool = value;
        }
        if let Some(value) = lookup("CT_SKILLS_DEFAULT_PROFILE") {
            self.install.default_profile = value;
        }

        if let Some(value) = parse_usize(&lookup, "CT_SKILLS_MAX_DESCRIPTION_LEN")? {
            self.validation.max_description_len = value;
        }
        if let Some(value) = lookup("CT_SKILLS_VALIDATION_STRICT") {
            self.validation.strict = parse_bool(&value);
        }

        if let Some(value) = lookup("CT_SKILLS_OUTPUT_FORMAT") {
            self.output.format = value;
        }

        if let Some(value) = lookup("CT_SKILLS_PROFILES_DIR") {
            self.paths.profiles_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("CT_SKILLS_PROTOCOLS_DIR") {
            self.paths.protocols_dir = PathBuf::from(value);
        }

        Ok(())
    }
}

/// Library layout, relative to the library root unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub skills_index: PathBuf,
    pub skills_dir: PathBuf,
    pub manifest: PathBuf,
    pub shared_dir: PathBuf,
    pub placeholders: PathBuf,
    pub profiles_dir: PathBuf,
    pub protocols_dir: PathBuf,
    pub dispatch_config: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            skills_index: PathBuf::from("skills.json"),
            skills_dir: PathBuf::from("skills"),
            manifest: PathBuf::from("skills/manifest.json"),
            shared_dir: PathBuf::from("skills/_shared"),
            placeholders: PathBuf::from("skills/_shared/placeholders.json"),
            profiles_dir: PathBuf::from("profiles"),
            protocols_dir: PathBuf::from("protocols"),
            dispatch_config: PathBuf::from("dispatch-config.json"),
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.skills_index {
            self.skills_index = value;
        }
        if let Some(value) = patch.skills_dir {
            self.skills_dir = value;
        }
        if let Some(value) = patch.manifest {
            self.manifest = value;
        }
        if let Some(value) = patch.shared_dir {
            self.shared_dir = value;
        }
        if let Some(value) = patch.placeholders {
            self.placeholders = value;
        }
        if let Some(value) = patch.profiles_dir {
            self.profiles_dir = value;
        }
        if let Some(value) = patch.protocols_dir {
            self.protocols_dir = value;
        }
        if let Some(value) = patch.dispatch_config {
            self.dispatch_config = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// External installer invoked by `install --exec`
    pub tool: String,
    pub default_profile: String,
    /// Extra arguments appended after the skill names
    pub extra_args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            tool: "caamp".to_string(),
            default_profile: "full".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl InstallConfig {
    fn merge(&mut self, patch: InstallPatch) {
        if let Some(value) = patch.tool {
            self.tool = value;
        }
        if let Some(value) = patch.default_profile {
            self.default_profile = value;
        }
        if let Some(values) = patch.extra_args {
            self.extra_args = values;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    pub max_description_len: usize,
    pub strict: bool,
    pub disabled_rules: Vec<String>,
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            strict: false,
            disabled_rules: Vec::new(),
        }
    }
}

impl ValidationSection {
    fn merge(&mut self, patch: ValidationPatch) {
        if let Some(value) = patch.max_description_len {
            self.max_description_len = value;
        }
        if let Some(value) = patch.strict {
            self.strict = value;
        }
        if let Some(values) = patch.disabled_rules {
            self.disabled_rules = merge_unique(values, &self.disabled_rules);
        }
    }

    /// Engine settings; `force_strict` comes from `--strict`.
    #[must_use]
    pub fn to_engine_config(&self, force_strict: bool) -> ValidationConfig {
        ValidationConfig {
            disabled_rules: self.disabled_rules.iter().cloned().collect(),
            strict: self.strict || force_strict,
            max_description_len: self.max_description_len,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// human, json, jsonl or plain
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub install: Option<InstallPatch>,
    pub validation: Option<ValidationPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub skills_index: Option<PathBuf>,
    pub skills_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub shared_dir: Option<PathBuf>,
    pub placeholders: Option<PathBuf>,
    pub profiles_dir: Option<PathBuf>,
    pub protocols_dir: Option<PathBuf>,
    pub dispatch_config: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct InstallPatch {
    pub tool: Option<String>,
    pub default_profile: Option<String>,
    pub extra_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ValidationPatch {
    pub max_description_len: Option<usize>,
    pub strict: Option<bool>,
    pub disabled_rules: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub format: Option<String>,
}

fn merge_unique(values: Vec<String>, existing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values.into_iter().chain(existing.iter().cloned()) {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_usize<F>(lookup: &F, key: &str) -> Result<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| SkillsError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
