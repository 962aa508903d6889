//! Install profiles: named skill selections with `extends` inheritance

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use super::dependencies::DependencyResolver;
use super::registry::SkillRegistry;
use crate::error::{Result, SkillsError};

/// A profile definition (`profiles/<name>.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub include_shared: bool,
    #[serde(default)]
    pub include_protocols: Vec<String>,
}

impl ProfileDefinition {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            skills: skills.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }
}

/// Where profile definitions come from.
pub trait ProfileSource {
    /// Fetch one definition; `Ok(None)` when it does not exist.
    fn fetch(&self, name: &str) -> Result<Option<ProfileDefinition>>;

    /// Names of every available profile.
    fn names(&self) -> Result<Vec<String>>;
}

/// Profiles stored as `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct ProfileDirectory {
    root: PathBuf,
}

impl ProfileDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ProfileSource for ProfileDirectory {
    fn fetch(&self, name: &str) -> Result<Option<ProfileDefinition>> {
        // Names are file stems inside the profiles directory, never paths
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            debug!(target: "profile", profile = name, "rejected profile name");
            return Ok(None);
        }
        let path = self.root.join(format!("{name}.json"));
        if !path.is_file() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .map_err(|err| SkillsError::Library(format!("read profile {}: {err}", path.display())))?;
        let profile = serde_json::from_str(&raw).map_err(|err| {
            SkillsError::Library(format!("parse profile {}: {err}", path.display()))
        })?;
        Ok(Some(profile))
    }

    fn names(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    return None;
                }
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(String::from)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

/// In-memory profile set, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles {
    profiles: HashMap<String, ProfileDefinition>,
}

impl StaticProfiles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, profile: ProfileDefinition) -> Self {
        self.profiles.insert(profile.name.clone(), profile);
        self
    }
}

impl ProfileSource for StaticProfiles {
    fn fetch(&self, name: &str) -> Result<Option<ProfileDefinition>> {
        Ok(self.profiles.get(name).cloned())
    }

    fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// The `extends` chain walked from one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileChain {
    /// Profiles visited, starting with the requested one
    pub profiles: Vec<String>,
    /// Union of the visited profiles' skills, first occurrence order
    pub skills: Vec<String>,
    /// The chain pointed back at an already-visited profile
    pub cycle: bool,
    /// A profile in the chain does not exist
    pub truncated: bool,
}

/// Resolves profiles to skill sets.
///
/// Owns a lazily populated name→definition cache; definitions are fetched
/// from the source at most once.
pub struct ProfileResolver<S> {
    source: S,
    cache: RefCell<HashMap<String, ProfileDefinition>>,
}

impl<S: ProfileSource> ProfileResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub fn list_profiles(&self) -> Result<Vec<String>> {
        self.source.names()
    }

    /// Cached lookup of one definition.
    pub fn get_profile(&self, name: &str) -> Result<Option<ProfileDefinition>> {
        if let Some(profile) = self.cache.borrow().get(name) {
            return Ok(Some(profile.clone()));
        }

        let Some(profile) = self.source.fetch(name)? else {
            return Ok(None);
        };
        debug!(target: "profile", profile = name, "loaded profile definition");
        self.cache
            .borrow_mut()
            .insert(name.to_string(), profile.clone());
        Ok(Some(profile))
    }

    /// Walk the `extends` chain from `name`, unioning skill lists.
    ///
    /// A missing profile ends the chain; so does a repeat visit.
    pub fn resolve_chain(&self, name: &str) -> Result<ProfileChain> {
        let mut chain = ProfileChain::default();
        let mut visited: HashSet<String> = HashSet::new();
        let mut seen_skills: HashSet<String> = HashSet::new();
        let mut current = Some(name.to_string());

        while let Some(profile_name) = current.take() {
            if !visited.insert(profile_name.clone()) {
                debug!(target: "profile", profile = %profile_name, "extends cycle detected");
                chain.cycle = true;
                break;
            }

            let Some(profile) = self.get_profile(&profile_name)? else {
                debug!(target: "profile", profile = %profile_name, "profile not found");
                chain.truncated = true;
                break;
            };
            chain.profiles.push(profile_name);

            for skill in profile.skills {
                if seen_skills.insert(skill.clone()) {
                    chain.skills.push(skill);
                }
            }
            current = profile.extends.filter(|parent| !parent.is_empty());
        }

        Ok(chain)
    }

    /// Every skill a profile selects, including transitive dependencies.
    pub fn resolve_profile(&self, registry: &SkillRegistry, name: &str) -> Result<Vec<String>> {
        let chain = self.resolve_chain(name)?;
        Ok(DependencyResolver::new(registry).resolve(&chain.skills))
    }
}
