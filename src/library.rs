//! On-disk skills library: layout resolution and loading

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::PathsConfig;
use crate::core::dependencies::DependencyResolver;
use crate::core::profile::{ProfileDefinition, ProfileDirectory, ProfileResolver};
use crate::core::registry::SkillRegistry;
use crate::core::resources::{ProtocolDirectory, SharedDirectory};
use crate::core::skill::{SkillRecord, SkillsIndex};
use crate::error::{Result, SkillsError};
use crate::manifest::{DispatchMatrix, Manifest};

/// File whose presence marks a directory as a library root
pub const INDEX_FILE: &str = "skills.json";

/// Absolute locations of every library component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    pub root: PathBuf,
    pub skills_index: PathBuf,
    pub skills_dir: PathBuf,
    pub manifest: PathBuf,
    pub shared_dir: PathBuf,
    pub placeholders: PathBuf,
    pub profiles_dir: PathBuf,
    pub protocols_dir: PathBuf,
    pub dispatch_config: PathBuf,
}

impl LibraryPaths {
    /// Default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, &PathsConfig::default())
    }

    /// Layout under `root` with configured (possibly absolute) overrides.
    pub fn from_config(root: impl Into<PathBuf>, paths: &PathsConfig) -> Self {
        let root = root.into();
        let at = |path: &Path| root.join(path);
        Self {
            skills_index: at(&paths.skills_index),
            skills_dir: at(&paths.skills_dir),
            manifest: at(&paths.manifest),
            shared_dir: at(&paths.shared_dir),
            placeholders: at(&paths.placeholders),
            profiles_dir: at(&paths.profiles_dir),
            protocols_dir: at(&paths.protocols_dir),
            dispatch_config: at(&paths.dispatch_config),
            root,
        }
    }
}

/// A loaded skills library.
///
/// The index is required; manifest and placeholders are optional. Profiles
/// load lazily through the resolver.
pub struct SkillLibrary {
    paths: LibraryPaths,
    registry: SkillRegistry,
    manifest: Option<Manifest>,
    placeholders: Option<serde_json::Value>,
    protocols: ProtocolDirectory,
    shared: SharedDirectory,
    profiles: ProfileResolver<ProfileDirectory>,
}

impl SkillLibrary {
    pub fn open(paths: LibraryPaths) -> Result<Self> {
        let registry = load_index(&paths.skills_index)?;
        debug!(target: "library", root = %paths.root.display(), skills = registry.len(), "loaded skills index");

        let manifest = Manifest::load(&paths.manifest)?;
        if manifest.is_none() {
            debug!(target: "library", path = %paths.manifest.display(), "no manifest");
        }

        let placeholders = load_optional_json(&paths.placeholders)?;
        if placeholders.is_none() {
            debug!(target: "library", path = %paths.placeholders.display(), "no placeholders");
        }

        Ok(Self {
            protocols: ProtocolDirectory::new(&paths.protocols_dir),
            shared: SharedDirectory::new(&paths.shared_dir),
            profiles: ProfileResolver::new(ProfileDirectory::new(&paths.profiles_dir)),
            registry,
            manifest,
            placeholders,
            paths,
        })
    }

    /// Open the library at `root` with the default layout.
    pub fn open_root(root: impl Into<PathBuf>) -> Result<Self> {
        Self::open(LibraryPaths::new(root))
    }

    #[must_use]
    pub const fn paths(&self) -> &LibraryPaths {
        &self.paths
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    #[must_use]
    pub const fn registry(&self) -> &SkillRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// Parsed `placeholders.json`
    #[must_use]
    pub const fn placeholders(&self) -> Option<&serde_json::Value> {
        self.placeholders.as_ref()
    }

    #[must_use]
    pub const fn protocols(&self) -> &ProtocolDirectory {
        &self.protocols
    }

    #[must_use]
    pub const fn shared(&self) -> &SharedDirectory {
        &self.shared
    }

    #[must_use]
    pub const fn profiles(&self) -> &ProfileResolver<ProfileDirectory> {
        &self.profiles
    }

    #[must_use]
    pub fn list_skills(&self) -> Vec<&str> {
        self.registry.names()
    }

    #[must_use]
    pub fn get_skill(&self, name: &str) -> Option<&SkillRecord> {
        self.registry.get(name)
    }

    /// Like `get_skill`, but an unknown name is an error listing what exists.
    pub fn require_skill(&self, name: &str) -> Result<&SkillRecord> {
        self.registry.get(name).ok_or_else(|| {
            SkillsError::SkillNotFound(format!(
                "Skill '{name}' not found. Available: {}",
                self.registry.names().join(", ")
            ))
        })
    }

    #[must_use]
    pub fn skill_dir(&self, name: &str) -> PathBuf {
        self.paths.skills_dir.join(name)
    }

    #[must_use]
    pub fn skill_path(&self, name: &str) -> PathBuf {
        self.skill_dir(name).join("SKILL.md")
    }

    pub fn read_skill_content(&self, name: &str) -> Result<String> {
        let path = self.skill_path(name);
        std::fs::read_to_string(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SkillsError::SkillNotFound(format!("SKILL.md not found for '{name}': {}", path.display()))
            } else {
                SkillsError::Io(err)
            }
        })
    }

    /// The manifest's dispatch matrix; empty when there is no manifest.
    #[must_use]
    pub fn dispatch_matrix(&self) -> DispatchMatrix {
        self.manifest
            .as_ref()
            .map(|m| m.dispatch_matrix.clone())
            .unwrap_or_default()
    }

    /// Transitive closure of `names` over this library's registry.
    pub fn resolve_dependency_tree<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        DependencyResolver::new(&self.registry).resolve(names)
    }

    pub fn resolve_profile(&self, name: &str) -> Result<Vec<String>> {
        self.profiles.resolve_profile(&self.registry, name)
    }

    /// Profile definition; an unknown name is an error listing what exists.
    pub fn require_profile(&self, name: &str) -> Result<ProfileDefinition> {
        match self.profiles.get_profile(name)? {
            Some(profile) => Ok(profile),
            None => Err(SkillsError::ProfileNotFound(format!(
                "Profile '{name}' not found. Available: {}",
                self.profiles.list_profiles()?.join(", ")
            ))),
        }
    }
}

/// Find the nearest ancestor of `start` (inclusive) holding `skills.json`.
#[must_use]
pub fn find_library_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(INDEX_FILE).is_file() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

fn load_index(path: &Path) -> Result<SkillRegistry> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            SkillsError::Library(format!("skills index not found: {}", path.display()))
        } else {
            SkillsError::Io(err)
        }
    })?;
    let index: SkillsIndex = serde_json::from_str(&raw)
        .map_err(|err| SkillsError::Library(format!("parse {}: {err}", path.display())))?;
    SkillRegistry::from_records(index.skills)
}

fn load_optional_json(path: &Path) -> Result<Option<serde_json::Value>> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| SkillsError::Library(format!("parse {}: {err}", path.display())))
}
