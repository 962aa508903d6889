//! Protocol and shared-resource directories

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SkillsError};

/// Answers whether a protocol resource exists.
pub trait ProtocolLookup {
    fn protocol_exists(&self, name: &str) -> bool;
}

impl ProtocolLookup for HashSet<String> {
    fn protocol_exists(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Protocols stored as `<dir>/<name>.md`.
#[derive(Debug, Clone)]
pub struct ProtocolDirectory {
    root: PathBuf,
}

impl ProtocolDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Protocol names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = files_in(&self.root)
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("md"))
            .filter_map(|path| file_stem(&path))
            .collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn path(&self, name: &str) -> Option<PathBuf> {
        let path = self.root.join(format!("{name}.md"));
        path.is_file().then_some(path)
    }

    pub fn read(&self, name: &str) -> Result<String> {
        let path = self
            .path(name)
            .ok_or_else(|| SkillsError::ProtocolNotFound(format!("Protocol '{name}' not found.")))?;
        Ok(std::fs::read_to_string(path)?)
    }
}

impl ProtocolLookup for ProtocolDirectory {
    fn protocol_exists(&self, name: &str) -> bool {
        self.path(name).is_some()
    }
}

/// Files under the shared resources directory, addressed by file stem.
#[derive(Debug, Clone)]
pub struct SharedDirectory {
    root: PathBuf,
}

impl SharedDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resource names (file stems), dot-files excluded, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries().filter_map(|path| file_stem(&path)).collect();
        names.sort();
        names
    }

    /// Path of the first file whose stem is `name`.
    #[must_use]
    pub fn path(&self, name: &str) -> Option<PathBuf> {
        let mut matches: Vec<PathBuf> = self
            .entries()
            .filter(|path| file_stem(path).as_deref() == Some(name))
            .collect();
        matches.sort();
        matches.into_iter().next()
    }

    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.path(name).ok_or_else(|| {
            SkillsError::ResourceNotFound(format!("Shared resource '{name}' not found."))
        })?;
        Ok(std::fs::read_to_string(path)?)
    }

    fn entries(&self) -> impl Iterator<Item = PathBuf> {
        files_in(&self.root).filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.starts_with('.'))
        })
    }
}

fn files_in(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(String::from)
}
