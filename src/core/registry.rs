//! Skill registry: the in-memory store of index entries

use std::collections::HashMap;

use super::skill::{SkillCategory, SkillRecord};
use crate::error::{Result, SkillsError};

/// Name-indexed, insertion-ordered collection of skill records.
///
/// Built once from the skills index and read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct SkillRegistry {
    skills: Vec<SkillRecord>,
    by_name: HashMap<String, usize>,
}

impl SkillRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting duplicate names.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = SkillRecord>,
    {
        let mut registry = Self::new();
        for record in records {
            registry.insert(record)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, record: SkillRecord) -> Result<()> {
        if self.by_name.contains_key(&record.name) {
            return Err(SkillsError::DuplicateSkill(record.name));
        }
        self.by_name.insert(record.name.clone(), self.skills.len());
        self.skills.push(record);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SkillRecord> {
        self.by_name.get(name).map(|&idx| &self.skills[idx])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    #[must_use]
    pub fn all(&self) -> &[SkillRecord] {
        &self.skills
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.skills.iter().map(|s| s.name.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Direct dependencies of `name`; empty when the name is unknown.
    #[must_use]
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.get(name)
            .map(SkillRecord::dependencies)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn core_skills(&self) -> Vec<&SkillRecord> {
        self.skills.iter().filter(|s| s.is_core()).collect()
    }

    #[must_use]
    pub fn by_category(&self, category: SkillCategory) -> Vec<&SkillRecord> {
        self.skills
            .iter()
            .filter(|s| s.category() == Some(category))
            .collect()
    }

    /// Apply every filter of `query`; filters compose with AND.
    #[must_use]
    pub fn search(&self, query: &SkillQuery) -> Vec<&SkillRecord> {
        let mut results: Vec<&SkillRecord> = self.skills.iter().collect();

        if query.core_only {
            results.retain(|s| s.is_core());
        }

        if let Some(category) = query.category {
            results.retain(|s| s.category() == Some(category));
        }

        if let Some(allowed) = &query.names {
            results.retain(|s| allowed.iter().any(|n| n == &s.name));
        }

        results
    }
}

#[derive(Debug, Default, Clone)]
pub struct SkillQuery {
    pub core_only: bool,
    pub category: Option<SkillCategory>,
    /// Restrict to these names (e.g. a resolved profile)
    pub names: Option<Vec<String>>,
}
