use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Index used by `LibraryFixture::sample`.
pub const SAMPLE_INDEX: &str = r#"{
  "skills": [
    {"name": "ct-task-executor", "description": "Executes a single task end to end", "version": "1.2.0",
     "core": true, "category": "core", "tier": 0, "protocol": "implementation"},
    {"name": "ct-research-agent", "description": "Gathers sources and writes findings", "version": "1.0.0",
     "core": true, "category": "core", "tier": 1, "protocol": "research",
     "dependencies": ["ct-task-executor"]},
    {"name": "ct-epic-architect", "description": "Decomposes epics into tasks", "version": "2.0.0",
     "category": "recommended", "tier": 2, "protocol": "decomposition",
     "dependencies": ["ct-research-agent"]},
    {"name": "ct-docs-write", "description": "Writes documentation", "version": "1.0.0",
     "category": "specialist", "tier": 3}
  ]
}"#;

/// Tempdir-backed skills library tree.
pub struct LibraryFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for LibraryFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryFixture {
    /// Empty library directory (no index).
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Library with `SAMPLE_INDEX`, two chained profiles and two protocols.
    #[must_use]
    pub fn sample() -> Self {
        let fixture = Self::new();
        fixture.write_skills_index(SAMPLE_INDEX);
        fixture.write_profile(
            "minimal",
            r#"{"name": "minimal", "description": "Core only", "skills": ["ct-task-executor"]}"#,
        );
        fixture.write_profile(
            "full",
            r#"{"name": "full", "description": "Everything", "extends": "minimal",
                "skills": ["ct-epic-architect", "ct-docs-write"]}"#,
        );
        fixture.write_protocol("research", "# Research protocol\n");
        fixture.write_protocol("implementation", "# Implementation protocol\n");
        fixture
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a file (and its parents) under the root.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn write_skills_index(&self, content: &str) {
        self.create_file("skills.json", content);
    }

    pub fn write_profile(&self, name: &str, content: &str) {
        self.create_file(&format!("profiles/{name}.json"), content);
    }

    pub fn write_protocol(&self, name: &str, content: &str) {
        self.create_file(&format!("protocols/{name}.md"), content);
    }

    pub fn write_skill_md(&self, name: &str, content: &str) {
        self.create_file(&format!("skills/{name}/SKILL.md"), content);
    }

    pub fn write_dispatch_config(&self, content: &str) {
        self.create_file("dispatch-config.json", content);
    }
}
