//! Dependency closure over the skill registry

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use super::registry::SkillRegistry;

/// Transitive closure of `names`, including the names themselves.
pub fn resolve_dependency_tree<I, S>(registry: &SkillRegistry, names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DependencyResolver::new(registry).resolve(names)
}

/// Resolves transitive skill dependencies against a registry.
///
/// Unknown names and cycles are not errors: unknown names contribute no
/// edges, and the `resolved` set guards against revisiting.
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    registry: &'a SkillRegistry,
}

impl<'a> DependencyResolver<'a> {
    #[must_use]
    pub const fn new(registry: &'a SkillRegistry) -> Self {
        Self { registry }
    }

    /// Breadth-first closure of `seeds`, in first-resolution order.
    ///
    /// Every seed appears in the output, registered or not.
    pub fn resolve<I, S>(&self, seeds: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved: HashSet<String> = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<String> = seeds
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();

        while let Some(current) = queue.pop_front() {
            if !resolved.insert(current.clone()) {
                continue;
            }

            for dep in self.registry.dependencies_of(&current) {
                if !resolved.contains(dep) {
                    queue.push_back(dep.clone());
                }
            }
            order.push(current);
        }

        order
    }

    /// Dependency tree rooted at `name`, each node expanded once.
    #[must_use]
    pub fn tree(&self, name: &str) -> DependencyNode {
        let mut expanded = HashSet::new();
        self.build_node(name, &mut expanded)
    }

    fn build_node(&self, name: &str, expanded: &mut HashSet<String>) -> DependencyNode {
        let known = self.registry.contains(name);
        if !expanded.insert(name.to_string()) {
            return DependencyNode {
                name: name.to_string(),
                status: NodeStatus::Repeated,
                children: Vec::new(),
            };
        }

        let children = self
            .registry
            .dependencies_of(name)
            .iter()
            .map(|dep| self.build_node(dep, expanded))
            .collect();

        DependencyNode {
            name: name.to_string(),
            status: if known {
                NodeStatus::Resolved
            } else {
                NodeStatus::Missing
            },
            children,
        }
    }

    /// Dependency cycles across the whole registry.
    ///
    /// Each cycle is reported once, as the path from its first-visited member
    /// back to itself.
    #[must_use]
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut state: HashMap<&'a str, VisitState> = HashMap::new();
        let mut stack: Vec<&'a str> = Vec::new();
        let mut cycles = Vec::new();

        let registry = self.registry;
        for skill in registry.all() {
            if !state.contains_key(skill.name.as_str()) {
                self.visit(&skill.name, &mut state, &mut stack, &mut cycles);
            }
        }

        cycles
    }

    fn visit(
        &self,
        name: &'a str,
        state: &mut HashMap<&'a str, VisitState>,
        stack: &mut Vec<&'a str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        state.insert(name, VisitState::InProgress);
        stack.push(name);

        let registry = self.registry;
        for dep in registry.dependencies_of(name) {
            match state.get(dep.as_str()).copied() {
                None => {
                    if self.registry.contains(dep) {
                        self.visit(dep, state, stack, cycles);
                    }
                }
                Some(VisitState::InProgress) => {
                    if let Some(start) = stack.iter().position(|n| *n == dep.as_str()) {
                        let mut cycle: Vec<String> =
                            stack[start..].iter().map(|n| (*n).to_string()).collect();
                        cycle.push(dep.clone());
                        cycles.push(cycle);
                    }
                }
                Some(VisitState::Done) => {}
            }
        }

        stack.pop();
        state.insert(name, VisitState::Done);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Resolved,
    /// Not registered
    Missing,
    /// Already expanded elsewhere in the tree
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    pub name: String,
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    /// Render as an indented tree, one node per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        self.render_into(&mut lines, "", true, true);
        lines.join("\n")
    }

    fn render_into(&self, lines: &mut Vec<String>, prefix: &str, last: bool, root: bool) {
        let marker = match self.status {
            NodeStatus::Resolved => "",
            NodeStatus::Missing => " (missing)",
            NodeStatus::Repeated => " (*)",
        };
        if root {
            lines.push(format!("{}{marker}", self.name));
        } else {
            let branch = if last { "└── " } else { "├── " };
            lines.push(format!("{prefix}{branch}{}{marker}", self.name));
        }

        let child_prefix = if root {
            String::new()
        } else if last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        let count = self.children.len();
        for (idx, child) in self.children.iter().enumerate() {
            child.render_into(lines, &child_prefix, idx + 1 == count, false);
        }
    }
}
