//! Heuristic project inspection.
//!
//! [`extract`] scans a project root and returns a [`FactSet`]: framework, routing,
//! state management, styling, component inventory, API pattern, coding conventions,
//! and a depth-bounded directory tree. Detection never fails the whole call: a
//! missing or unparsable `package.json` leaves the manifest-derived facts at their
//! unknown/empty defaults, and unreadable sample files degrade to "not detected".
//!
//! Detection rules live in [`rules`] as ordered, first-match-wins tables.

pub mod context;
pub mod conventions;
pub mod manifest;
pub mod probe;
pub mod rules;
pub mod tree;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::ScanConfig;
use conventions::Conventions;
use manifest::Manifest;
use probe::ProjectProbe;
use tree::DirectoryTree;

/// Immutable snapshot of everything detected about a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactSet {
    pub project: ProjectInfo,
    pub framework: FrameworkFacts,
    pub routing: RoutingFacts,
    pub state: StateFacts,
    pub styling: StylingFacts,
    pub components: ComponentFacts,
    pub api: ApiFacts,
    pub conventions: Conventions,
    pub directory_tree: DirectoryTree,
}

/// Manifest metadata (name, description, npm scripts).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub scripts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkFacts {
    pub name: String,
    pub version: Option<String>,
    pub kind: String,
}

impl FrameworkFacts {
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".into(),
            version: None,
            kind: "unknown".into(),
        }
    }

    pub fn is_known(&self) -> bool {
        self.kind != "unknown"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoutingFacts {
    /// Routing solution, e.g. `"Next.js App Router"`. `None` when not detected.
    pub framework: Option<String>,
    /// `"file-based"` or `"config-based"`.
    pub style: Option<String>,
    pub location: Option<String>,
    pub pattern: Option<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateFacts {
    pub primary: Option<String>,
    pub libraries: Vec<StateLibrary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateLibrary {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StylingFacts {
    /// Primary styling solution (first detected), e.g. `"Tailwind CSS"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub solutions: Vec<StylingSolution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylingSolution {
    pub name: String,
    pub config: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentFacts {
    pub location: Option<String>,
    pub items: Vec<ComponentItem>,
    /// Total components found, which may exceed `items.len()`.
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentItem {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiFacts {
    pub method: Option<String>,
    pub library: Option<String>,
    pub location: Option<String>,
}

/// Inspect `root` and produce a fresh [`FactSet`].
pub fn extract(root: &Path, scan: &ScanConfig) -> FactSet {
    tracing::info!(root = %root.display(), "extracting project facts");

    let manifest = Manifest::load(root);
    let probe = ProjectProbe::scan(root, &scan.ignore);
    let ctx = rules::DetectionContext {
        manifest: manifest.as_ref(),
        probe: &probe,
        scan,
    };

    let framework = rules::detect_framework(&ctx);
    let routing = rules::detect_routing(&ctx, &framework);
    let state = rules::detect_state(&ctx, &framework);
    let styling = rules::detect_styling(&ctx);
    let components = rules::detect_components(&ctx);
    let api = rules::detect_api(&ctx);
    let conventions = conventions::detect(&probe, scan);
    let directory_tree = tree::build(root, scan.max_depth, &scan.ignore);

    let project = manifest
        .as_ref()
        .map(|m| ProjectInfo {
            name: m.name.clone(),
            description: m.description.clone(),
            scripts: m.scripts.clone(),
        })
        .unwrap_or_default();

    tracing::info!(
        framework = %framework.name,
        routing = routing.framework.as_deref().unwrap_or("none"),
        components = components.count,
        files = probe.file_count(),
        "project facts extracted"
    );

    FactSet {
        project,
        framework,
        routing,
        state,
        styling,
        components,
        api,
        conventions,
        directory_tree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("src")).unwrap();
        std::fs::write(tmp.path().join("src/index.js"), "console.log(1)\n").unwrap();

        let facts = extract(tmp.path(), &ScanConfig::default());

        assert_eq!(facts.framework, FrameworkFacts::unknown());
        assert_eq!(facts.routing, RoutingFacts::default());
        assert_eq!(facts.state, StateFacts::default());
        assert_eq!(facts.styling, StylingFacts::default());
        assert_eq!(facts.api, ApiFacts::default());
        assert_eq!(facts.project, ProjectInfo::default());
        // Filesystem facts are still collected.
        assert!(facts.directory_tree.contains_key("src/"));
    }

    #[test]
    fn unparsable_manifest_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), "{ not json").unwrap();

        let facts = extract(tmp.path(), &ScanConfig::default());
        assert_eq!(facts.framework, FrameworkFacts::unknown());
        assert!(facts.api.method.is_none());
    }
}
