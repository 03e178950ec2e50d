//! `package.json` loading.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The subset of `package.json` the detectors read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub scripts: BTreeMap<String, String>,
}

impl Manifest {
    /// Load `<root>/package.json`. Missing or malformed manifests yield `None`.
    pub fn load(root: &Path) -> Option<Self> {
        let path = root.join("package.json");
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no readable manifest");
                return None;
            }
        };
        Self::parse(&text)
            .map_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "unparsable manifest, using defaults");
            })
            .ok()
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// `true` if `name` is a runtime or dev dependency.
    pub fn has(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    /// `true` if `name` is a runtime dependency.
    pub fn has_runtime(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    /// Declared version of `name`, runtime dependencies taking precedence.
    pub fn version(&self, name: &str) -> Option<&str> {
        self.dependencies
            .get(name)
            .or_else(|| self.dev_dependencies.get(name))
            .map(String::as_str)
    }
}
