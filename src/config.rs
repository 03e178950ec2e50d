use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GuidebookConfig {
    pub server: ServerConfig,
    pub layout: LayoutConfig,
    pub scan: ScanConfig,
    pub notes: NotesConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
}

/// Where the guide and notes live, relative to a project root.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LayoutConfig {
    pub docs_dir: String,
    pub guides_dir: String,
    pub notes_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScanConfig {
    pub max_depth: usize,
    pub ignore: Vec<String>,
    pub sample_lines: usize,
    pub import_lines: usize,
    pub component_limit: usize,
    pub route_example_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotesConfig {
    pub default_language: String,
    pub preview_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 8787,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            docs_dir: ".vscode".into(),
            guides_dir: "guides".into(),
            notes_dir: "personal-notes".into(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            ignore: ["node_modules", ".git", "dist", "build", ".next", "coverage"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sample_lines: 50,
            import_lines: 30,
            component_limit: 15,
            route_example_limit: 5,
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            default_language: "typescript".into(),
            preview_chars: 200,
        }
    }
}

impl LayoutConfig {
    /// `<project>/<docs_dir>`
    pub fn docs_root(&self, project: &Path) -> PathBuf {
        project.join(&self.docs_dir)
    }

    /// `<project>/<docs_dir>/<guides_dir>`
    pub fn guides_root(&self, project: &Path) -> PathBuf {
        self.docs_root(project).join(&self.guides_dir)
    }

    /// `<project>/<docs_dir>/<notes_dir>`
    pub fn notes_root(&self, project: &Path) -> PathBuf {
        self.docs_root(project).join(&self.notes_dir)
    }
}

/// Returns `~/.guidebook/`, or `./.guidebook` when no home directory is known.
pub fn default_guidebook_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".guidebook")
}

/// Returns the default config file path: `~/.guidebook/config.toml`
pub fn default_config_path() -> PathBuf {
    default_guidebook_dir().join("config.toml")
}

impl GuidebookConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            GuidebookConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (GUIDEBOOK_LOG_LEVEL, GUIDEBOOK_DOCS_DIR, GUIDEBOOK_MAX_DEPTH).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GUIDEBOOK_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("GUIDEBOOK_DOCS_DIR") {
            self.layout.docs_dir = val;
        }
        if let Ok(val) = std::env::var("GUIDEBOOK_MAX_DEPTH") {
            match val.parse() {
                Ok(depth) => self.scan.max_depth = depth,
                Err(_) => tracing::warn!(value = %val, "ignoring non-numeric GUIDEBOOK_MAX_DEPTH"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GuidebookConfig::default();
        assert_eq!(config.server.transport, "stdio");
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.layout.docs_dir, ".vscode");
        assert_eq!(config.scan.max_depth, 3);
        assert!(config.scan.ignore.iter().any(|d| d == "node_modules"));
        assert_eq!(config.notes.default_language, "typescript");
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
log_level = "debug"

[layout]
docs_dir = "docs"

[scan]
max_depth = 5
"#;
        let config: GuidebookConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.layout.docs_dir, "docs");
        assert_eq!(config.scan.max_depth, 5);
        // defaults still apply for unset fields
        assert_eq!(config.layout.guides_dir, "guides");
        assert_eq!(config.scan.sample_lines, 50);
    }

    #[test]
    fn layout_paths_nest_under_docs_dir() {
        let layout = LayoutConfig::default();
        let project = Path::new("/work/app");
        assert_eq!(layout.guides_root(project), PathBuf::from("/work/app/.vscode/guides"));
        assert_eq!(
            layout.notes_root(project),
            PathBuf::from("/work/app/.vscode/personal-notes")
        );
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = GuidebookConfig::default();
        std::env::set_var("GUIDEBOOK_DOCS_DIR", "handbook");
        std::env::set_var("GUIDEBOOK_MAX_DEPTH", "not-a-number");
        std::env::set_var("GUIDEBOOK_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.layout.docs_dir, "handbook");
        assert_eq!(config.scan.max_depth, 3);
        assert_eq!(config.server.log_level, "trace");

        // Clean up
        std::env::remove_var("GUIDEBOOK_DOCS_DIR");
        std::env::remove_var("GUIDEBOOK_MAX_DEPTH");
        std::env::remove_var("GUIDEBOOK_LOG_LEVEL");
    }
}
