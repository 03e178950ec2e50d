//! Per-file classification for contextual help.

use serde::Serialize;
use std::path::Path;

use super::probe::{file_name, file_stem};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileContext {
    /// `"api"`, `"utility"`, `"hook"`, `"page"`, `"component"`, or `"unknown"`.
    pub kind: String,
    /// Path relative to the project root when the file lies inside it.
    pub location: String,
    pub related_files: Vec<String>,
    pub suggested_patterns: Vec<String>,
}

struct ContextRule {
    kind: &'static str,
    matches: fn(&FilePath<'_>) -> bool,
    suggestions: &'static [&'static str],
}

struct FilePath<'a> {
    segments: Vec<&'a str>,
    name: &'a str,
    stem: &'a str,
    ext: &'a str,
}

impl<'a> FilePath<'a> {
    fn new(rel: &'a str) -> Self {
        let name = file_name(rel);
        let stem = file_stem(rel);
        let ext = name.strip_prefix(stem).unwrap_or("");
        let mut segments: Vec<&str> = rel.split('/').collect();
        segments.pop();
        Self { segments, name, stem, ext }
    }

    fn in_dir(&self, dirs: &[&str]) -> bool {
        self.segments.iter().any(|s| dirs.contains(s))
    }
}

/// Ordered, first match wins.
const CONTEXT_RULES: &[ContextRule] = &[
    ContextRule {
        kind: "api",
        matches: |f| f.in_dir(&["api", "services"]),
        suggestions: &[
            "Keep request functions thin and typed",
            "Centralize base URL and error handling",
            "Return parsed data, not raw responses",
        ],
    },
    ContextRule {
        kind: "utility",
        matches: |f| f.in_dir(&["utils", "helpers"]),
        suggestions: &[
            "Prefer pure functions without side effects",
            "Add unit tests for edge cases",
        ],
    },
    ContextRule {
        kind: "hook",
        matches: |f| f.stem.starts_with("use") && matches!(f.ext, ".js" | ".ts"),
        suggestions: &[
            "Name the hook with a use prefix",
            "Clean up subscriptions and timers in effects",
            "Return a stable object or tuple",
        ],
    },
    ContextRule {
        kind: "page",
        matches: |f| f.in_dir(&["pages", "app"]),
        suggestions: &[
            "Keep data loading at the page boundary",
            "Compose the page from shared components",
        ],
    },
    ContextRule {
        kind: "component",
        matches: |f| {
            matches!(f.ext, ".jsx" | ".tsx")
                && f.name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        },
        suggestions: &[
            "Use PascalCase for the component name",
            "Type props explicitly",
            "Colocate styles next to the component",
        ],
    },
];

const STYLE_SUFFIXES: &[&str] = &[".module.css", ".module.scss", ".css", ".scss"];

/// Classify `file` (absolute or relative to `project`) and list colocated files.
pub fn detect_file_context(file: &str, project: &Path) -> FileContext {
    let as_path = Path::new(file);
    let rel = as_path
        .strip_prefix(project)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file.replace('\\', "/"));
    let rel = rel.trim_start_matches("./").to_string();
    let parsed = FilePath::new(&rel);

    let rule = CONTEXT_RULES.iter().find(|r| (r.matches)(&parsed));
    let kind = rule.map_or("unknown", |r| r.kind);

    let related_files = if kind == "component" {
        let dir = match rel.rfind('/') {
            Some(idx) => &rel[..=idx],
            None => "",
        };
        STYLE_SUFFIXES
            .iter()
            .map(|suffix| format!("{dir}{}{suffix}", parsed.stem))
            .filter(|candidate| project.join(candidate).is_file())
            .collect()
    } else {
        Vec::new()
    };

    FileContext {
        kind: kind.to_string(),
        location: rel.clone(),
        related_files,
        suggested_patterns: rule
            .map(|r| r.suggestions.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn kind(file: &str) -> String {
        detect_file_context(file, Path::new("/project")).kind
    }

    #[test]
    fn classification_order() {
        assert_eq!(kind("/project/src/api/users.ts"), "api");
        assert_eq!(kind("src/services/useUsers.ts"), "api");
        assert_eq!(kind("src/utils/format.ts"), "utility");
        assert_eq!(kind("src/hooks/useAuth.ts"), "hook");
        assert_eq!(kind("src/pages/Home.tsx"), "page");
        assert_eq!(kind("src/components/Button.tsx"), "component");
        assert_eq!(kind("src/components/button.tsx"), "unknown");
        assert_eq!(kind("README.md"), "unknown");
    }

    #[test]
    fn hook_requires_plain_script_extension() {
        // useX.tsx falls through to the component rule only when capitalized
        assert_eq!(kind("src/hooks/useModal.tsx"), "unknown");
    }

    #[test]
    fn component_lists_colocated_styles() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("src/components");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Card.tsx"), "").unwrap();
        std::fs::write(dir.join("Card.module.css"), "").unwrap();
        std::fs::write(dir.join("Card.scss"), "").unwrap();

        let file = tmp.path().join("src/components/Card.tsx");
        let ctx = detect_file_context(&file.to_string_lossy(), tmp.path());
        assert_eq!(ctx.kind, "component");
        assert_eq!(ctx.location, "src/components/Card.tsx");
        assert_eq!(
            ctx.related_files,
            vec!["src/components/Card.module.css", "src/components/Card.scss"]
        );
        assert!(!ctx.suggested_patterns.is_empty());
    }
}
