//! Coding-convention heuristics: naming, file organization, code style, hooks, imports.
//!
//! Style and import heuristics read a bounded prefix of a single representative
//! sample file (the first source file under `src/` in sorted order) and are
//! approximate. Ties resolve to fixed defaults so identical inputs always give
//! identical answers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::probe::{file_name, file_stem, ProjectProbe};
use crate::config::ScanConfig;

static PASCAL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());
static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap());
static KEBAB_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)+$").unwrap());
static HOOK_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\buse[A-Z]\w*").unwrap());
static PATH_ALIAS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"]((?:@|~)/)[\w/.-]*"#).unwrap());

const SOURCE_GLOBS: &[&str] = &["src/**/*.{js,jsx,ts,tsx}"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conventions {
    pub naming: NamingConventions,
    pub file_organization: FileOrganization,
    pub code_style: CodeStyle,
    pub hooks: HookPatterns,
    pub imports: ImportPatterns,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NamingConventions {
    pub components: NamingPattern,
    pub files: NamingPattern,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NamingPattern {
    pub pattern: Option<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileOrganization {
    /// `"feature-based"`, `"layered"`, or `"flat"`.
    pub structure: String,
    pub colocation: bool,
    pub separation: bool,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodeStyle {
    pub sample_file: Option<String>,
    pub quotes: Option<String>,
    pub semicolons: Option<String>,
    pub indentation: Option<String>,
    pub arrow_functions: bool,
    pub async_await: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HookPatterns {
    pub location: Option<String>,
    pub custom_hooks: Vec<HookFile>,
    pub common_hooks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookFile {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportPatterns {
    /// `"named"`, `"default"`, or `"mixed"`.
    pub style: Option<String>,
    pub alias_usage: bool,
    pub path_aliases: Vec<String>,
    pub examples: Vec<String>,
}

/// Run every convention heuristic against the probed file set.
pub fn detect(probe: &ProjectProbe, scan: &ScanConfig) -> Conventions {
    let sample = probe.glob(SOURCE_GLOBS, &["**/*.test.*", "**/*.spec.*"]).into_iter().next();
    let sample_text = sample.as_deref().and_then(|path| probe.read(path));

    let mut code_style = sample_text
        .as_deref()
        .map(|text| code_style(text, scan.sample_lines))
        .unwrap_or_default();
    code_style.sample_file = sample;

    Conventions {
        naming: naming(probe),
        file_organization: file_organization(probe),
        code_style,
        hooks: hooks(probe),
        imports: sample_text
            .as_deref()
            .map(|text| imports(text, scan.import_lines))
            .unwrap_or_default(),
    }
}

fn naming(probe: &ProjectProbe) -> NamingConventions {
    let mut conventions = NamingConventions::default();

    let components = probe.glob(
        &["src/**/*.{jsx,tsx}", "components/**/*.{jsx,tsx}"],
        &["**/*.test.*", "**/*.spec.*"],
    );
    if !components.is_empty() {
        let sample: Vec<&String> = components.iter().take(10).collect();
        let pascal = sample.iter().filter(|f| PASCAL_CASE.is_match(file_stem(f))).count();
        conventions.components.pattern = Some(
            if pascal * 2 > sample.len() { "PascalCase" } else { "Mixed" }.to_string(),
        );
        conventions.components.examples =
            sample.iter().take(5).map(|f| file_name(f).to_string()).collect();
    }

    let utils = probe.glob(
        &["src/**/utils/**/*.{js,ts}", "src/**/helpers/**/*.{js,ts}"],
        &["**/*.test.*"],
    );
    if !utils.is_empty() {
        let stems: Vec<&str> = utils.iter().map(|f| file_stem(f)).collect();
        conventions.files.pattern = Some(majority_case(&stems).to_string());
        conventions.files.examples = utils.iter().take(5).map(|f| file_name(f).to_string()).collect();
    }

    conventions
}

fn majority_case(stems: &[&str]) -> &'static str {
    let camel = stems.iter().filter(|s| CAMEL_CASE.is_match(s)).count();
    let kebab = stems.iter().filter(|s| KEBAB_CASE.is_match(s)).count();
    if camel * 2 > stems.len() {
        "camelCase"
    } else if kebab * 2 > stems.len() {
        "kebab-case"
    } else {
        "Mixed"
    }
}

fn file_organization(probe: &ProjectProbe) -> FileOrganization {
    let mut features: Vec<String> = Vec::new();
    for parent in ["src/features", "src/modules"] {
        let Ok(entries) = std::fs::read_dir(probe.root().join(parent)) else {
            continue;
        };
        let mut dirs: Vec<String> = entries
            .flatten()
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| format!("{parent}/{}", e.file_name().to_string_lossy()))
            .collect();
        dirs.sort();
        features.extend(dirs);
    }
    if !features.is_empty() {
        return FileOrganization {
            structure: "feature-based".into(),
            colocation: true,
            separation: false,
            examples: features.into_iter().take(3).collect(),
        };
    }

    let layers: Vec<String> = ["src/components", "src/pages", "src/services", "src/utils"]
        .into_iter()
        .filter(|dir| probe.is_dir(dir))
        .map(str::to_string)
        .collect();
    if layers.len() >= 3 {
        return FileOrganization {
            structure: "layered".into(),
            colocation: false,
            separation: true,
            examples: layers,
        };
    }

    FileOrganization {
        structure: "flat".into(),
        ..Default::default()
    }
}

/// Style heuristics over the first `max_lines` lines of `text`.
pub fn code_style(text: &str, max_lines: usize) -> CodeStyle {
    let lines: Vec<&str> = text.lines().take(max_lines).collect();
    let prefix = lines.join("\n");

    let single = prefix.matches('\'').count();
    let double = prefix.matches('"').count();
    // Exact ties (including no quotes at all) resolve to double quotes.
    let quotes = if single > double { "single" } else { "double" };

    let semicolon_lines = lines.iter().filter(|l| l.trim_end().ends_with(';')).count();
    let semicolons = if semicolon_lines * 3 > lines.len() { "required" } else { "omitted" };

    let indentation = lines
        .iter()
        .find(|l| l.starts_with([' ', '\t']) && !l.trim().is_empty())
        .map(|l| {
            if l.starts_with('\t') {
                "tabs".to_string()
            } else {
                let width = l.len() - l.trim_start_matches(' ').len();
                format!("{width} spaces")
            }
        });

    CodeStyle {
        sample_file: None,
        quotes: Some(quotes.into()),
        semicolons: Some(semicolons.into()),
        indentation,
        arrow_functions: prefix.contains("=>"),
        async_await: prefix.contains("async") && prefix.contains("await"),
    }
}

fn hooks(probe: &ProjectProbe) -> HookPatterns {
    let files = probe.glob(
        &["src/**/use*.{js,ts,jsx,tsx}", "hooks/**/use*.{js,ts}"],
        &["**/*.test.*"],
    );
    let Some(first) = files.first() else {
        return HookPatterns::default();
    };

    let location = match first.rfind('/') {
        Some(idx) => format!("{}/", &first[..idx]),
        None => "./".to_string(),
    };

    let mut common_hooks: Vec<String> = Vec::new();
    if let Some(text) = probe.read(first) {
        for m in HOOK_CALL.find_iter(&text) {
            if common_hooks.len() == 8 {
                break;
            }
            if !common_hooks.iter().any(|h| h == m.as_str()) {
                common_hooks.push(m.as_str().to_string());
            }
        }
    }

    HookPatterns {
        location: Some(location),
        custom_hooks: files
            .iter()
            .take(10)
            .map(|f| HookFile {
                name: file_stem(f).to_string(),
                path: f.clone(),
            })
            .collect(),
        common_hooks,
    }
}

/// Import heuristics over the first `max_lines` lines of `text`.
pub fn imports(text: &str, max_lines: usize) -> ImportPatterns {
    let import_lines: Vec<&str> = text
        .lines()
        .take(max_lines)
        .filter(|l| l.trim_start().starts_with("import"))
        .collect();

    let named = import_lines.iter().filter(|l| l.contains('{')).count();
    let default = import_lines.len() - named;
    let style = if import_lines.is_empty() {
        None
    } else if named > default * 2 {
        Some("named")
    } else if default > named * 2 {
        Some("default")
    } else {
        Some("mixed")
    };

    let mut path_aliases: Vec<String> = Vec::new();
    for line in &import_lines {
        for caps in PATH_ALIAS.captures_iter(line) {
            let alias = caps[1].trim_end_matches('/').to_string();
            if !path_aliases.contains(&alias) {
                path_aliases.push(alias);
            }
        }
    }

    ImportPatterns {
        style: style.map(str::to_string),
        alias_usage: !path_aliases.is_empty(),
        path_aliases,
        examples: import_lines.iter().take(5).map(|l| l.trim().to_string()).collect(),
    }
}
