//! Ordered detection tables.
//!
//! Each fact category is a prioritized table evaluated top to bottom; the first
//! matching row wins (or, for multi-valued facts, every matching row is collected
//! in table order). Meta-framework rows precede the base UI library rows they
//! imply, so `next` is reported as Next.js rather than React.

use super::manifest::Manifest;
use super::probe::{file_stem, ProjectProbe};
use super::{
    ApiFacts, ComponentFacts, ComponentItem, FrameworkFacts, RoutingFacts, StateFacts,
    StateLibrary, StylingFacts, StylingSolution,
};
use crate::config::ScanConfig;

/// Everything a detection rule may inspect.
pub struct DetectionContext<'a> {
    pub manifest: Option<&'a Manifest>,
    pub probe: &'a ProjectProbe,
    pub scan: &'a ScanConfig,
}

// ── Framework ─────────────────────────────────────────────────────────────────

pub struct FrameworkRule {
    pub kind: &'static str,
    pub name: &'static str,
    /// All of these must be dependencies.
    pub requires: &'static [&'static str],
    /// Dependency whose declared version is reported.
    pub version_of: &'static str,
}

pub const FRAMEWORK_RULES: &[FrameworkRule] = &[
    FrameworkRule { kind: "nextjs", name: "Next.js", requires: &["next"], version_of: "next" },
    FrameworkRule { kind: "nuxt", name: "Nuxt", requires: &["nuxt"], version_of: "nuxt" },
    FrameworkRule { kind: "vue", name: "Vue", requires: &["vue"], version_of: "vue" },
    FrameworkRule {
        kind: "cra",
        name: "Create React App",
        requires: &["react", "react-scripts"],
        version_of: "react",
    },
    FrameworkRule {
        kind: "react-vite",
        name: "React + Vite",
        requires: &["react", "vite"],
        version_of: "react",
    },
    FrameworkRule { kind: "react", name: "React", requires: &["react"], version_of: "react" },
];

pub fn detect_framework(ctx: &DetectionContext) -> FrameworkFacts {
    let Some(manifest) = ctx.manifest else {
        return FrameworkFacts::unknown();
    };
    FRAMEWORK_RULES
        .iter()
        .find(|rule| rule.requires.iter().all(|dep| manifest.has(dep)))
        .map(|rule| FrameworkFacts {
            name: rule.name.to_string(),
            version: manifest.version(rule.version_of).map(str::to_string),
            kind: rule.kind.to_string(),
        })
        .unwrap_or_else(FrameworkFacts::unknown)
}

// ── Routing ───────────────────────────────────────────────────────────────────

pub struct RoutingRule {
    pub name: &'static str,
    pub detect: fn(&DetectionContext, &FrameworkFacts) -> Option<RoutingFacts>,
}

pub const ROUTING_RULES: &[RoutingRule] = &[
    RoutingRule { name: "next-app-router", detect: next_app_router },
    RoutingRule { name: "next-pages-router", detect: next_pages_router },
    RoutingRule { name: "react-router", detect: react_router },
    RoutingRule { name: "vue-router", detect: vue_router },
];

pub fn detect_routing(ctx: &DetectionContext, framework: &FrameworkFacts) -> RoutingFacts {
    for rule in ROUTING_RULES {
        if let Some(facts) = (rule.detect)(ctx, framework) {
            tracing::debug!(rule = rule.name, "routing rule matched");
            return facts;
        }
    }
    RoutingFacts::default()
}

fn next_app_router(ctx: &DetectionContext, framework: &FrameworkFacts) -> Option<RoutingFacts> {
    if framework.kind != "nextjs" {
        return None;
    }
    let location = ["src/app", "app"].into_iter().find(|dir| ctx.probe.is_dir(dir))?;
    let examples = ctx
        .probe
        .glob_under(location, &["**/page.{js,jsx,ts,tsx}"], &[])
        .into_iter()
        .take(ctx.scan.route_example_limit)
        .map(|page| format!("{location}/{page}"))
        .collect();

    Some(RoutingFacts {
        framework: Some("Next.js App Router".into()),
        style: Some("file-based".into()),
        location: Some(location.into()),
        pattern: Some(format!("{location}/[route]/page.tsx")),
        examples,
    })
}

fn next_pages_router(ctx: &DetectionContext, framework: &FrameworkFacts) -> Option<RoutingFacts> {
    if framework.kind != "nextjs" {
        return None;
    }
    let location = ["src/pages", "pages"].into_iter().find(|dir| ctx.probe.is_dir(dir))?;
    Some(RoutingFacts {
        framework: Some("Next.js Pages Router".into()),
        style: Some("file-based".into()),
        location: Some(location.into()),
        pattern: Some(format!("{location}/[route].tsx")),
        examples: Vec::new(),
    })
}

fn react_router(ctx: &DetectionContext, _framework: &FrameworkFacts) -> Option<RoutingFacts> {
    if !ctx.manifest?.has_runtime("react-router-dom") {
        return None;
    }
    let config_file = ctx
        .probe
        .glob(&["**/router.{js,jsx,ts,tsx}", "**/routes.{js,jsx,ts,tsx}"], &[])
        .into_iter()
        .next();

    Some(RoutingFacts {
        framework: Some("React Router".into()),
        style: Some("config-based".into()),
        location: Some(config_file.unwrap_or_else(|| "src/routes".into())),
        pattern: Some("route config".into()),
        examples: Vec::new(),
    })
}

fn vue_router(ctx: &DetectionContext, _framework: &FrameworkFacts) -> Option<RoutingFacts> {
    if !ctx.manifest?.has_runtime("vue-router") {
        return None;
    }
    Some(RoutingFacts {
        framework: Some("Vue Router".into()),
        style: Some("config-based".into()),
        location: Some("src/router".into()),
        pattern: Some("route config".into()),
        examples: Vec::new(),
    })
}

// ── State management ──────────────────────────────────────────────────────────

pub struct LibraryRule {
    pub name: &'static str,
    /// Any of these dependencies triggers the row.
    pub any_of: &'static [&'static str],
    pub location: &'static str,
}

pub const STATE_RULES: &[LibraryRule] = &[
    LibraryRule { name: "Redux", any_of: &["redux", "@reduxjs/toolkit"], location: "src/store" },
    LibraryRule { name: "Zustand", any_of: &["zustand"], location: "src/store" },
    LibraryRule { name: "MobX", any_of: &["mobx"], location: "src/stores" },
    LibraryRule { name: "Jotai", any_of: &["jotai"], location: "src/atoms" },
    LibraryRule { name: "Recoil", any_of: &["recoil"], location: "src/recoil" },
    LibraryRule { name: "Pinia", any_of: &["pinia"], location: "src/stores" },
    LibraryRule { name: "Vuex", any_of: &["vuex"], location: "src/store" },
];

pub fn detect_state(ctx: &DetectionContext, framework: &FrameworkFacts) -> StateFacts {
    let Some(manifest) = ctx.manifest else {
        return StateFacts::default();
    };
    let libraries: Vec<StateLibrary> = STATE_RULES
        .iter()
        .filter(|rule| rule.any_of.iter().any(|dep| manifest.has(dep)))
        .map(|rule| StateLibrary {
            name: rule.name.into(),
            location: rule.location.into(),
        })
        .collect();

    let fallback = if matches!(framework.kind.as_str(), "vue" | "nuxt") {
        "Vue provide/inject"
    } else {
        "React Context API"
    };
    let primary = libraries
        .first()
        .map(|lib| lib.name.clone())
        .unwrap_or_else(|| fallback.to_string());

    StateFacts {
        primary: Some(primary),
        libraries,
    }
}

// ── Styling ───────────────────────────────────────────────────────────────────

pub struct StylingRule {
    pub name: &'static str,
    pub any_of: &'static [&'static str],
    pub config: Option<&'static str>,
}

pub const STYLING_RULES: &[StylingRule] = &[
    StylingRule { name: "Tailwind CSS", any_of: &["tailwindcss"], config: Some("tailwind.config.js") },
    StylingRule { name: "Styled Components", any_of: &["styled-components"], config: None },
    StylingRule { name: "Emotion", any_of: &["@emotion/react"], config: None },
    StylingRule { name: "Sass/SCSS", any_of: &["sass", "scss"], config: None },
    StylingRule { name: "Less", any_of: &["less"], config: None },
];

pub fn detect_styling(ctx: &DetectionContext) -> StylingFacts {
    let Some(manifest) = ctx.manifest else {
        return StylingFacts::default();
    };
    let mut solutions: Vec<StylingSolution> = STYLING_RULES
        .iter()
        .filter(|rule| rule.any_of.iter().any(|dep| manifest.has(dep)))
        .map(|rule| StylingSolution {
            name: rule.name.into(),
            config: rule.config.map(str::to_string),
        })
        .collect();

    if !ctx.probe.glob(&["**/*.module.{css,scss,sass}"], &[]).is_empty() {
        solutions.push(StylingSolution {
            name: "CSS Modules".into(),
            config: None,
        });
    }

    let kind = solutions
        .first()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Plain CSS".into());

    StylingFacts {
        kind: Some(kind),
        solutions,
    }
}

// ── Components ────────────────────────────────────────────────────────────────

/// Candidate component directories, in priority order. Only the first present
/// directory is inventoried.
pub const COMPONENT_DIRS: &[&str] = &["src/components", "components", "src/ui"];

pub fn detect_components(ctx: &DetectionContext) -> ComponentFacts {
    let Some(location) = COMPONENT_DIRS.iter().find(|dir| ctx.probe.is_dir(dir)) else {
        return ComponentFacts::default();
    };
    let files = ctx
        .probe
        .glob_under(location, &["**/*.{jsx,tsx,vue}"], &["**/*.test.*", "**/*.spec.*"]);

    let items = files
        .iter()
        .take(ctx.scan.component_limit)
        .map(|file| ComponentItem {
            name: file_stem(file).to_string(),
            path: format!("{location}/{file}"),
        })
        .collect();

    ComponentFacts {
        location: Some(location.to_string()),
        items,
        count: files.len(),
    }
}

// ── API ───────────────────────────────────────────────────────────────────────

pub struct ApiRule {
    pub method: &'static str,
    pub library: &'static str,
}

pub const API_RULES: &[ApiRule] = &[
    ApiRule { method: "axios", library: "axios" },
    ApiRule { method: "react-query", library: "@tanstack/react-query" },
    ApiRule { method: "swr", library: "swr" },
];

pub fn detect_api(ctx: &DetectionContext) -> ApiFacts {
    let Some(manifest) = ctx.manifest else {
        return ApiFacts::default();
    };
    let rule = API_RULES.iter().find(|rule| manifest.has(rule.library));
    let location = ctx
        .probe
        .glob(
            &["**/api.{js,ts}", "**/request.{js,ts}", "**/http.{js,ts}"],
            &["pages/api/**", "src/pages/api/**"],
        )
        .into_iter()
        .next();

    ApiFacts {
        method: Some(rule.map_or("fetch", |r| r.method).to_string()),
        library: rule.map(|r| r.library.to_string()),
        location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn manifest(json: &str) -> Manifest {
        Manifest::parse(json).unwrap()
    }

    fn ctx<'a>(
        manifest: Option<&'a Manifest>,
        probe: &'a ProjectProbe,
        scan: &'a ScanConfig,
    ) -> DetectionContext<'a> {
        DetectionContext { manifest, probe, scan }
    }

    #[test]
    fn meta_framework_wins_over_base_library() {
        let m = manifest(r#"{"dependencies": {"next": "14.0.0", "react": "18.2.0"}}"#);
        let probe = ProjectProbe::from_files(Path::new("/p"), []);
        let scan = ScanConfig::default();

        let fw = detect_framework(&ctx(Some(&m), &probe, &scan));
        assert_eq!(fw.name, "Next.js");
        assert_eq!(fw.kind, "nextjs");
        assert_eq!(fw.version.as_deref(), Some("14.0.0"));
    }

    #[test]
    fn react_variants_are_ordered() {
        let probe = ProjectProbe::from_files(Path::new("/p"), []);
        let scan = ScanConfig::default();

        let cra = manifest(r#"{"dependencies": {"react": "18", "react-scripts": "5"}}"#);
        assert_eq!(detect_framework(&ctx(Some(&cra), &probe, &scan)).kind, "cra");

        let vite = manifest(r#"{"dependencies": {"react": "18"}, "devDependencies": {"vite": "5"}}"#);
        assert_eq!(detect_framework(&ctx(Some(&vite), &probe, &scan)).kind, "react-vite");

        let plain = manifest(r#"{"dependencies": {"react": "18"}}"#);
        assert_eq!(detect_framework(&ctx(Some(&plain), &probe, &scan)).kind, "react");
    }

    #[test]
    fn state_collects_all_libraries_in_table_order() {
        let m = manifest(r#"{"dependencies": {"zustand": "4", "@reduxjs/toolkit": "2"}}"#);
        let probe = ProjectProbe::from_files(Path::new("/p"), []);
        let scan = ScanConfig::default();

        let state = detect_state(&ctx(Some(&m), &probe, &scan), &FrameworkFacts::unknown());
        assert_eq!(state.primary.as_deref(), Some("Redux"));
        let names: Vec<_> = state.libraries.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Redux", "Zustand"]);
    }

    #[test]
    fn state_falls_back_to_context() {
        let m = manifest(r#"{"dependencies": {"react": "18"}}"#);
        let probe = ProjectProbe::from_files(Path::new("/p"), []);
        let scan = ScanConfig::default();

        let state = detect_state(&ctx(Some(&m), &probe, &scan), &FrameworkFacts::unknown());
        assert_eq!(state.primary.as_deref(), Some("React Context API"));
        assert!(state.libraries.is_empty());
    }

    #[test]
    fn styling_adds_css_modules_from_files() {
        let m = manifest(r#"{"devDependencies": {"tailwindcss": "3"}}"#);
        let probe = ProjectProbe::from_files(
            Path::new("/p"),
            ["src/components/Card.module.css".to_string()],
        );
        let scan = ScanConfig::default();

        let styling = detect_styling(&ctx(Some(&m), &probe, &scan));
        assert_eq!(styling.kind.as_deref(), Some("Tailwind CSS"));
        let names: Vec<_> = styling.solutions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Tailwind CSS", "CSS Modules"]);
    }

    #[test]
    fn api_prefers_axios_and_skips_next_api_routes() {
        let m = manifest(r#"{"dependencies": {"axios": "1", "swr": "2"}}"#);
        let probe = ProjectProbe::from_files(
            Path::new("/p"),
            ["pages/api/http.ts".to_string(), "src/lib/request.ts".to_string()],
        );
        let scan = ScanConfig::default();

        let api = detect_api(&ctx(Some(&m), &probe, &scan));
        assert_eq!(api.method.as_deref(), Some("axios"));
        assert_eq!(api.library.as_deref(), Some("axios"));
        assert_eq!(api.location.as_deref(), Some("src/lib/request.ts"));
    }

    #[test]
    fn api_defaults_to_fetch_with_manifest() {
        let m = manifest("{}");
        let probe = ProjectProbe::from_files(Path::new("/p"), []);
        let scan = ScanConfig::default();

        let api = detect_api(&ctx(Some(&m), &probe, &scan));
        assert_eq!(api.method.as_deref(), Some("fetch"));
        assert!(api.library.is_none());
    }

    #[test]
    fn react_router_uses_first_route_config() {
        let m = manifest(r#"{"dependencies": {"react": "18", "react-router-dom": "6"}}"#);
        let probe = ProjectProbe::from_files(
            Path::new("/p"),
            ["src/app/routes.tsx".to_string(), "src/main.tsx".to_string()],
        );
        let scan = ScanConfig::default();
        let fw = detect_framework(&ctx(Some(&m), &probe, &scan));

        let routing = detect_routing(&ctx(Some(&m), &probe, &scan), &fw);
        assert_eq!(routing.framework.as_deref(), Some("React Router"));
        assert_eq!(routing.location.as_deref(), Some("src/app/routes.tsx"));
    }
}
