//! Section bodies. Each function is a pure rendering of one fact group.

use super::{NOT_DETECTED, SCHEMAS};
use crate::document::INSERT_MARKER;
use crate::facts::conventions::Conventions;
use crate::facts::{tree, FactSet};

pub(super) fn footer(index_prefix: &str) -> String {
    format!("---\n\n[← Back to index]({index_prefix}PROJECT_GUIDE.md)\n")
}

pub(super) fn section_body(facts: &FactSet, doc: &str, anchor: &str) -> String {
    match (doc, anchor) {
        (_, "notes") => format!("{INSERT_MARKER}\n\n_Add team notes below this line._"),
        ("overview", "tech-stack") => tech_stack(facts),
        ("overview", "description") => description(facts),
        ("overview", "directory-tree") => directory_tree(facts),
        ("routing", "routing") => routing(facts),
        ("routing", "route-examples") => route_examples(facts),
        ("routing", "usage") => routing_usage(facts),
        ("state", "state") => state(facts),
        ("styling", "styling") => styling(facts),
        ("components", "components") => components(facts),
        ("api", "api") => api(facts),
        ("guidelines", "guidelines") => guidelines(&facts.conventions),
        ("guidelines", "code-style") => code_style(&facts.conventions),
        ("commands", "commands") => commands(facts),
        _ => NOT_DETECTED.to_string(),
    }
}

fn or_not_detected(lines: Vec<String>) -> String {
    if lines.is_empty() {
        NOT_DETECTED.to_string()
    } else {
        lines.join("\n")
    }
}

fn value(v: Option<&str>) -> &str {
    v.unwrap_or("Not detected")
}

fn tech_stack(facts: &FactSet) -> String {
    let framework = if facts.framework.is_known() {
        match &facts.framework.version {
            Some(version) => format!("{} ({version})", facts.framework.name),
            None => facts.framework.name.clone(),
        }
    } else {
        "Not detected".to_string()
    };
    let styling: Vec<&str> = facts.styling.solutions.iter().map(|s| s.name.as_str()).collect();
    let styling = if styling.is_empty() {
        "Not detected".to_string()
    } else {
        styling.join(", ")
    };

    [
        format!("- **Framework**: {framework}"),
        format!("- **Routing**: {}", value(facts.routing.framework.as_deref())),
        format!("- **State Management**: {}", value(facts.state.primary.as_deref())),
        format!("- **Styling**: {styling}"),
        format!("- **API Requests**: {}", value(facts.api.method.as_deref())),
    ]
    .join("\n")
}

fn description(facts: &FactSet) -> String {
    let mut lines = Vec::new();
    if let Some(name) = &facts.project.name {
        lines.push(format!("**{name}**"));
    }
    if let Some(desc) = &facts.project.description {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(desc.clone());
    }
    or_not_detected(lines)
}

fn directory_tree(facts: &FactSet) -> String {
    if facts.directory_tree.is_empty() {
        return NOT_DETECTED.to_string();
    }
    format!("```\n.\n{}\n```", tree::render(&facts.directory_tree))
}

fn routing(facts: &FactSet) -> String {
    let routing = &facts.routing;
    let Some(solution) = &routing.framework else {
        return NOT_DETECTED.to_string();
    };
    let mut lines = vec![format!("- **Solution**: {solution}")];
    if let Some(style) = &routing.style {
        lines.push(format!("- **Style**: {style}"));
    }
    if let Some(location) = &routing.location {
        lines.push(format!("- **Location**: `{location}`"));
    }
    if let Some(pattern) = &routing.pattern {
        lines.push(format!("- **Pattern**: `{pattern}`"));
    }
    lines.join("\n")
}

fn route_examples(facts: &FactSet) -> String {
    or_not_detected(
        facts
            .routing
            .examples
            .iter()
            .map(|example| format!("- `{example}`"))
            .collect(),
    )
}

fn routing_usage(facts: &FactSet) -> String {
    let routing = &facts.routing;
    let location = routing.location.as_deref().unwrap_or("the routes directory");
    match routing.style.as_deref() {
        Some("file-based") => format!(
            "Add a file under `{location}`; its path becomes the URL.\n\nFollow the pattern `{}`.",
            routing.pattern.as_deref().unwrap_or(location)
        ),
        Some("config-based") => {
            format!("Register new routes in `{location}` and point each one at a page component.")
        }
        _ => NOT_DETECTED.to_string(),
    }
}

fn state(facts: &FactSet) -> String {
    let state = &facts.state;
    let Some(primary) = &state.primary else {
        return NOT_DETECTED.to_string();
    };
    let mut lines = vec![format!("- **Primary**: {primary}")];
    if !state.libraries.is_empty() {
        lines.push(String::new());
        lines.push("Libraries:".to_string());
        for lib in &state.libraries {
            lines.push(format!("- {} (`{}`)", lib.name, lib.location));
        }
    }
    lines.join("\n")
}

fn styling(facts: &FactSet) -> String {
    let styling = &facts.styling;
    let Some(kind) = &styling.kind else {
        return NOT_DETECTED.to_string();
    };
    let mut lines = vec![format!("- **Primary**: {kind}")];
    for solution in &styling.solutions {
        match &solution.config {
            Some(config) => lines.push(format!("- {} (config: `{config}`)", solution.name)),
            None => lines.push(format!("- {}", solution.name)),
        }
    }
    lines.join("\n")
}

fn components(facts: &FactSet) -> String {
    let components = &facts.components;
    let Some(location) = &components.location else {
        return NOT_DETECTED.to_string();
    };
    let mut lines = vec![
        format!("- **Location**: `{location}`"),
        format!("- **Count**: {}", components.count),
    ];
    if !components.items.is_empty() {
        lines.push(String::new());
        lines.push("| Component | Path |".to_string());
        lines.push("|---|---|".to_string());
        for item in &components.items {
            lines.push(format!("| {} | `{}` |", item.name, item.path));
        }
        if components.count > components.items.len() {
            lines.push(String::new());
            lines.push(format!(
                "_{} more not listed._",
                components.count - components.items.len()
            ));
        }
    }
    lines.join("\n")
}

fn api(facts: &FactSet) -> String {
    let api = &facts.api;
    let Some(method) = &api.method else {
        return NOT_DETECTED.to_string();
    };
    let mut lines = vec![format!("- **Method**: {method}")];
    if let Some(library) = &api.library {
        lines.push(format!("- **Library**: `{library}`"));
    }
    if let Some(location) = &api.location {
        lines.push(format!("- **Location**: `{location}`"));
    }
    lines.join("\n")
}

fn guidelines(conventions: &Conventions) -> String {
    let mut lines = Vec::new();
    let naming = &conventions.naming;
    if let Some(pattern) = &naming.components.pattern {
        lines.push(format!("- **Component naming**: {pattern}"));
    }
    if let Some(pattern) = &naming.files.pattern {
        lines.push(format!("- **Utility file naming**: {pattern}"));
    }
    if !conventions.file_organization.structure.is_empty() {
        lines.push(format!(
            "- **File organization**: {}",
            conventions.file_organization.structure
        ));
    }
    if let Some(location) = &conventions.hooks.location {
        lines.push(format!("- **Custom hooks**: `{location}`"));
    }
    if let Some(style) = &conventions.imports.style {
        let aliases = if conventions.imports.alias_usage {
            format!(" (path aliases: {})", conventions.imports.path_aliases.join(", "))
        } else {
            String::new()
        };
        lines.push(format!("- **Imports**: {style}{aliases}"));
    }
    or_not_detected(lines)
}

fn code_style(conventions: &Conventions) -> String {
    let style = &conventions.code_style;
    if style.sample_file.is_none() {
        return NOT_DETECTED.to_string();
    }
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    [
        format!("- **Quotes**: {}", value(style.quotes.as_deref())),
        format!("- **Semicolons**: {}", value(style.semicolons.as_deref())),
        format!("- **Indentation**: {}", value(style.indentation.as_deref())),
        format!("- **Arrow functions**: {}", yes_no(style.arrow_functions)),
        format!("- **async/await**: {}", yes_no(style.async_await)),
    ]
    .join("\n")
}

fn commands(facts: &FactSet) -> String {
    or_not_detected(
        facts
            .project
            .scripts
            .iter()
            .map(|(name, command)| format!("- `npm run {name}`: `{command}`"))
            .collect(),
    )
}

pub(super) fn summary(facts: &FactSet) -> String {
    tech_stack(facts)
}

pub(super) fn topics(guides_dir: &str) -> String {
    SCHEMAS
        .iter()
        .map(|schema| format!("- [{}]({guides_dir}/{})", schema.title, schema.file_name()))
        .collect::<Vec<_>>()
        .join("\n")
}
