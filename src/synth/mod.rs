//! Deterministic rendering of a [`FactSet`] into the guide document set.
//!
//! [`synthesize`] is a pure function: the same facts and the same `generated_at`
//! string always produce the same documents. Every schema section is emitted even
//! when its fact is missing (the body is then [`NOT_DETECTED`]) so later section
//! updates always have an anchor to target.

mod render;

use crate::document::{Document, Section};
use crate::facts::FactSet;

/// Placeholder body for sections whose fact was not detected.
pub const NOT_DETECTED: &str = "_Not detected._";

/// File name of the main index, written next to the guides directory.
pub const INDEX_FILE: &str = "PROJECT_GUIDE.md";

/// Fixed section layout of one topical document.
pub struct DocSchema {
    pub id: &'static str,
    pub title: &'static str,
    /// `(anchor, heading)` in render order. The first entry is the primary section.
    pub sections: &'static [(&'static str, &'static str)],
}

impl DocSchema {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.id)
    }

    pub fn primary_anchor(&self) -> &'static str {
        self.sections[0].0
    }
}

pub const SCHEMAS: &[DocSchema] = &[
    DocSchema {
        id: "overview",
        title: "Project Overview",
        sections: &[
            ("tech-stack", "Tech Stack"),
            ("description", "Description"),
            ("directory-tree", "Directory Structure"),
            ("notes", "Notes"),
        ],
    },
    DocSchema {
        id: "routing",
        title: "Routing",
        sections: &[
            ("routing", "Routing"),
            ("route-examples", "Example Routes"),
            ("usage", "Usage"),
            ("notes", "Notes"),
        ],
    },
    DocSchema {
        id: "state",
        title: "State Management",
        sections: &[("state", "State Management"), ("notes", "Notes")],
    },
    DocSchema {
        id: "styling",
        title: "Styling",
        sections: &[("styling", "Styling"), ("notes", "Notes")],
    },
    DocSchema {
        id: "components",
        title: "Components",
        sections: &[("components", "Components"), ("notes", "Notes")],
    },
    DocSchema {
        id: "api",
        title: "API Requests",
        sections: &[("api", "API Requests"), ("notes", "Notes")],
    },
    DocSchema {
        id: "guidelines",
        title: "Development Guidelines",
        sections: &[
            ("guidelines", "Development Guidelines"),
            ("code-style", "Code Style"),
            ("notes", "Notes"),
        ],
    },
    DocSchema {
        id: "commands",
        title: "Common Commands",
        sections: &[("commands", "Scripts"), ("notes", "Notes")],
    },
];

pub fn schema(id: &str) -> Option<&'static DocSchema> {
    SCHEMAS.iter().find(|s| s.id == id)
}

/// Render the topical documents in [`SCHEMAS`] order.
pub fn synthesize(facts: &FactSet, generated_at: Option<&str>) -> Vec<Document> {
    SCHEMAS
        .iter()
        .map(|schema| {
            let mut doc = Document::new(schema.id, schema.title, generated_at)
                .with_footer(&render::footer("../"));
            for (anchor, heading) in schema.sections {
                let body = render::section_body(facts, schema.id, anchor);
                doc.push_section(Section::new(*anchor, *heading, &body));
            }
            doc
        })
        .collect()
}

/// Render the main index that links every topical document.
pub fn synthesize_index(facts: &FactSet, guides_dir: &str, generated_at: Option<&str>) -> Document {
    let name = facts.project.name.as_deref().unwrap_or("Project");
    let mut doc = Document::new("index", &format!("{name} Guide"), generated_at);
    doc.push_section(Section::new("summary", "Summary", &render::summary(facts)));
    doc.push_section(Section::new("topics", "Topics", &render::topics(guides_dir)));
    doc.push_section(Section::new(
        "use-cases",
        "Use Cases",
        &format!("See [use cases]({guides_dir}/use-cases/README.md)."),
    ));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::*;
    use std::collections::BTreeMap;

    fn empty_facts() -> FactSet {
        FactSet {
            project: ProjectInfo::default(),
            framework: FrameworkFacts::unknown(),
            routing: RoutingFacts::default(),
            state: StateFacts::default(),
            styling: StylingFacts::default(),
            components: ComponentFacts::default(),
            api: ApiFacts::default(),
            conventions: conventions::Conventions::default(),
            directory_tree: BTreeMap::new(),
        }
    }

    #[test]
    fn every_schema_section_is_emitted() {
        let docs = synthesize(&empty_facts(), None);
        assert_eq!(docs.len(), SCHEMAS.len());
        for (doc, schema) in docs.iter().zip(SCHEMAS) {
            let anchors: Vec<&str> = doc.sections().iter().map(|s| s.anchor.as_str()).collect();
            let expected: Vec<&str> = schema.sections.iter().map(|(a, _)| *a).collect();
            assert_eq!(anchors, expected, "doc {}", schema.id);
            assert_eq!(doc.sections()[0].anchor, schema.primary_anchor());
        }
    }

    #[test]
    fn absent_facts_render_placeholder() {
        let docs = synthesize(&empty_facts(), None);
        let routing = &docs[1];
        assert_eq!(routing.section("routing").unwrap().content(), NOT_DETECTED);
        assert_eq!(routing.section("route-examples").unwrap().content(), NOT_DETECTED);
        let state = &docs[2];
        assert_eq!(state.section("state").unwrap().content(), NOT_DETECTED);
    }

    #[test]
    fn notes_sections_carry_insert_marker() {
        for doc in synthesize(&empty_facts(), None) {
            let notes = doc.section("notes").unwrap();
            assert!(notes.body.contains(crate::document::INSERT_MARKER), "doc {}", doc.id);
        }
    }

    #[test]
    fn output_depends_only_on_facts_and_timestamp() {
        let facts = empty_facts();
        let a = synthesize(&facts, Some("2024-03-05"));
        let b = synthesize(&facts, Some("2024-03-05"));
        let c = synthesize(&facts, Some("2030-01-01"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().zip(&c).all(|(x, y)| x.same_content(y)));
    }

    #[test]
    fn index_links_every_topic() {
        let index = synthesize_index(&empty_facts(), "guides", None);
        let topics = index.section("topics").unwrap().content();
        for schema in SCHEMAS {
            assert!(topics.contains(&format!("(guides/{})", schema.file_name())));
        }
    }
}
