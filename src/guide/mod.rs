//! The persisted guide set under `<project>/<docs_dir>`.
//!
//! [`GuideSet`] owns the on-disk layout: the main index, one Markdown file per
//! topical document, and the use-case collection. It drives extraction and
//! synthesis on [`generate`](GuideSet::generate) and routes section reads and
//! updates through the alias table and [`crate::document::mutate`].

pub mod help;
pub mod use_cases;

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::clock::{date_string, Clock};
use crate::config::{LayoutConfig, ScanConfig};
use crate::document::alias::{self, AliasTarget};
use crate::document::model::escape_markers;
use crate::document::{self, Document};
use crate::error::{GuideError, Lookup, Result};
use crate::facts::{self, FactSet};
use crate::fsutil::{read_optional, write_atomic};
use crate::synth::{self, DocSchema, INDEX_FILE, SCHEMAS};

/// How [`GuideSet::update_section`] applies new content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    #[default]
    Replace,
    Append,
}

impl FromStr for UpdateMode {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            other => Err(GuideError::InvalidInput(format!(
                "update mode must be 'replace' or 'append', got '{other}'"
            ))),
        }
    }
}

/// Outcome of [`GuideSet::generate`].
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub index_path: PathBuf,
    pub documents: Vec<PathBuf>,
    pub use_case_count: usize,
    pub facts: FactSet,
}

pub struct GuideSet {
    project: PathBuf,
    docs_root: PathBuf,
    guides_root: PathBuf,
    guides_dir: String,
}

impl GuideSet {
    pub fn new(project: &Path, layout: &LayoutConfig) -> Self {
        Self {
            project: project.to_path_buf(),
            docs_root: layout.docs_root(project),
            guides_root: layout.guides_root(project),
            guides_dir: layout.guides_dir.clone(),
        }
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn index_path(&self) -> PathBuf {
        self.docs_root.join(INDEX_FILE)
    }

    pub fn guides_root(&self) -> &Path {
        &self.guides_root
    }

    pub fn doc_path(&self, schema: &DocSchema) -> PathBuf {
        self.guides_root.join(schema.file_name())
    }

    pub fn use_cases_dir(&self) -> PathBuf {
        self.guides_root.join("use-cases")
    }

    /// Extract facts, render every document, and write the set.
    ///
    /// Existing `notes` sections are carried over so team notes survive
    /// regeneration. The use-case listing is rebuilt from the files on disk.
    pub fn generate(&self, scan: &ScanConfig, clock: &dyn Clock) -> Result<GenerateReport> {
        if !self.project.is_dir() {
            return Err(GuideError::not_found("project directory", &self.project));
        }

        let facts = facts::extract(&self.project, scan);
        let generated_at = date_string(clock.now());

        let mut documents = Vec::new();
        for doc in synth::synthesize(&facts, Some(&generated_at)) {
            let path = self.guides_root.join(format!("{}.md", doc.id));
            let doc = self.carry_notes(&path, doc)?;
            write_atomic(&path, &doc.to_markdown())?;
            documents.push(path);
        }

        let index = synth::synthesize_index(&facts, &self.guides_dir, Some(&generated_at));
        let index_path = self.index_path();
        write_atomic(&index_path, &index.to_markdown())?;

        let use_case_count = use_cases::rebuild_index(&self.use_cases_dir())?;

        tracing::info!(
            project = %self.project.display(),
            documents = documents.len(),
            use_cases = use_case_count,
            "guide generated"
        );

        Ok(GenerateReport {
            index_path,
            documents,
            use_case_count,
            facts,
        })
    }

    fn carry_notes(&self, path: &Path, fresh: Document) -> Result<Document> {
        let Lookup::Found(text) = read_optional(path)? else {
            return Ok(fresh);
        };
        let previous = Document::parse(&text);
        match previous.section("notes") {
            Some(notes) if fresh.section("notes").is_some() => {
                document::replace(&fresh, "notes", &escape_markers(notes.content()))
            }
            _ => Ok(fresh),
        }
    }

    /// Read the main index, or the document or section `section` names.
    ///
    /// A missing file is [`Lookup::Missing`]; an identifier that names nothing is
    /// [`GuideError::NotFound`].
    pub fn read(&self, section: Option<&str>) -> Result<Lookup<String>> {
        let Some(ident) = section else {
            return read_optional(&self.index_path());
        };

        let Some((schema, target)) = self.resolve(ident)? else {
            return Err(GuideError::not_found(
                format!("guide section '{ident}'"),
                &self.guides_root,
            ));
        };

        let path = self.doc_path(schema);
        let text = match read_optional(&path)? {
            Lookup::Found(text) => text,
            missing => return Ok(missing),
        };
        let Some(target) = target else {
            return Ok(Lookup::Found(text));
        };

        let doc = Document::parse(&text);
        match document::locate(&doc, &target) {
            Some(found) if found.heading.is_empty() => Ok(Lookup::Found(found.body.clone())),
            Some(found) => Ok(Lookup::Found(format!("## {}\n{}", found.heading, found.body))),
            None => Err(GuideError::SectionNotFound {
                identifier: ident.to_string(),
                document: schema.id.to_string(),
            }),
        }
    }

    /// Replace or append to one section, leaving the rest of its file byte-identical.
    ///
    /// Nothing is written when the identifier resolves to no section.
    pub fn update_section(&self, ident: &str, content: &str, mode: UpdateMode) -> Result<PathBuf> {
        let Some((schema, target)) = self.resolve(ident)? else {
            return Err(GuideError::SectionNotFound {
                identifier: ident.to_string(),
                document: "guide".to_string(),
            });
        };

        let path = self.doc_path(schema);
        let text = match read_optional(&path)? {
            Lookup::Found(text) => text,
            Lookup::Missing { path } => {
                return Err(GuideError::not_found(format!("{} guide", schema.id), &path))
            }
        };

        let doc = Document::parse(&text);
        let target = target.unwrap_or_else(|| ident.to_string());
        let updated = match mode {
            UpdateMode::Replace => document::replace(&doc, &target, content)?,
            UpdateMode::Append => document::append(&doc, &target, content)?,
        };
        write_atomic(&path, &updated.to_markdown())?;

        tracing::info!(
            doc = schema.id,
            section = %target,
            mode = ?mode,
            path = %path.display(),
            "guide section updated"
        );
        Ok(path)
    }

    /// Map an identifier to its document and, when it names a single section, the
    /// identifier to locate inside it (`None` means the whole document).
    ///
    /// Order: alias table, `<doc>/<anchor>`, then a heading search over the
    /// persisted documents.
    fn resolve(&self, ident: &str) -> Result<Option<(&'static DocSchema, Option<String>)>> {
        if let Some((doc, target)) = alias::resolve(ident) {
            if let Some(schema) = synth::schema(doc) {
                let target = match target {
                    AliasTarget::Document => None,
                    AliasTarget::Section(_) => Some(ident.to_string()),
                };
                return Ok(Some((schema, target)));
            }
        }

        if let Some((doc, anchor)) = ident.split_once('/') {
            if let Some(schema) = synth::schema(doc.trim()) {
                return Ok(Some((schema, Some(anchor.trim().to_string()))));
            }
        }

        for schema in SCHEMAS {
            if let Lookup::Found(text) = read_optional(&self.doc_path(schema))? {
                let doc = Document::parse(&text);
                if document::locate(&doc, ident).is_some() {
                    return Ok(Some((schema, Some(ident.to_string()))));
                }
            }
        }
        Ok(None)
    }

    /// Schema documents whose file is missing, and files that carry no section markers.
    pub fn check(&self) -> Result<Vec<String>> {
        let mut problems = Vec::new();
        if !self.index_path().exists() {
            problems.push(format!("missing main index {}", self.index_path().display()));
        }
        for schema in SCHEMAS {
            let path = self.doc_path(schema);
            match read_optional(&path)? {
                Lookup::Missing { path } => {
                    problems.push(format!("missing document {}", path.display()))
                }
                Lookup::Found(text) => {
                    let doc = Document::parse(&text);
                    if !doc.has_sections() {
                        problems.push(format!("no section markers in {}", path.display()));
                    }
                }
            }
        }
        Ok(problems)
    }
}
