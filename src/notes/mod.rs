//! Personal snippet store under `<project>/<docs_dir>/<notes_dir>`.
//!
//! Each entry is its own file at `<category>/<slug>.md`. The aggregate
//! `README.md` index is never edited in place: every mutation ends with a full
//! [`rebuild_index`](SnippetStore::rebuild_index) from a re-scan of the entry
//! files, so the index cannot drift from them.
//!
//! Slug collisions (same title, or same ideographic prefix within the same
//! millisecond) overwrite the earlier entry and log a warning.

pub mod entry;
pub mod index;
pub mod slug;

use std::path::{Path, PathBuf};

use crate::clock::Clock;
use crate::config::{LayoutConfig, NotesConfig};
use crate::error::{GuideError, Lookup, Result};
use crate::fsutil::{list_files, read_optional, write_atomic};

pub use entry::{Category, Entry, EntryDraft};
pub use index::Index;

pub const INDEX_FILE: &str = "README.md";
pub const CORE_GUIDELINES_FILE: &str = "CORE_GUIDELINES.md";

pub struct SnippetStore {
    root: PathBuf,
    default_language: String,
}

impl SnippetStore {
    pub fn new(project: &Path, layout: &LayoutConfig, notes: &NotesConfig) -> Self {
        Self::at(layout.notes_root(project), &notes.default_language)
    }

    /// Store rooted directly at `root`.
    pub fn at(root: PathBuf, default_language: &str) -> Self {
        Self {
            root,
            default_language: default_language.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn core_guidelines_path(&self) -> PathBuf {
        self.root.join(CORE_GUIDELINES_FILE)
    }

    fn entry_path(&self, category: Category, id: &str) -> PathBuf {
        self.root.join(category.as_str()).join(format!("{id}.md"))
    }

    /// Validate, persist one entry, then rebuild the index. Returns the entry's path.
    pub fn add(&self, draft: &EntryDraft, clock: &dyn Clock) -> Result<PathBuf> {
        let category: Category = draft.category.parse()?;
        if draft.title.trim().is_empty() {
            return Err(GuideError::InvalidInput("snippet title must not be empty".into()));
        }

        let now = clock.now();
        let entry = Entry {
            id: slug::slugify(&draft.title, now),
            category,
            title: draft.title.trim().to_string(),
            description: draft.description.clone(),
            code: draft.code.clone(),
            language: draft
                .language
                .clone()
                .unwrap_or_else(|| self.default_language.clone()),
            tags: draft.tags.clone(),
            notes: draft.notes.clone(),
            created_at: now,
        };

        let path = self.entry_path(category, &entry.id);
        if path.exists() {
            tracing::warn!(path = %path.display(), "snippet slug collision, overwriting existing entry");
        }
        write_atomic(&path, &entry.to_file()?)?;

        let index = self.rebuild_index()?;
        tracing::info!(
            category = %category,
            id = %entry.id,
            total = index.total_count,
            "snippet added"
        );
        Ok(path)
    }

    /// Entries of one category, sorted by file name.
    pub fn get(&self, category: Category) -> Result<Vec<Entry>> {
        Ok(self
            .scan_category(category)?
            .into_iter()
            .map(|(_, entry)| entry)
            .collect())
    }

    /// Every entry in discovery order: categories in their fixed order, then file name.
    pub fn all(&self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for category in Category::ALL {
            entries.extend(self.get(category)?);
        }
        Ok(entries)
    }

    /// Case-insensitive keyword search. No match is an empty list.
    pub fn search(&self, keyword: &str) -> Result<Vec<Entry>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|entry| entry.matches(keyword))
            .collect())
    }

    fn scan_category(&self, category: Category) -> Result<Vec<(String, Entry)>> {
        let dir = self.root.join(category.as_str());
        let mut entries = Vec::new();
        for name in list_files(&dir, "md")? {
            let path = dir.join(&name);
            let Lookup::Found(text) = read_optional(&path)? else {
                continue;
            };
            match Entry::from_file(&text, &path) {
                Ok(entry) if entry.category == category => entries.push((name, entry)),
                Ok(entry) => tracing::warn!(
                    path = %path.display(),
                    declared = %entry.category,
                    "snippet filed under the wrong category, skipping"
                ),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable snippet"),
            }
        }
        Ok(entries)
    }

    /// Re-scan every entry file and compute the index without writing it.
    pub fn scan_index(&self) -> Result<Index> {
        let mut scanned: Vec<(String, Entry)> = Vec::new();
        for category in Category::ALL {
            scanned.extend(self.scan_category(category)?);
        }
        Ok(Index::build(
            scanned.iter().map(|(name, entry)| (name.as_str(), entry)),
            self.core_guidelines_path().is_file(),
        ))
    }

    /// Recompute the index from the entry files and write `README.md`.
    pub fn rebuild_index(&self) -> Result<Index> {
        let index = self.scan_index()?;
        write_atomic(&self.index_path(), &index.to_markdown())?;
        tracing::debug!(total = index.total_count, "notes index rebuilt");
        Ok(index)
    }

    /// `true` when `README.md` differs from what a fresh re-scan would write.
    pub fn index_drifted(&self) -> Result<bool> {
        let expected = self.scan_index()?.to_markdown();
        Ok(match read_optional(&self.index_path())? {
            Lookup::Found(text) => text != expected,
            Lookup::Missing { .. } => true,
        })
    }

    /// Without a category, the aggregate index; with one, every entry of it rendered.
    pub fn read_notes(&self, category: Option<Category>) -> Result<Lookup<String>> {
        let Some(category) = category else {
            return read_optional(&self.index_path());
        };

        let entries = self.get(category)?;
        if entries.is_empty() {
            return Ok(Lookup::Missing {
                path: self.root.join(category.as_str()),
            });
        }
        let mut out = format!(
            "# {} {} ({})\n",
            category.emoji(),
            category.title(),
            entries.len()
        );
        for entry in &entries {
            out.push_str(&format!("\n## {}\n\n{}\n\n", entry.title, entry.description));
            if !entry.tags.is_empty() {
                out.push_str(&format!("Tags: {}\n\n", entry.tags.join(", ")));
            }
            out.push_str(&format!("```{}\n{}\n```\n", entry.language, entry.code.trim_end()));
            if let Some(notes) = &entry.notes {
                out.push_str(&format!("\n{}\n", notes.trim()));
            }
        }
        Ok(Lookup::Found(out))
    }

    /// Write the core guidelines document and surface it in the index.
    pub fn set_core_guidelines(&self, content: &str) -> Result<PathBuf> {
        let path = self.core_guidelines_path();
        let body = content.trim_end();
        let text = if body.trim_start().starts_with('#') {
            format!("{body}\n")
        } else {
            format!("# Core Guidelines\n\n{body}\n")
        };
        write_atomic(&path, &text)?;
        self.rebuild_index()?;
        tracing::info!(path = %path.display(), "core guidelines updated");
        Ok(path)
    }

    pub fn read_core_guidelines(&self) -> Result<Lookup<String>> {
        read_optional(&self.core_guidelines_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> SnippetStore {
        SnippetStore::at(tmp.path().join("notes"), "typescript")
    }

    fn draft(category: &str, title: &str) -> EntryDraft {
        EntryDraft {
            category: category.into(),
            title: title.into(),
            description: "desc".into(),
            code: "code()".into(),
            ..Default::default()
        }
    }

    #[test]
    fn invalid_category_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let err = store.add(&draft("widget", "X"), &FixedClock::from_millis(0)).unwrap_err();
        assert!(matches!(err, GuideError::InvalidInput(_)));
        assert!(!store.root().exists());
    }

    #[test]
    fn default_language_applies() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store.add(&draft("tip", "Use strict"), &FixedClock::from_millis(0)).unwrap();
        assert_eq!(store.get(Category::Tip).unwrap()[0].language, "typescript");
    }

    #[test]
    fn same_title_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store.add(&draft("tip", "Same"), &FixedClock::from_millis(0)).unwrap();
        store.add(&draft("tip", "Same"), &FixedClock::from_millis(5)).unwrap();
        assert_eq!(store.get(Category::Tip).unwrap().len(), 1);
        assert_eq!(store.scan_index().unwrap().total_count, 1);
    }

    #[test]
    fn read_notes_by_category() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        assert!(!store.read_notes(Some(Category::Hook)).unwrap().is_found());

        store.add(&draft("hook", "useAuth"), &FixedClock::from_millis(0)).unwrap();
        let text = store.read_notes(Some(Category::Hook)).unwrap().found().unwrap();
        assert!(text.starts_with("# 🪝 Hooks (1)"));
        assert!(text.contains("```typescript\ncode()\n```"));

        let index = store.read_notes(None).unwrap().found().unwrap();
        assert!(index.contains("- [useAuth](./hook/useauth.md)"));
    }

    #[test]
    fn core_guidelines_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        assert!(!store.read_core_guidelines().unwrap().is_found());

        store.set_core_guidelines("Always write tests.").unwrap();
        let text = store.read_core_guidelines().unwrap().found().unwrap();
        assert_eq!(text, "# Core Guidelines\n\nAlways write tests.\n");
        assert!(store.scan_index().unwrap().has_core_guidelines);
        assert!(!store.index_drifted().unwrap());
    }

    #[test]
    fn drift_detected_after_hand_edit() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store.add(&draft("style", "Flex center"), &FixedClock::from_millis(0)).unwrap();
        assert!(!store.index_drifted().unwrap());

        std::fs::write(store.index_path(), "# edited by hand\n").unwrap();
        assert!(store.index_drifted().unwrap());
        store.rebuild_index().unwrap();
        assert!(!store.index_drifted().unwrap());
    }
}
