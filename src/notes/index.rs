//! The aggregate notes index, a pure function of the persisted entries.

use serde::Serialize;

use super::entry::{Category, Entry};
use super::CORE_GUIDELINES_FILE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    pub categories: Vec<CategoryIndex>,
    pub total_count: usize,
    pub has_core_guidelines: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryIndex {
    pub category: Category,
    pub count: usize,
    pub entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub title: String,
    /// Relative to the notes root, e.g. `hook/usedebounce-hook.md`.
    pub path: String,
}

impl Index {
    /// Build from `(file name, entry)` pairs in discovery order.
    pub fn build<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a Entry)>,
        has_core_guidelines: bool,
    ) -> Self {
        let mut categories: Vec<CategoryIndex> = Category::ALL
            .into_iter()
            .map(|category| CategoryIndex {
                category,
                count: 0,
                entries: Vec::new(),
            })
            .collect();

        for (file_name, entry) in entries {
            if let Some(slot) = categories.iter_mut().find(|c| c.category == entry.category) {
                slot.entries.push(IndexEntry {
                    title: entry.title.clone(),
                    path: format!("{}/{file_name}", entry.category),
                });
                slot.count += 1;
            }
        }

        let total_count = categories.iter().map(|c| c.count).sum();
        Self {
            categories,
            total_count,
            has_core_guidelines,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }

    /// `README.md` contents. Carries no timestamp, so rebuilding is idempotent.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Personal Notes\n\n");
        if self.has_core_guidelines {
            out.push_str(&format!(
                "> ⭐ **Core guidelines**: read [{CORE_GUIDELINES_FILE}](./{CORE_GUIDELINES_FILE}) first.\n\n"
            ));
        }
        out.push_str(&format!("Total entries: {}\n", self.total_count));

        for category in &self.categories {
            out.push_str(&format!(
                "\n## {} {} ({})\n\n",
                category.category.emoji(),
                category.category.title(),
                category.count
            ));
            if category.entries.is_empty() {
                out.push_str("_None yet._\n");
            }
            for entry in &category.entries {
                out.push_str(&format!("- [{}](./{})\n", entry.title, entry.path));
            }
        }
        out
    }
}
