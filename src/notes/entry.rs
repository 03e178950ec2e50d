//! Snippet entries and their on-disk form.
//!
//! An entry file starts with one authoritative metadata line,
//! `<!-- snippet {json} -->`, followed by a Markdown rendering for humans.
//! Only the metadata line is read back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::clock::date_string;
use crate::error::{GuideError, Result};

const META_PREFIX: &str = "<!-- snippet ";
const META_SUFFIX: &str = " -->";

/// The closed set of snippet categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Component,
    Function,
    Hook,
    Style,
    Tip,
    Solution,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Component,
        Category::Function,
        Category::Hook,
        Category::Style,
        Category::Tip,
        Category::Solution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Function => "function",
            Self::Hook => "hook",
            Self::Style => "style",
            Self::Tip => "tip",
            Self::Solution => "solution",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Component => "Components",
            Self::Function => "Functions",
            Self::Hook => "Hooks",
            Self::Style => "Styles",
            Self::Tip => "Tips",
            Self::Solution => "Solutions",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Component => "🧩",
            Self::Function => "🔧",
            Self::Hook => "🪝",
            Self::Style => "🎨",
            Self::Tip => "💡",
            Self::Solution => "✅",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                GuideError::InvalidInput(format!(
                    "unknown category '{s}', expected one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// A snippet as submitted by a caller, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryDraft {
    pub category: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Case-insensitive substring match over title, description, tags, code and notes.
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&needle);
        hit(&self.title)
            || hit(&self.description)
            || hit(&self.code)
            || self.tags.iter().any(|t| hit(t))
            || self.notes.as_deref().is_some_and(hit)
    }

    /// The first `chars` characters of the code, with an ellipsis when cut.
    pub fn preview(&self, chars: usize) -> String {
        let mut preview: String = self.code.chars().take(chars).collect();
        if self.code.chars().count() > chars {
            preview.push('…');
        }
        preview
    }

    /// Full file contents: metadata line plus Markdown body.
    pub fn to_file(&self) -> Result<String> {
        // `-->` may only occur inside JSON strings, where the escape is equivalent.
        let meta = serde_json::to_string(self)?.replace("-->", "--\\u003e");
        let mut out = format!("{META_PREFIX}{meta}{META_SUFFIX}\n# {}\n\n", self.title);
        out.push_str(&format!("> {}\n\n", self.description.replace('\n', "\n> ")));
        out.push_str(&format!(
            "- **Category**: {} {}\n",
            self.category.emoji(),
            self.category.as_str()
        ));
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| format!("`{t}`")).collect();
            out.push_str(&format!("- **Tags**: {}\n", tags.join(", ")));
        }
        out.push_str(&format!("- **Added**: {}\n\n", date_string(self.created_at)));
        out.push_str(&format!("```{}\n{}\n```\n", self.language, self.code.trim_end()));
        if let Some(notes) = &self.notes {
            out.push_str(&format!("\n## Notes\n\n{}\n", notes.trim()));
        }
        Ok(out)
    }

    /// Parse an entry file; only the first line is read.
    pub fn from_file(text: &str, path: &Path) -> Result<Self> {
        let corrupt = |message: String| GuideError::Corrupt {
            path: path.to_path_buf(),
            message,
        };
        let first = text.lines().next().unwrap_or_default();
        let json = first
            .strip_prefix(META_PREFIX)
            .and_then(|rest| rest.strip_suffix(META_SUFFIX))
            .ok_or_else(|| corrupt("missing snippet metadata line".into()))?;
        serde_json::from_str(json).map_err(|e| corrupt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};

    fn entry() -> Entry {
        Entry {
            id: "usedebounce-hook".into(),
            category: Category::Hook,
            title: "useDebounce Hook".into(),
            description: "Delay a value.\nUseful for search -->".into(),
            code: "export function useDebounce() {}".into(),
            language: "typescript".into(),
            tags: vec!["react".into(), "perf".into()],
            notes: Some("Pair with useEffect".into()),
            created_at: FixedClock::from_millis(1_709_640_000_000).now(),
        }
    }

    #[test]
    fn file_form_reads_back() {
        let entry = entry();
        let text = entry.to_file().unwrap();
        let first = text.lines().next().unwrap();
        // only the closing marker
        assert_eq!(first.matches("-->").count(), 1);
        assert!(text.contains("```typescript\nexport function useDebounce() {}\n```"));
        assert_eq!(Entry::from_file(&text, Path::new("x.md")).unwrap(), entry);
    }

    #[test]
    fn rejects_file_without_metadata() {
        let err = Entry::from_file("# just markdown\n", Path::new("hook/x.md")).unwrap_err();
        assert!(matches!(err, GuideError::Corrupt { .. }));
    }

    #[test]
    fn category_parsing_is_strict() {
        assert_eq!("hook".parse::<Category>().unwrap(), Category::Hook);
        assert!(matches!("hooks".parse::<Category>(), Err(GuideError::InvalidInput(_))));
        assert!("Hook".parse::<Category>().is_err());
    }

    #[test]
    fn keyword_match_covers_every_text_field() {
        let entry = entry();
        for keyword in ["USEDEBOUNCE", "delay", "export function", "PERF", "pair with"] {
            assert!(entry.matches(keyword), "{keyword}");
        }
        assert!(!entry.matches("zustand"));
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let mut entry = entry();
        entry.code = "const 名字 = 1".into();
        assert_eq!(entry.preview(7), "const 名…");
        assert_eq!(entry.preview(100), "const 名字 = 1");
    }
}
