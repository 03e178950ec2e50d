//! Dated use-case files and their regenerated `README.md` listing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clock::{compact_timestamp, date_string, Clock};
use crate::error::{GuideError, Result};
use crate::fsutil::{list_files, read_optional, write_atomic};
use crate::notes::slug::slugify;

const README: &str = "README.md";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UseCaseDraft {
    pub title: String,
    pub description: String,
    pub code: String,
    pub scenario: Option<String>,
    pub language: Option<String>,
    pub notes: Option<String>,
}

/// Write `YYYYMMDD-HHMMSS-<slug>.md` and rebuild the listing. Returns the new file's path.
pub fn add(dir: &Path, draft: &UseCaseDraft, clock: &dyn Clock, default_language: &str) -> Result<PathBuf> {
    if draft.title.trim().is_empty() {
        return Err(GuideError::InvalidInput("use case title must not be empty".into()));
    }

    let now = clock.now();
    let file_name = format!("{}-{}.md", compact_timestamp(now), slugify(&draft.title, now));
    let path = dir.join(&file_name);
    let language = draft.language.as_deref().unwrap_or(default_language);

    let mut text = format!("# {}\n\n*Added: {}*\n\n", draft.title.trim(), date_string(now));
    if let Some(scenario) = &draft.scenario {
        text.push_str(&format!("## Scenario\n\n{}\n\n", scenario.trim()));
    }
    text.push_str(&format!("## Description\n\n{}\n\n", draft.description.trim()));
    text.push_str(&format!("## Code\n\n```{language}\n{}\n```\n", draft.code.trim_end()));
    if let Some(notes) = &draft.notes {
        text.push_str(&format!("\n## Notes\n\n{}\n", notes.trim()));
    }

    write_atomic(&path, &text)?;
    let total = rebuild_index(dir)?;
    tracing::info!(path = %path.display(), total, "use case added");
    Ok(path)
}

/// Regenerate `README.md` from the use-case files on disk, newest first.
/// Returns the number of use cases listed.
pub fn rebuild_index(dir: &Path) -> Result<usize> {
    let mut files: Vec<String> = list_files(dir, "md")?
        .into_iter()
        .filter(|name| name != README)
        .collect();
    // The YYYYMMDD-HHMMSS prefix makes name order chronological.
    files.reverse();

    let mut text = String::from("# Use Cases\n\n");
    if files.is_empty() {
        text.push_str("_No use cases yet._\n");
    }
    for name in &files {
        let title = read_optional(&dir.join(name))?
            .found()
            .and_then(|body| {
                body.lines()
                    .find_map(|l| l.strip_prefix("# ").map(|t| t.trim().to_string()))
            })
            .unwrap_or_else(|| name.trim_end_matches(".md").to_string());
        let date = name
            .get(..8)
            .filter(|prefix| prefix.chars().all(|c| c.is_ascii_digit()))
            .map(|d| format!(" ({}-{}-{})", &d[..4], &d[4..6], &d[6..]))
            .unwrap_or_default();
        text.push_str(&format!("- [{title}](./{name}){date}\n"));
    }

    write_atomic(&dir.join(README), &text)?;
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use tempfile::TempDir;

    fn draft(title: &str) -> UseCaseDraft {
        UseCaseDraft {
            title: title.into(),
            description: "Debounce search input".into(),
            code: "const q = useDebounce(value, 300)".into(),
            ..Default::default()
        }
    }

    #[test]
    fn listing_is_newest_first() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("use-cases");
        add(&dir, &draft("Older case"), &FixedClock::from_millis(1_709_640_000_000), "ts").unwrap();
        let newer = add(&dir, &draft("Newer case"), &FixedClock::from_millis(1_709_900_000_000), "ts").unwrap();

        assert_eq!(newer.file_name().unwrap(), "20240308-121320-newer-case.md");
        let readme = std::fs::read_to_string(dir.join(README)).unwrap();
        let newer_at = readme.find("Newer case").unwrap();
        let older_at = readme.find("Older case").unwrap();
        assert!(newer_at < older_at);
        assert!(readme.contains("(./20240305-120000-older-case.md) (2024-03-05)"));
    }

    #[test]
    fn same_day_listing_follows_time_not_title() {
        let tmp = TempDir::new().unwrap();
        add(tmp.path(), &draft("Zeta morning"), &FixedClock::from_millis(1_709_625_600_000), "ts").unwrap();
        add(tmp.path(), &draft("Alpha evening"), &FixedClock::from_millis(1_709_668_800_000), "ts").unwrap();

        let readme = std::fs::read_to_string(tmp.path().join(README)).unwrap();
        let evening = readme.find("Alpha evening").unwrap();
        let morning = readme.find("Zeta morning").unwrap();
        assert!(evening < morning);
        assert!(readme.contains("(./20240305-080000-zeta-morning.md) (2024-03-05)"));
    }

    #[test]
    fn rendered_file_uses_default_language() {
        let tmp = TempDir::new().unwrap();
        let path = add(tmp.path(), &draft("Search"), &FixedClock::from_millis(0), "typescript").unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("# Search\n\n*Added: 1970-01-01*"));
        assert!(text.contains("```typescript\nconst q = useDebounce(value, 300)\n```"));
        assert!(!text.contains("## Scenario"));
    }

    #[test]
    fn rebuild_on_empty_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(rebuild_index(tmp.path()).unwrap(), 0);
        let first = std::fs::read_to_string(tmp.path().join(README)).unwrap();
        rebuild_index(tmp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(tmp.path().join(README)).unwrap(), first);
    }

    #[test]
    fn empty_title_rejected_before_writing() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("use-cases");
        assert!(add(&dir, &draft("  "), &FixedClock::from_millis(0), "ts").is_err());
        assert!(!dir.exists());
    }
}
