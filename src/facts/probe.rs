//! One-pass file inventory of a project, queried with glob patterns.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Sorted, `/`-separated relative paths of every file under a root, minus ignored
/// directories. Built once per extraction so every detector sees the same view.
pub struct ProjectProbe {
    root: PathBuf,
    files: Vec<String>,
}

impl ProjectProbe {
    pub fn scan(root: &Path, ignore: &[String]) -> Self {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !ignore.iter().any(|name| entry.file_name() == name.as_str())
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(root) {
                files.push(normalize(rel));
            }
        }
        files.sort();

        Self {
            root: root.to_path_buf(),
            files,
        }
    }

    /// Build a probe from an explicit file list (relative, `/`-separated).
    pub fn from_files(root: &Path, files: impl IntoIterator<Item = String>) -> Self {
        let mut files: Vec<String> = files.into_iter().collect();
        files.sort();
        Self {
            root: root.to_path_buf(),
            files,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// `true` if `rel` is an existing directory under the root.
    pub fn is_dir(&self, rel: &str) -> bool {
        self.root.join(rel).is_dir()
    }

    /// Files matching any of `patterns` and none of `excludes`, in sorted order.
    pub fn glob(&self, patterns: &[&str], excludes: &[&str]) -> Vec<String> {
        let include = build_globset(patterns);
        let exclude = build_globset(excludes);
        self.files
            .iter()
            .filter(|f| include.is_match(f.as_str()) && !exclude.is_match(f.as_str()))
            .cloned()
            .collect()
    }

    /// Like [`glob`](Self::glob), but matched against paths relative to `dir`.
    /// Returned paths are relative to `dir`.
    pub fn glob_under(&self, dir: &str, patterns: &[&str], excludes: &[&str]) -> Vec<String> {
        let include = build_globset(patterns);
        let exclude = build_globset(excludes);
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        self.files
            .iter()
            .filter_map(|f| f.strip_prefix(&prefix))
            .filter(|f| include.is_match(*f) && !exclude.is_match(*f))
            .map(str::to_string)
            .collect()
    }

    /// Read a file under the root; unreadable files yield `None`.
    pub fn read(&self, rel: &str) -> Option<String> {
        let path = self.root.join(rel);
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "sample file unreadable");
                None
            }
        }
    }
}

fn build_globset(patterns: &[&str]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => tracing::warn!(pattern, error = %e, "invalid glob pattern"),
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

fn normalize(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Final path segment without its extension (`src/Button.tsx` → `Button`).
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Final path segment (`src/Button.tsx` → `Button.tsx`).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
