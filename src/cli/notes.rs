//! CLI `notes` subcommands.

use anyhow::Result;
use std::path::Path;

use guidebook::config::GuidebookConfig;
use guidebook::notes::{Category, Entry, SnippetStore};

use super::project_root;

fn open(config: &GuidebookConfig, project: &Path) -> Result<SnippetStore> {
    let project = project_root(project)?;
    Ok(SnippetStore::new(&project, &config.layout, &config.notes))
}

fn print_entry(entry: &Entry, preview_chars: usize) {
    println!("[{}] {}  ({}/{}.md)", entry.category, entry.title, entry.category, entry.id);
    if !entry.description.is_empty() {
        println!("    {}", entry.description);
    }
    if !entry.tags.is_empty() {
        println!("    tags: {}", entry.tags.join(", "));
    }
    let preview = entry.preview(preview_chars).replace('\n', "\n    | ");
    println!("    | {preview}");
}

pub fn list(config: &GuidebookConfig, project: &Path, category: Option<&str>) -> Result<()> {
    let store = open(config, project)?;
    let entries = match category {
        Some(raw) => store.get(raw.parse::<Category>()?)?,
        None => store.all()?,
    };
    if entries.is_empty() {
        println!("No snippets.");
    }
    for entry in &entries {
        print_entry(entry, config.notes.preview_chars);
    }
    Ok(())
}

pub fn search(config: &GuidebookConfig, project: &Path, keyword: &str) -> Result<()> {
    let store = open(config, project)?;
    let found = store.search(keyword)?;
    println!("{} match(es) for '{keyword}'", found.len());
    for entry in &found {
        print_entry(entry, config.notes.preview_chars);
    }
    Ok(())
}

pub fn rebuild(config: &GuidebookConfig, project: &Path) -> Result<()> {
    let store = open(config, project)?;
    let index = store.rebuild_index()?;
    println!("Rebuilt {} ({} entries)", store.index_path().display(), index.total_count);
    for category in &index.categories {
        println!("  {:<10} {}", category.category.as_str(), category.count);
    }
    Ok(())
}
