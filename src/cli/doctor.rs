//! CLI `doctor` command: checks the guide set and notes index and prints a report.

use anyhow::{Context, Result};
use std::path::Path;

use guidebook::config::GuidebookConfig;
use guidebook::guide::GuideSet;
use guidebook::notes::SnippetStore;

use super::project_root;

/// Report missing guide documents, documents without section markers, and notes
/// index drift.
pub fn doctor(config: &GuidebookConfig, project: &Path) -> Result<()> {
    let project = project_root(project)?;
    let guides = GuideSet::new(&project, &config.layout);
    let store = SnippetStore::new(&project, &config.layout, &config.notes);

    let problems = guides.check().context("failed to inspect guide documents")?;
    let index = store.scan_index().context("failed to scan snippets")?;
    let drifted = store.index_drifted().context("failed to compare notes index")?;

    println!("Guidebook Health Report");
    println!("=======================");
    println!();
    println!("Project:           {}", project.display());
    println!("Guides:            {}", guides.guides_root().display());
    println!("Notes:             {}", store.root().display());
    println!();
    if problems.is_empty() {
        println!("Guide documents:   OK");
    } else {
        println!("Guide documents:   {} problem(s)", problems.len());
        for problem in &problems {
            println!("  - {problem}");
        }
    }
    println!();
    println!("Snippets:          {}", index.total_count);
    println!(
        "Core guidelines:   {}",
        if index.has_core_guidelines { "present" } else { "not set" }
    );
    if drifted {
        println!("Notes index:       STALE (run `guidebook notes rebuild {}`)", project.display());
    } else {
        println!("Notes index:       OK");
    }

    if !problems.is_empty() {
        println!();
        println!("Run `guidebook generate {}` to rewrite the guide.", project.display());
    }
    Ok(())
}
