//! CLI `patterns` and `help-for` commands.

use anyhow::{Context, Result};
use std::path::Path;

use guidebook::config::GuidebookConfig;
use guidebook::facts;
use guidebook::guide::GuideSet;

use super::project_root;

/// Print detected conventions as pretty JSON.
pub fn patterns(config: &GuidebookConfig, project: &Path) -> Result<()> {
    let project = project_root(project)?;
    let facts = facts::extract(&project, &config.scan);
    let json = serde_json::to_string_pretty(&facts.conventions)
        .context("failed to serialize conventions")?;
    println!("{json}");
    Ok(())
}

/// Print contextual help for one file.
pub fn help_for(config: &GuidebookConfig, project: &Path, file: &str) -> Result<()> {
    let project = project_root(project)?;
    let help = GuideSet::new(&project, &config.layout).contextual_help(file);

    println!("File:      {}", help.context.location);
    println!("Kind:      {}", help.context.kind);
    if !help.context.related_files.is_empty() {
        println!("Related:");
        for related in &help.context.related_files {
            println!("  {related}");
        }
    }
    if !help.context.suggested_patterns.is_empty() {
        println!("Suggestions:");
        for pattern in &help.context.suggested_patterns {
            println!("  - {pattern}");
        }
    }
    match (&help.related_guide, help.guide_exists) {
        (Some(guide), true) => println!("Guide:     {}", guide.display()),
        (_, false) => println!("Guide:     not generated yet"),
        (None, true) => {}
    }
    Ok(())
}
