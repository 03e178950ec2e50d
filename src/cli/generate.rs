//! CLI `generate` and `read` commands.

use anyhow::Result;
use std::path::Path;

use guidebook::clock::SystemClock;
use guidebook::config::GuidebookConfig;
use guidebook::error::Lookup;
use guidebook::guide::GuideSet;

use super::project_root;

/// Analyze the project and write the guide set.
pub fn generate(config: &GuidebookConfig, project: &Path) -> Result<()> {
    let project = project_root(project)?;
    let guides = GuideSet::new(&project, &config.layout);
    let report = guides.generate(&config.scan, &SystemClock)?;

    let facts = &report.facts;
    println!("Guide generated for {}", project.display());
    println!();
    println!("Framework:     {}", facts.framework.name);
    println!("Routing:       {}", facts.routing.framework.as_deref().unwrap_or("-"));
    println!("State:         {}", facts.state.primary.as_deref().unwrap_or("-"));
    println!("Styling:       {}", facts.styling.kind.as_deref().unwrap_or("-"));
    println!("Components:    {}", facts.components.count);
    println!("Use cases:     {}", report.use_case_count);
    println!();
    println!("Index:         {}", report.index_path.display());
    for doc in &report.documents {
        println!("  {}", doc.display());
    }
    Ok(())
}

/// Print the main index, or one document or section.
pub fn read(config: &GuidebookConfig, project: &Path, section: Option<&str>) -> Result<()> {
    let project = project_root(project)?;
    let guides = GuideSet::new(&project, &config.layout);
    match guides.read(section)? {
        Lookup::Found(text) => print!("{text}"),
        Lookup::Missing { path } => {
            println!("Not generated yet: {}", path.display());
            println!("Run `guidebook generate {}` first.", project.display());
        }
    }
    Ok(())
}
