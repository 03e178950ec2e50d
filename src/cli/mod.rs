//! Terminal commands. Each prints human-readable output to stdout.

pub mod doctor;
pub mod generate;
pub mod notes;
pub mod patterns;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Canonicalize a user-supplied project path so every operation gets an absolute root.
fn project_root(project: &Path) -> Result<PathBuf> {
    project
        .canonicalize()
        .with_context(|| format!("project directory not found: {}", project.display()))
}
