pub mod guide;
pub mod notes;

use guide::{
    AddUseCaseParams, ContextualHelpParams, DetectPatternsParams, GenerateGuideParams,
    ReadGuideParams, UpdateSectionParams,
};
use notes::{AddSnippetParams, ProjectParams, ReadNotesParams, SearchSnippetsParams, SetCoreGuidelinesParams};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use guidebook::clock::Clock;
use guidebook::config::GuidebookConfig;
use guidebook::error::{GuideError, Lookup};
use guidebook::guide::use_cases::{self, UseCaseDraft};
use guidebook::guide::{GuideSet, UpdateMode};
use guidebook::notes::{Category, EntryDraft, SnippetStore};

/// The guidebook MCP tool handler. Holds the shared config and clock and exposes
/// every tool via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct GuidebookTools {
    tool_router: ToolRouter<Self>,
    config: Arc<GuidebookConfig>,
    clock: Arc<dyn Clock>,
}

/// Failure payload: `{success: false, error, path?, not_found}`.
fn failure(e: GuideError) -> String {
    json!({
        "success": false,
        "error": e.to_string(),
        "path": e.path(),
        "not_found": e.is_not_found(),
    })
    .to_string()
}

/// Run blocking filesystem work off the async runtime.
async fn blocking<T, F>(work: F) -> Result<T, String>
where
    F: FnOnce() -> guidebook::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| format!("task failed: {e}"))?
        .map_err(failure)
}

fn project_root(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if !path.is_absolute() {
        return Err(failure(GuideError::InvalidInput(format!(
            "project_path must be absolute, got '{raw}'"
        ))));
    }
    Ok(path)
}

/// Render a [`Lookup`] read: found content, or a "does not exist yet" result.
fn lookup_json(lookup: Lookup<String>, missing: &str) -> String {
    match lookup {
        Lookup::Found(content) => json!({ "success": true, "exists": true, "content": content }),
        Lookup::Missing { path } => json!({
            "success": true,
            "exists": false,
            "message": missing,
            "path": path,
        }),
    }
    .to_string()
}

#[tool_router]
impl GuidebookTools {
    pub fn new(config: Arc<GuidebookConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
            clock,
        }
    }

    fn guides(&self, project: &Path) -> GuideSet {
        GuideSet::new(project, &self.config.layout)
    }

    fn store(&self, project: &Path) -> SnippetStore {
        SnippetStore::new(project, &self.config.layout, &self.config.notes)
    }

    /// Analyze a project and write its guide documents.
    #[tool(description = "Analyze a project (framework, routing, state, styling, components, API, conventions) and write the project guide documents.")]
    async fn analyze_and_generate_guide(
        &self,
        Parameters(params): Parameters<GenerateGuideParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!(project = %project.display(), "analyze_and_generate_guide called");

        let guides = self.guides(&project);
        let scan = self.config.scan.clone();
        let clock = Arc::clone(&self.clock);
        let report = blocking(move || guides.generate(&scan, clock.as_ref())).await?;

        Ok(json!({
            "success": true,
            "message": format!("Project guide generated ({})", report.facts.framework.name),
            "path": report.index_path,
            "documents": report.documents,
            "use_cases": report.use_case_count,
            "framework": report.facts.framework,
        })
        .to_string())
    }

    /// Read the guide index, a document, or one section.
    #[tool(description = "Read the project guide. Without 'section' returns the main index; with it returns that document or section (English or Chinese names accepted).")]
    async fn read_project_guide(
        &self,
        Parameters(params): Parameters<ReadGuideParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!(section = ?params.section, "read_project_guide called");

        let guides = self.guides(&project);
        let section = params.section;
        let lookup = blocking(move || guides.read(section.as_deref())).await?;
        Ok(lookup_json(
            lookup,
            "Project guide does not exist yet. Run analyze_and_generate_guide first.",
        ))
    }

    /// Record a use case and refresh the use-case listing.
    #[tool(description = "Add a use case (title, description, code, optional scenario) to the project guide's use-case collection.")]
    async fn add_use_case(
        &self,
        Parameters(params): Parameters<AddUseCaseParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!(title = %params.title, "add_use_case called");

        let dir = self.guides(&project).use_cases_dir();
        let clock = Arc::clone(&self.clock);
        let default_language = self.config.notes.default_language.clone();
        let draft = UseCaseDraft {
            title: params.title,
            description: params.description,
            code: params.code,
            scenario: params.scenario,
            language: params.language,
            notes: params.notes,
        };
        let path =
            blocking(move || use_cases::add(&dir, &draft, clock.as_ref(), &default_language)).await?;

        Ok(json!({ "success": true, "message": "Use case added", "path": path }).to_string())
    }

    /// Replace or append to a single guide section.
    #[tool(description = "Update one section of the project guide without touching the rest. mode: 'replace' (default) or 'append'.")]
    async fn update_guide_section(
        &self,
        Parameters(params): Parameters<UpdateSectionParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        let mode: UpdateMode = match params.mode.as_deref() {
            Some(mode) => mode.parse().map_err(failure)?,
            None => UpdateMode::default(),
        };
        tracing::info!(section = %params.section_title, mode = ?mode, "update_guide_section called");

        let guides = self.guides(&project);
        let ident = params.section_title.clone();
        let content = params.new_content;
        let path = blocking(move || guides.update_section(&ident, &content, mode)).await?;

        Ok(json!({
            "success": true,
            "message": format!("Section '{}' updated", params.section_title),
            "path": path,
        })
        .to_string())
    }

    /// Detect coding conventions.
    #[tool(description = "Detect coding conventions: naming, file organization, code style, custom hooks and import style.")]
    async fn detect_project_patterns(
        &self,
        Parameters(params): Parameters<DetectPatternsParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!(project = %project.display(), "detect_project_patterns called");

        if !project.is_dir() {
            return Err(failure(GuideError::NotFound {
                what: "project directory".into(),
                path: project,
            }));
        }
        let scan = self.config.scan.clone();
        let facts = tokio::task::spawn_blocking(move || guidebook::facts::extract(&project, &scan))
            .await
            .map_err(|e| format!("task failed: {e}"))?;

        Ok(json!({
            "success": true,
            "framework": facts.framework,
            "conventions": facts.conventions,
        })
        .to_string())
    }

    /// Classify a file and suggest conventions for it.
    #[tool(description = "Get contextual help for a file: its kind (api, utility, hook, page, component), related style files, suggested patterns, and the relevant guide document.")]
    async fn get_contextual_help(
        &self,
        Parameters(params): Parameters<ContextualHelpParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!(file = %params.file_path, "get_contextual_help called");

        let guides = self.guides(&project);
        let file = params.file_path;
        let help = tokio::task::spawn_blocking(move || guides.contextual_help(&file))
            .await
            .map_err(|e| format!("task failed: {e}"))?;

        let mut value = serde_json::to_value(&help).map_err(|e| format!("serialization failed: {e}"))?;
        value["success"] = json!(true);
        Ok(value.to_string())
    }

    /// Save a personal snippet.
    #[tool(description = "Save a personal code snippet. category: component, function, hook, style, tip, solution.")]
    async fn add_personal_snippet(
        &self,
        Parameters(params): Parameters<AddSnippetParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!(category = %params.category, title = %params.title, "add_personal_snippet called");

        let store = self.store(&project);
        let clock = Arc::clone(&self.clock);
        let draft = EntryDraft {
            category: params.category,
            title: params.title,
            description: params.description,
            code: params.code,
            language: params.language,
            tags: params.tags.unwrap_or_default(),
            notes: params.notes,
        };
        let path = blocking(move || store.add(&draft, clock.as_ref())).await?;

        Ok(json!({ "success": true, "message": "Snippet saved", "path": path }).to_string())
    }

    /// Read the notes index or every entry of one category.
    #[tool(description = "Read personal notes. Without 'category' returns the aggregate index; with it returns every entry of that category.")]
    async fn read_personal_notes(
        &self,
        Parameters(params): Parameters<ReadNotesParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        let category: Option<Category> = match params.category.as_deref() {
            Some(raw) => Some(raw.parse().map_err(failure)?),
            None => None,
        };
        tracing::info!(category = ?category, "read_personal_notes called");

        let store = self.store(&project);
        let lookup = blocking(move || store.read_notes(category)).await?;
        Ok(lookup_json(lookup, "No personal notes exist yet."))
    }

    /// Keyword search over snippets.
    #[tool(description = "Search personal snippets by keyword (case-insensitive; title, description, tags, code and notes).")]
    async fn search_personal_snippets(
        &self,
        Parameters(params): Parameters<SearchSnippetsParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!(keyword = %params.keyword, "search_personal_snippets called");

        let store = self.store(&project);
        let keyword = params.keyword;
        let preview_chars = self.config.notes.preview_chars;
        let found = blocking(move || store.search(&keyword)).await?;

        let results: Vec<_> = found
            .iter()
            .map(|entry| {
                json!({
                    "id": entry.id,
                    "category": entry.category,
                    "title": entry.title,
                    "description": entry.description,
                    "tags": entry.tags,
                    "path": format!("{}/{}.md", entry.category, entry.id),
                    "preview": entry.preview(preview_chars),
                })
            })
            .collect();

        Ok(json!({ "success": true, "count": results.len(), "results": results }).to_string())
    }

    /// Summarize the snippet store from a fresh scan.
    #[tool(description = "List personal snippets grouped by category.")]
    async fn list_personal_snippets(
        &self,
        Parameters(params): Parameters<ProjectParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!("list_personal_snippets called");

        let store = self.store(&project);
        let index = blocking(move || store.scan_index()).await?;
        Ok(json!({ "success": true, "index": index }).to_string())
    }

    /// Rebuild the notes README from the entry files.
    #[tool(description = "Rebuild the personal notes index from the snippet files on disk.")]
    async fn rebuild_notes_index(
        &self,
        Parameters(params): Parameters<ProjectParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!("rebuild_notes_index called");

        let store = self.store(&project);
        let path = store.index_path();
        let index = blocking(move || store.rebuild_index()).await?;
        Ok(json!({
            "success": true,
            "message": format!("Index rebuilt ({} entries)", index.total_count),
            "path": path,
            "index": index,
        })
        .to_string())
    }

    /// Write the core guidelines document.
    #[tool(description = "Set the core guidelines: the highest-priority notes, surfaced first in the notes index.")]
    async fn set_core_guidelines(
        &self,
        Parameters(params): Parameters<SetCoreGuidelinesParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!(content_len = params.content.len(), "set_core_guidelines called");

        let store = self.store(&project);
        let content = params.content;
        let path = blocking(move || store.set_core_guidelines(&content)).await?;
        Ok(json!({ "success": true, "message": "Core guidelines saved", "path": path }).to_string())
    }

    /// Read the core guidelines document.
    #[tool(description = "Read the core guidelines, if they have been set.")]
    async fn read_core_guidelines(
        &self,
        Parameters(params): Parameters<ProjectParams>,
    ) -> Result<String, String> {
        let project = project_root(&params.project_path)?;
        tracing::info!("read_core_guidelines called");

        let store = self.store(&project);
        let lookup = blocking(move || store.read_core_guidelines()).await?;
        Ok(lookup_json(lookup, "Core guidelines have not been set yet."))
    }
}

#[tool_handler]
impl ServerHandler for GuidebookTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Guidebook keeps project guides and personal snippet notes. Run \
                 analyze_and_generate_guide first, read_project_guide to consult the guide, \
                 update_guide_section to edit one section, and add_personal_snippet / \
                 search_personal_snippets for reusable code."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
