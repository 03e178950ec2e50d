use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GenerateGuideParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReadGuideParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,

    #[schemars(
        description = "Optional document or section, e.g. 'routing', 'tech stack', '路由', 'overview/notes'. Omit for the main index."
    )]
    pub section: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddUseCaseParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,

    #[schemars(description = "Short title of the use case")]
    pub title: String,

    #[schemars(description = "What the use case does")]
    pub description: String,

    #[schemars(description = "Example code")]
    pub code: String,

    #[schemars(description = "Optional scenario in which this applies")]
    pub scenario: Option<String>,

    #[schemars(description = "Code language for the fence. Defaults to the configured language.")]
    pub language: Option<String>,

    #[schemars(description = "Optional extra notes")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateSectionParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,

    #[schemars(
        description = "Section to update: an alias ('routing', '路由', 'tech stack'), '<doc>/<anchor>', or an existing heading"
    )]
    pub section_title: String,

    #[schemars(description = "New Markdown content for the section")]
    pub new_content: String,

    #[schemars(description = "'replace' (default) or 'append' (inserted below the section's insertion marker)")]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DetectPatternsParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ContextualHelpParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,

    #[schemars(description = "File to get help for, absolute or relative to the project root")]
    pub file_path: String,
}
