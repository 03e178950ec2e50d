use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddSnippetParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,

    #[schemars(description = "One of: component, function, hook, style, tip, solution")]
    pub category: String,

    #[schemars(description = "Snippet title; also used to derive the file name")]
    pub title: String,

    #[schemars(description = "What the snippet is for")]
    pub description: String,

    #[schemars(description = "The code itself")]
    pub code: String,

    #[schemars(description = "Code language. Defaults to the configured language.")]
    pub language: Option<String>,

    #[schemars(description = "Optional tags for search")]
    pub tags: Option<Vec<String>>,

    #[schemars(description = "Optional usage notes")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReadNotesParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,

    #[schemars(description = "Optional category; omit to read the aggregate index")]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchSnippetsParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,

    #[schemars(description = "Case-insensitive keyword matched against title, description, tags, code and notes")]
    pub keyword: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProjectParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SetCoreGuidelinesParams {
    #[schemars(description = "Absolute path of the project root")]
    pub project_path: String,

    #[schemars(description = "Markdown content of the core guidelines")]
    pub content: String,
}
