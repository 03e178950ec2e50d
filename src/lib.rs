//! Project guides and personal snippet notes for AI coding agents, served over MCP.
//!
//! Guidebook inspects a JavaScript/TypeScript project, renders what it finds into a
//! set of Markdown guide documents, and lets an agent update single sections of
//! those documents without disturbing the rest. Alongside the guides it keeps a
//! categorized store of personal code snippets with a regenerated index.
//!
//! | Document | Primary section | Also |
//! |----------|-----------------|------|
//! | **overview** | tech-stack | description, directory-tree, notes |
//! | **routing** | routing | route-examples, usage, notes |
//! | **state** / **styling** / **components** / **api** | same as id | notes |
//! | **guidelines** | guidelines | code-style, notes |
//! | **commands** | commands | notes |
//!
//! # Architecture
//!
//! - **Extraction**: ordered first-match rule tables over `package.json` and a
//!   one-pass file inventory ([`facts`])
//! - **Synthesis**: a pure fact-set → documents function ([`synth`])
//! - **Mutation**: marker-delimited documents parsed losslessly, edited one section
//!   at a time ([`document`])
//! - **Persistence**: one atomic file write per file touched ([`fsutil`])
//! - **Transport**: MCP over stdio (primary) or Streamable HTTP
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`error`]: Error taxonomy and the [`error::Lookup`] result for optional files
//! - [`clock`]: Injected time source
//! - [`facts`]: Heuristic project inspection
//! - [`document`]: Document model, alias table, section mutation
//! - [`synth`]: Document schemas and rendering
//! - [`guide`]: The persisted guide set and use-case collection
//! - [`notes`]: Personal snippet store and index

pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod facts;
pub mod fsutil;
pub mod guide;
pub mod notes;
pub mod synth;
