mod cli;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use guidebook::config::GuidebookConfig;

#[derive(Parser)]
#[command(name = "guidebook", version, about = "Project guide and snippet notes MCP server")]
struct Cli {
    /// Config file (defaults to ~/.guidebook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server
    Serve {
        /// Transport override: "stdio" or "sse" (streamable HTTP)
        #[arg(long)]
        transport: Option<String>,
    },
    /// Analyze a project and (re)write its guide documents
    Generate {
        /// Project root
        project: PathBuf,
    },
    /// Print the main index, or one document or section
    Read {
        project: PathBuf,
        /// Document or section name, e.g. "routing", "技术栈", "overview/notes"
        #[arg(long)]
        section: Option<String>,
    },
    /// Print detected coding conventions as JSON
    Patterns { project: PathBuf },
    /// Classify a file and suggest conventions for it
    HelpFor {
        project: PathBuf,
        /// File path, absolute or relative to the project
        file: String,
    },
    /// Inspect the personal snippet store
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },
    /// Check guide documents and the notes index for problems
    Doctor { project: PathBuf },
}

#[derive(Subcommand)]
enum NotesAction {
    /// List entries, optionally for one category
    List {
        project: PathBuf,
        #[arg(long)]
        category: Option<String>,
    },
    /// Case-insensitive keyword search
    Search { project: PathBuf, keyword: String },
    /// Rebuild README.md from the entry files
    Rebuild { project: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GuidebookConfig::load_from(path)?,
        None => GuidebookConfig::load()?,
    };

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { transport } => {
            let transport = transport.unwrap_or_else(|| config.server.transport.clone());
            match transport.as_str() {
                "stdio" => server::serve_stdio(config).await?,
                "sse" | "http" => server::serve_sse(config).await?,
                other => anyhow::bail!("unknown transport '{other}', expected stdio or sse"),
            }
        }
        Command::Generate { project } => cli::generate::generate(&config, &project)?,
        Command::Read { project, section } => {
            cli::generate::read(&config, &project, section.as_deref())?
        }
        Command::Patterns { project } => cli::patterns::patterns(&config, &project)?,
        Command::HelpFor { project, file } => cli::patterns::help_for(&config, &project, &file)?,
        Command::Notes { action } => match action {
            NotesAction::List { project, category } => {
                cli::notes::list(&config, &project, category.as_deref())?
            }
            NotesAction::Search { project, keyword } => {
                cli::notes::search(&config, &project, &keyword)?
            }
            NotesAction::Rebuild { project } => cli::notes::rebuild(&config, &project)?,
        },
        Command::Doctor { project } => cli::doctor::doctor(&config, &project)?,
    }

    Ok(())
}
