//! MCP server initialization for stdio and streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_sse`] entry points that wire the config and
//! clock into the MCP tool handler and run it.

use anyhow::Result;
use guidebook::clock::{Clock, SystemClock};
use guidebook::config::GuidebookConfig;
use rmcp::ServiceExt;
use std::sync::Arc;

use crate::tools::GuidebookTools;

fn shared_state(config: GuidebookConfig) -> (Arc<GuidebookConfig>, Arc<dyn Clock>) {
    tracing::info!(
        docs_dir = %config.layout.docs_dir,
        max_depth = config.scan.max_depth,
        "guidebook configuration loaded"
    );
    (Arc::new(config), Arc::new(SystemClock))
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: GuidebookConfig) -> Result<()> {
    tracing::info!("starting guidebook MCP server on stdio");

    let (config, clock) = shared_state(config);
    let tools = GuidebookTools::new(config, clock);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP (SSE) transport.
pub async fn serve_sse(config: GuidebookConfig) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %bind_addr, "starting guidebook MCP server on SSE/HTTP");

    let (config, clock) = shared_state(config);

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(GuidebookTools::new(config.clone(), clock.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down SSE server");
        })
        .await?;

    Ok(())
}
