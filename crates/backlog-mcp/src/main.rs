//! Backlog MCP server binary.
//!
//! This binary runs the MCP server using stdio transport. Configuration comes
//! from `BACKLOG_API_TOKEN`, `BACKLOG_SPACE` and the other flags documented in
//! `backlog-mcp --help`.

use backlog_mcp::{BacklogMcpServer, ServerArgs};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Exits with a diagnostic before anything is served if the token or
    // space is missing.
    let args = ServerArgs::parse();

    // stdout carries the MCP protocol, so all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("backlog_mcp=info,backlog_api=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let server = BacklogMcpServer::from_args(&args)?;

    tracing::info!(space = %args.space, "Backlog MCP server ready");
    tracing::info!(tools = %server.tool_names().join(", "), "Available tools");

    server.run().await?;

    Ok(())
}
