//! Serve command: MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};
use wenfeng_core::config::Config;

use crate::server::{ServerSettings, StyleServer};

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // No subcommand-specific arguments; stdio is the only transport
}

/// Run the MCP server until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let settings = ServerSettings {
        max_input,
        tokenizer: config.tokenizer.unwrap_or_default(),
        clean_input: config.clean_input,
        preprocess: config.preprocess,
    };
    info!(tokenizer = %settings.tokenizer, "starting MCP server on stdio");

    let service = StyleServer::with_settings(settings)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;

    info!("MCP server stopped");
    Ok(())
}
