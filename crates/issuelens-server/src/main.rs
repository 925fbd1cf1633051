// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the issuelens HTTP server.

mod logging;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use issuelens_core::{EnvTokenProvider, IssueAnalyzer, TokenProvider, load_config};

/// Serve GitHub issue analysis over HTTP.
#[derive(Debug, Parser)]
#[command(name = "issuelens-server", version, about)]
struct Args {
    /// Address to bind (defaults to `server.host` from config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (defaults to `server.port` from config)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging();

    let config = load_config().context("Failed to load configuration")?;
    let token = EnvTokenProvider.github_token();
    if token.is_none() {
        tracing::info!("No GitHub token found; using anonymous access");
    }
    if config.ollama.model.trim().is_empty() {
        tracing::warn!("No Ollama model configured; analysis requests will fail");
    }

    let analyzer =
        IssueAnalyzer::new(&config, token).context("Failed to create issue analyzer")?;

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    issuelens_server::run_http(Arc::new(analyzer), &host, port).await
}
