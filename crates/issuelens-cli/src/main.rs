// SPDX-License-Identifier: Apache-2.0

//! issuelens - Analyze GitHub issues with a local Ollama model.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use issuelens_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet);

    let mut config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    // Apply CLI overrides to config
    if let Some(model) = &cli.model {
        config.ollama.model.clone_from(model);
        debug!("Overriding Ollama model to: {model}");
    }
    if let Some(url) = &cli.ollama_url {
        config.ollama.base_url.clone_from(url);
        debug!("Overriding Ollama base URL to: {url}");
    }

    match commands::run(cli.command, output_ctx, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", errors::format_error(&e));
            std::process::exit(1);
        }
    }
}
