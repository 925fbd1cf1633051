// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the issuelens CLI.

pub mod analyze;
pub mod completion;
pub mod schema;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use issuelens_core::AppConfig;

use crate::cli::{Commands, OutputContext};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }
    let s = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
    {
        s.set_style(spinner_style);
    }
    s.set_message(message.to_string());
    s.enable_steady_tick(Duration::from_millis(100));
    Some(s)
}

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: OutputContext, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Analyze { repo_url, number } => {
            let spinner = maybe_spinner(&ctx, "Analyzing issue...");
            let result = analyze::run(config, &repo_url, number).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }
        Commands::Prompt { repo_url, number } => {
            let spinner = maybe_spinner(&ctx, "Fetching issue...");
            let result = analyze::run_prompt(config, &repo_url, number).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }
        Commands::Schema => schema::run(),
        Commands::Completion { shell } => completion::run_generate(shell),
    }
}
