// SPDX-License-Identifier: Apache-2.0

//! Analyze and prompt commands.

use anyhow::{Context, Result};
use issuelens_core::ai::prompt::SYSTEM_PROMPT;
use issuelens_core::{AppConfig, EnvTokenProvider, IssueAnalyzer, RepoReference, TokenProvider};
use tracing::debug;

use crate::output::{AnalyzeResult, PromptResult};

fn analyzer(config: &AppConfig) -> Result<IssueAnalyzer> {
    let token = EnvTokenProvider.github_token();
    debug!(authenticated = token.is_some(), "Creating analyzer");
    IssueAnalyzer::new(config, token).context("Failed to create issue analyzer")
}

/// Fetches and analyzes one issue.
pub async fn run(config: &AppConfig, repo_url: &str, number: u64) -> Result<AnalyzeResult> {
    let repo = RepoReference::parse(repo_url)?;
    let analysis = analyzer(config)?.analyze_repo(&repo, number).await?;

    Ok(AnalyzeResult {
        analysis,
        reference: format!("{}#{number}", repo.full_name()),
    })
}

/// Fetches one issue and returns the prompt that `run` would send.
pub async fn run_prompt(config: &AppConfig, repo_url: &str, number: u64) -> Result<PromptResult> {
    let prompt = analyzer(config)?.build_prompt(repo_url, number).await?;

    Ok(PromptResult {
        model: config.ollama.model.clone(),
        system: SYSTEM_PROMPT,
        prompt: prompt.into_string(),
    })
}
