// SPDX-License-Identifier: Apache-2.0

//! AI provider trait and shared implementations.
//!
//! Defines the `AiProvider` trait that a model backend implements, along with
//! the default analysis flow: validate, build the prompt, complete, normalize.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::normalize::parse_model_reply;
use super::prompt::{Prompt, build_prompt};
use super::types::{IssueAnalysis, RawIssue};
use crate::error::IssueLensError;

/// A language model backend able to analyze issues.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "ollama").
    fn name(&self) -> &str;

    /// Returns the model name.
    fn model(&self) -> &str;

    /// Validates the model configuration.
    ///
    /// Must not touch the network. The default rejects a blank model name.
    fn validate_model(&self) -> crate::Result<()> {
        if self.model().trim().is_empty() {
            return Err(IssueLensError::Config {
                message: format!("No model configured for {}", self.name()),
            });
        }
        Ok(())
    }

    /// Sends the prompt to the model and returns the generated text.
    ///
    /// Implementations return `IssueLensError::Config` when the backend is
    /// unreachable, answers with an error status, or generates nothing.
    async fn complete(&self, prompt: &Prompt) -> crate::Result<String>;

    /// Analyzes an issue and returns the normalized record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model is not configured
    /// - The backend call fails
    /// - The reply holds no recoverable JSON object
    #[instrument(skip(self, issue), fields(provider = %self.name(), model = %self.model()))]
    async fn analyze_issue(&self, issue: &RawIssue) -> crate::Result<IssueAnalysis> {
        self.validate_model()?;

        let prompt = build_prompt(issue);
        debug!(
            prompt_length = prompt.as_str().len(),
            comments = issue.comments.len(),
            "Built analysis prompt"
        );

        let reply = self.complete(&prompt).await?;
        let analysis = parse_model_reply(&reply)?;

        debug!(
            issue_type = %analysis.issue_type,
            labels = analysis.suggested_labels.len(),
            "Analysis complete"
        );
        Ok(analysis)
    }
}
