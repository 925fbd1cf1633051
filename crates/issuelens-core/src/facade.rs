// SPDX-License-Identifier: Apache-2.0

//! Platform-agnostic entry points for the CLI and the HTTP server.
//!
//! [`IssueAnalyzer`] wires the GitHub fetcher to a model backend and runs the
//! full pipeline: parse the reference, fetch the issue, build the prompt, call
//! the model and normalize its reply. The analyzer holds no per-request state,
//! so one instance can serve concurrent requests.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, instrument};

use crate::ai::OllamaClient;
use crate::ai::prompt::{Prompt, build_prompt};
use crate::ai::provider::AiProvider;
use crate::ai::types::IssueAnalysis;
use crate::auth::TokenProvider;
use crate::config::{AppConfig, load_config};
use crate::github::{GitHubClient, RepoReference};

/// End-to-end issue analysis pipeline.
#[derive(Clone)]
pub struct IssueAnalyzer {
    github: GitHubClient,
    model: Arc<dyn AiProvider>,
}

impl std::fmt::Debug for IssueAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueAnalyzer")
            .field("github", &self.github)
            .field("provider", &self.model.name())
            .field("model", &self.model.model())
            .finish()
    }
}

impl IssueAnalyzer {
    /// Creates an analyzer backed by Ollama.
    ///
    /// # Errors
    ///
    /// Returns `IssueLensError::Config` if an HTTP client cannot be built.
    pub fn new(config: &AppConfig, github_token: Option<SecretString>) -> crate::Result<Self> {
        let github = GitHubClient::new(&config.github, github_token)?;
        let model = OllamaClient::new(&config.ollama)?;
        Ok(Self::with_provider(github, Arc::new(model)))
    }

    /// Creates an analyzer with an explicit model backend.
    #[must_use]
    pub fn with_provider(github: GitHubClient, model: Arc<dyn AiProvider>) -> Self {
        Self { github, model }
    }

    /// Returns the model backend.
    #[must_use]
    pub fn provider(&self) -> &dyn AiProvider {
        self.model.as_ref()
    }

    /// Fetches an issue and returns the prompt that would be sent for it.
    ///
    /// # Errors
    ///
    /// Returns the same fetch errors as [`IssueAnalyzer::analyze`].
    #[instrument(skip(self))]
    pub async fn build_prompt(&self, repo_url: &str, issue_number: u64) -> crate::Result<Prompt> {
        let repo = RepoReference::parse(repo_url)?;
        let issue = self.github.fetch_issue(&repo, issue_number).await?;
        Ok(build_prompt(&issue))
    }

    /// Runs the full analysis for one issue.
    ///
    /// The model configuration is checked before any network call, so a
    /// missing model fails fast without contacting GitHub.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository URL or issue number is invalid
    /// - The model is not configured
    /// - GitHub cannot be reached, or reports the issue missing or an error
    /// - The model backend fails or returns no recoverable JSON object
    #[instrument(skip(self), fields(provider = %self.model.name()))]
    pub async fn analyze(&self, repo_url: &str, issue_number: u64) -> crate::Result<IssueAnalysis> {
        let repo = RepoReference::parse(repo_url)?;
        self.analyze_repo(&repo, issue_number).await
    }

    /// Runs the full analysis for an already parsed repository reference.
    ///
    /// # Errors
    ///
    /// Returns every error of [`IssueAnalyzer::analyze`] except an invalid URL.
    pub async fn analyze_repo(
        &self,
        repo: &RepoReference,
        issue_number: u64,
    ) -> crate::Result<IssueAnalysis> {
        self.model.validate_model()?;

        let issue = self.github.fetch_issue(repo, issue_number).await?;
        debug!(repo = %repo, issue_number, "Issue fetched, calling model");

        self.model.analyze_issue(&issue).await
    }
}

/// Analyzes an issue using the on-disk configuration.
///
/// Credentials come from `provider`; an absent token means anonymous GitHub
/// access.
///
/// # Errors
///
/// Returns configuration errors from [`load_config`] and every error of
/// [`IssueAnalyzer::analyze`].
#[instrument(skip(provider))]
pub async fn analyze_issue(
    provider: &dyn TokenProvider,
    repo_url: &str,
    issue_number: u64,
) -> crate::Result<IssueAnalysis> {
    let config = load_config()?;
    let analyzer = IssueAnalyzer::new(&config, provider.github_token())?;
    analyzer.analyze(repo_url, issue_number).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::ai::types::IssueType;
    use crate::config::{GitHubConfig, OllamaConfig, ServerConfig};
    use crate::error::IssueLensError;

    fn app_config(github: &MockServer, ollama: &MockServer, model: &str) -> AppConfig {
        AppConfig {
            ollama: OllamaConfig {
                base_url: ollama.uri(),
                model: model.to_string(),
                timeout_seconds: 5,
            },
            github: GitHubConfig {
                api_base_url: github.uri(),
                api_timeout_seconds: 5,
            },
            server: ServerConfig::default(),
        }
    }

    async fn mount_github_issue(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/issues/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Widget explodes",
                "body": "Stack trace attached",
                "comments_url": format!("{}/repos/acme/widgets/issues/42/comments", server.uri()),
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/issues/42/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"body": "Seeing this on 1.2 too"}
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_analyze_runs_full_pipeline() {
        let github = MockServer::start().await;
        let ollama = MockServer::start().await;
        mount_github_issue(&github).await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {
                    "role": "assistant",
                    "content": "{\"summary\": \"Widgets explode\", \"type\": \"bug\", \"priority_score\": \"4 - crash\", \"suggested_labels\": [\"bug\", \"crash\"], \"potential_impact\": \"Data loss\"}"
                },
                "done": true
            })))
            .expect(1)
            .mount(&ollama)
            .await;

        let analyzer = IssueAnalyzer::new(&app_config(&github, &ollama, "llama3"), None).unwrap();
        let analysis = analyzer
            .analyze("https://github.com/acme/widgets", 42)
            .await
            .unwrap();

        assert_eq!(analysis.summary, "Widgets explode");
        assert_eq!(analysis.issue_type, IssueType::Bug);
        assert_eq!(analysis.priority_score, "4 - crash");
        assert_eq!(analysis.suggested_labels, vec!["bug", "crash"]);
        assert_eq!(analysis.potential_impact, "Data loss");
    }

    #[tokio::test]
    async fn test_prompt_carries_fetched_issue() {
        let github = MockServer::start().await;
        let ollama = MockServer::start().await;
        mount_github_issue(&github).await;

        let analyzer = IssueAnalyzer::new(&app_config(&github, &ollama, "llama3"), None).unwrap();
        let prompt = analyzer
            .build_prompt("https://github.com/acme/widgets.git", 42)
            .await
            .unwrap();

        assert!(prompt.as_str().contains("Title:\nWidget explodes\n"));
        assert!(prompt.as_str().contains("- Seeing this on 1.2 too"));
        assert!(ollama.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_issue_never_calls_model() {
        let github = MockServer::start().await;
        let ollama = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&github)
            .await;

        let analyzer = IssueAnalyzer::new(&app_config(&github, &ollama, "llama3"), None).unwrap();
        let err = analyzer
            .analyze("https://github.com/acme/widgets", 42)
            .await
            .unwrap_err();

        assert!(matches!(err, IssueLensError::NotFound));
        assert_eq!(err.status_code(), 400);
        assert!(ollama.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_model_makes_no_network_calls() {
        let github = MockServer::start().await;
        let ollama = MockServer::start().await;

        let analyzer = IssueAnalyzer::new(&app_config(&github, &ollama, " "), None).unwrap();
        let err = analyzer
            .analyze("https://github.com/acme/widgets", 42)
            .await
            .unwrap_err();

        assert!(matches!(err, IssueLensError::Config { .. }));
        assert_eq!(err.status_code(), 500);
        assert!(github.received_requests().await.unwrap().is_empty());
        assert!(ollama.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_is_client_error() {
        let github = MockServer::start().await;
        let ollama = MockServer::start().await;

        let analyzer = IssueAnalyzer::new(&app_config(&github, &ollama, "llama3"), None).unwrap();
        let err = analyzer
            .analyze("https://gitlab.com/acme/widgets", 1)
            .await
            .unwrap_err();

        assert!(matches!(err, IssueLensError::InvalidReference { .. }));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_unparseable_model_reply_is_server_error() {
        let github = MockServer::start().await;
        let ollama = MockServer::start().await;
        mount_github_issue(&github).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"role": "assistant", "content": "I think it's a bug."}
            })))
            .mount(&ollama)
            .await;

        let analyzer = IssueAnalyzer::new(&app_config(&github, &ollama, "llama3"), None).unwrap();
        let err = analyzer
            .analyze("https://github.com/acme/widgets", 42)
            .await
            .unwrap_err();

        assert!(matches!(err, IssueLensError::MalformedModelOutput { .. }));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_analyze_repo_uses_parsed_reference() {
        let github = MockServer::start().await;
        let ollama = MockServer::start().await;
        mount_github_issue(&github).await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"role": "assistant", "content": "{\"summary\": \"Crash\", \"type\": \"bug\"}"}
            })))
            .expect(1)
            .mount(&ollama)
            .await;

        let repo = RepoReference::parse("https://github.com/acme/widgets/issues/42").unwrap();
        let analyzer = IssueAnalyzer::new(&app_config(&github, &ollama, "llama3"), None).unwrap();
        let analysis = analyzer.analyze_repo(&repo, 42).await.unwrap();

        assert_eq!(analysis.summary, "Crash");
        assert_eq!(analysis.issue_type, IssueType::Bug);
        assert_eq!(repo.full_name(), "acme/widgets");
    }
}
