// SPDX-License-Identifier: Apache-2.0

//! GitHub issue fetching.
//!
//! Fetches an issue and its comments with at most two sequential GET
//! requests and returns a sanitized [`RawIssue`]. Requests are never retried.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{GITHUB_ACCEPT, RepoReference};
use crate::ai::types::RawIssue;
use crate::config::GitHubConfig;
use crate::error::IssueLensError;

/// Page size requested for the comments listing.
pub const COMMENTS_PER_PAGE: u32 = 100;

/// Fields read from `GET /repos/{owner}/{repo}/issues/{number}`.
#[derive(Debug, Deserialize)]
struct IssuePayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    comments_url: Option<String>,
}

/// Fields read from each entry of the comments listing.
#[derive(Debug, Deserialize)]
struct CommentPayload {
    #[serde(default)]
    body: Option<String>,
}

/// GitHub REST client for issue retrieval.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client with configured timeout.
    http: Client,
    /// REST API base URL without trailing slash.
    api_base_url: String,
    /// Optional bearer token.
    token: Option<SecretString>,
}

impl GitHubClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns `IssueLensError::Config` if the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, token: Option<SecretString>) -> crate::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .build()
            .map_err(|e| IssueLensError::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Returns true when requests carry an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(super::USER_AGENT));
        if let Some(token) = &self.token
            && let Ok(mut value) =
                HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    /// Sends a GET and decodes a success body.
    ///
    /// 404 on the issue itself means `NotFound`; every other failure status is
    /// a `RemoteApi` error carrying status and body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        resource: &'static str,
    ) -> crate::Result<T> {
        let response = request
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| IssueLensError::Connectivity {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IssueLensError::Connectivity {
                message: e.to_string(),
            })?;

        if resource == "issue" && status == StatusCode::NOT_FOUND {
            return Err(IssueLensError::NotFound);
        }
        if !status.is_success() {
            return Err(IssueLensError::RemoteApi {
                resource,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| IssueLensError::RemoteApi {
            resource,
            status: status.as_u16(),
            body: format!("unexpected response body: {e}"),
        })
    }

    /// Parses `repo_url` and fetches issue `number` from it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` for an unparseable URL or issue number 0,
    /// otherwise the errors of [`GitHubClient::fetch_issue`].
    pub async fn fetch_issue_by_url(&self, repo_url: &str, number: u64) -> crate::Result<RawIssue> {
        let repo = RepoReference::parse(repo_url)?;
        self.fetch_issue(&repo, number).await
    }

    /// Fetches the issue and its comments.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `number` is 0 (`InvalidReference`)
    /// - The issue or repository does not exist (`NotFound`)
    /// - Either request gets an error status (`RemoteApi`)
    /// - GitHub cannot be reached in time (`Connectivity`)
    #[instrument(skip(self), fields(repo = %repo, number = number))]
    pub async fn fetch_issue(&self, repo: &RepoReference, number: u64) -> crate::Result<RawIssue> {
        if number == 0 {
            return Err(IssueLensError::InvalidReference {
                message: "Issue numbers start from 1".to_string(),
            });
        }

        let issue_url = format!(
            "{}/repos/{}/{}/issues/{number}",
            self.api_base_url, repo.owner, repo.name
        );
        debug!(url = %issue_url, "Fetching issue");
        let issue: IssuePayload = self.get_json(self.http.get(&issue_url), "issue").await?;

        let mut comments = Vec::new();
        if let Some(comments_url) = issue.comments_url.as_deref().filter(|u| !u.is_empty()) {
            debug!(url = %comments_url, "Fetching comments");
            let request = self
                .http
                .get(comments_url)
                .query(&[("per_page", COMMENTS_PER_PAGE)]);
            let page: Vec<CommentPayload> = self.get_json(request, "comments").await?;
            comments = page.into_iter().filter_map(|c| c.body).collect();
        }

        let raw = RawIssue::new(issue.title, issue.body, comments);
        debug!(
            body_length = raw.body.len(),
            comments = raw.comments.len(),
            "Fetched issue"
        );
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::ai::types::NO_TITLE;
    use crate::utils::TRUNCATION_MARKER;

    fn client(server: &MockServer, token: Option<&str>) -> GitHubClient {
        let config = GitHubConfig {
            api_base_url: server.uri(),
            api_timeout_seconds: 5,
        };
        GitHubClient::new(&config, token.map(SecretString::from)).unwrap()
    }

    fn repo() -> RepoReference {
        RepoReference::parse("https://github.com/octocat/hello").unwrap()
    }

    fn issue_json(server: &MockServer, title: serde_json::Value, body: serde_json::Value) -> serde_json::Value {
        json!({
            "number": 7,
            "title": title,
            "body": body,
            "comments_url": format!("{}/repos/octocat/hello/issues/7/comments", server.uri()),
        })
    }

    async fn mount_issue(server: &MockServer, payload: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/issues/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(server)
            .await;
    }

    async fn mount_comments(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/issues/7/comments"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_issue_with_comments() {
        let server = MockServer::start().await;
        mount_issue(&server, issue_json(&server, json!("Crash"), json!("It breaks"))).await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/issues/7/comments"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"body": "  first  "},
                {"body": ""},
                {"body": "   \n "},
                {"body": null},
                {"body": "second"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let issue = client(&server, None).fetch_issue(&repo(), 7).await.unwrap();
        assert_eq!(issue.title, "Crash");
        assert_eq!(issue.body, "It breaks");
        assert_eq!(issue.comments, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_missing_title_and_body_use_defaults() {
        let server = MockServer::start().await;
        mount_issue(&server, issue_json(&server, json!(null), json!(null))).await;
        mount_comments(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

        let issue = client(&server, None).fetch_issue(&repo(), 7).await.unwrap();
        assert_eq!(issue.title, NO_TITLE);
        assert_eq!(issue.body, "");
        assert!(issue.comments.is_empty());
    }

    #[tokio::test]
    async fn test_no_comments_url_skips_second_request() {
        let server = MockServer::start().await;
        mount_issue(&server, json!({"title": "t", "body": "b"})).await;

        let issue = client(&server, None).fetch_issue(&repo(), 7).await.unwrap();
        assert!(issue.comments.is_empty());
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_long_body_is_truncated() {
        let server = MockServer::start().await;
        let long = "y".repeat(7000);
        mount_issue(&server, issue_json(&server, json!("t"), json!(long))).await;
        mount_comments(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

        let issue = client(&server, None).fetch_issue(&repo(), 7).await.unwrap();
        assert!(issue.body.ends_with(TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn test_issue_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let err = client(&server, None).fetch_issue(&repo(), 7).await.unwrap_err();
        assert!(matches!(err, IssueLensError::NotFound));
    }

    #[tokio::test]
    async fn test_issue_error_status_is_remote_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("rate limit exceeded"))
            .mount(&server)
            .await;

        let err = client(&server, None).fetch_issue(&repo(), 7).await.unwrap_err();
        match err {
            IssueLensError::RemoteApi {
                resource,
                status,
                body,
            } => {
                assert_eq!(resource, "issue");
                assert_eq!(status, 403);
                assert_eq!(body, "rate limit exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_comments_error_status_is_remote_api_error() {
        let server = MockServer::start().await;
        mount_issue(&server, issue_json(&server, json!("t"), json!("b"))).await;
        mount_comments(&server, ResponseTemplate::new(404).set_body_string("gone")).await;

        let err = client(&server, None).fetch_issue(&repo(), 7).await.unwrap_err();
        assert!(matches!(
            err,
            IssueLensError::RemoteApi {
                resource: "comments",
                status: 404,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_sends_headers_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/issues/7"))
            .and(header("accept", GITHUB_ACCEPT))
            .and(header("authorization", "Bearer s3cret"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "t"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, Some("s3cret"));
        assert!(client.is_authenticated());
        client.fetch_issue(&repo(), 7).await.unwrap();
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(|req: &Request| {
                assert!(!req.headers.contains_key("authorization"));
                ResponseTemplate::new(200).set_body_json(json!({"title": "t"}))
            })
            .mount(&server)
            .await;

        client(&server, None).fetch_issue(&repo(), 7).await.unwrap();
    }

    #[tokio::test]
    async fn test_issue_number_zero_is_invalid() {
        let server = MockServer::start().await;
        let err = client(&server, None).fetch_issue(&repo(), 0).await.unwrap_err();
        assert!(matches!(err, IssueLensError::InvalidReference { .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_by_url_rejects_bad_url() {
        let server = MockServer::start().await;
        let err = client(&server, None)
            .fetch_issue_by_url("not a url", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, IssueLensError::InvalidReference { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_github_is_connectivity_error() {
        let config = GitHubConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            api_timeout_seconds: 2,
        };
        let client = GitHubClient::new(&config, None).unwrap();
        let err = client.fetch_issue(&repo(), 1).await.unwrap_err();
        assert!(matches!(err, IssueLensError::Connectivity { .. }));
    }
}
