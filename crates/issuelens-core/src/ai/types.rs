// SPDX-License-Identifier: Apache-2.0

//! Request/response types for the Ollama chat API and the analysis record.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::utils::truncate_for_analysis;

/// Placeholder used when an issue has no title.
pub const NO_TITLE: &str = "(no title)";

/// A chat message for the Ollama API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "llama3").
    pub model: String,
    /// Always `false`: the whole reply is returned in one body.
    pub stream: bool,
    /// System instruction followed by the user prompt.
    pub messages: Vec<ChatMessage>,
}

/// Non-streamed reply from `POST /api/chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    /// The generated message, if any.
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// Message part of a chat reply.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    /// Generated text.
    #[serde(default)]
    pub content: String,
}

/// Issue text as fetched from GitHub, already sanitized for analysis.
///
/// Construct it with [`RawIssue::new`], which enforces the invariants:
/// a non-empty title, no blank comments, and every text field truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    /// Issue title, `(no title)` when absent.
    pub title: String,
    /// Issue body, possibly empty.
    pub body: String,
    /// Comment bodies in chronological order.
    pub comments: Vec<String>,
}

impl RawIssue {
    /// Builds a sanitized issue record.
    ///
    /// Comments are trimmed and empty ones dropped; the title falls back to
    /// [`NO_TITLE`]; the title, the body and each comment go through
    /// [`truncate_for_analysis`].
    #[must_use]
    pub fn new<I, S>(title: Option<String>, body: Option<String>, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .map_or_else(|| NO_TITLE.to_string(), |t| truncate_for_analysis(&t));

        let comments = comments
            .into_iter()
            .filter_map(|c| {
                let trimmed = c.as_ref().trim();
                (!trimmed.is_empty()).then(|| truncate_for_analysis(trimmed))
            })
            .collect();

        Self {
            title,
            body: truncate_for_analysis(&body.unwrap_or_default()),
            comments,
        }
    }
}

/// Category of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Something is broken.
    Bug,
    /// A request for new behavior.
    FeatureRequest,
    /// Documentation is missing or wrong.
    Documentation,
    /// A usage question.
    Question,
    /// Anything else, including values the model invented.
    #[default]
    Other,
}

impl IssueType {
    /// All categories, in schema order.
    pub const ALL: [IssueType; 5] = [
        IssueType::Bug,
        IssueType::FeatureRequest,
        IssueType::Documentation,
        IssueType::Question,
        IssueType::Other,
    ];

    /// Wire name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Bug => "bug",
            IssueType::FeatureRequest => "feature_request",
            IssueType::Documentation => "documentation",
            IssueType::Question => "question",
            IssueType::Other => "other",
        }
    }

    /// Matches a model-supplied category, tolerating case, surrounding
    /// whitespace, and `-` or space in place of `_`.
    ///
    /// Returns `None` for anything outside the five categories.
    #[must_use]
    pub fn from_model(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|t| t.as_str() == normalized)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured analysis of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueAnalysis {
    /// One-sentence summary of the problem or request.
    pub summary: String,
    /// Issue category.
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Priority from 1 (low) to 5 (critical) with a short justification.
    pub priority_score: String,
    /// Short labels to apply to the issue.
    pub suggested_labels: Vec<String>,
    /// Impact on users, or "N/A".
    pub potential_impact: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{MAX_TEXT_CHARS, TRUNCATION_MARKER};

    #[test]
    fn test_raw_issue_title_placeholder() {
        let issue = RawIssue::new(None, None, Vec::<String>::new());
        assert_eq!(issue.title, NO_TITLE);
        assert_eq!(issue.body, "");
        assert!(issue.comments.is_empty());

        let blank = RawIssue::new(Some("  ".to_string()), None, Vec::<String>::new());
        assert_eq!(blank.title, NO_TITLE);
    }

    #[test]
    fn test_raw_issue_drops_blank_comments_and_keeps_order() {
        let issue = RawIssue::new(
            Some("Crash".to_string()),
            Some("body".to_string()),
            ["  first  ", "", " \n\t ", "second"],
        );
        assert_eq!(issue.comments, vec!["first", "second"]);
    }

    #[test]
    fn test_raw_issue_truncates_every_field() {
        let long = "z".repeat(MAX_TEXT_CHARS + 10);
        let issue = RawIssue::new(Some(long.clone()), Some(long.clone()), [long]);
        assert!(issue.title.ends_with(TRUNCATION_MARKER));
        assert!(issue.body.ends_with(TRUNCATION_MARKER));
        assert!(issue.comments[0].ends_with(TRUNCATION_MARKER));

        let short = RawIssue::new(Some("Crash on start".to_string()), None, Vec::<String>::new());
        assert_eq!(short.title, "Crash on start");
    }

    #[test]
    fn test_issue_type_from_model() {
        assert_eq!(IssueType::from_model("bug"), Some(IssueType::Bug));
        assert_eq!(IssueType::from_model(" Bug "), Some(IssueType::Bug));
        assert_eq!(
            IssueType::from_model("feature-request"),
            Some(IssueType::FeatureRequest)
        );
        assert_eq!(
            IssueType::from_model("Feature Request"),
            Some(IssueType::FeatureRequest)
        );
        assert_eq!(IssueType::from_model("enhancement"), None);
    }

    #[test]
    fn test_issue_analysis_serializes_type_field() {
        let analysis = IssueAnalysis {
            summary: "s".to_string(),
            issue_type: IssueType::FeatureRequest,
            priority_score: "2".to_string(),
            suggested_labels: vec!["ui".to_string()],
            potential_impact: "N/A".to_string(),
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["type"], "feature_request");
        assert_eq!(json["suggested_labels"][0], "ui");
    }
}
