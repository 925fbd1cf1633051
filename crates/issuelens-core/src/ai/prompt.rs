// SPDX-License-Identifier: Apache-2.0

//! Prompt construction for issue analysis.
//!
//! Rendering is a pure function of the [`RawIssue`]: the same issue always
//! produces a byte-identical [`Prompt`].

use std::fmt::{self, Write};

use super::types::RawIssue;
use crate::utils::collapse_newlines;

/// Fixed system instruction sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "You are an experienced software engineer helping triage GitHub issues. \
You only respond with valid JSON following the requested schema.";

/// Line rendered in place of the comments block when there are none.
pub const NO_COMMENTS: &str = "No comments on this issue yet.";

const INSTRUCTIONS: &str = r#"You are a senior engineer helping triage GitHub issues.

You will be given:
- Issue title
- Issue body
- Issue comments

Your task is to return a JSON object with the following schema:

{
"summary": "One-sentence summary of the main problem or request.",
"type": "One of: bug, feature_request, documentation, question, other.",
"priority_score": "A number from 1 (low) to 5 (critical), with a short justification.",
"suggested_labels": ["2-4 short labels such as 'bug', 'frontend', 'auth'."],
"potential_impact": "A short sentence describing impact on users if this is a bug, or 'N/A' otherwise."
}

Rules:
- Respond with only JSON. No markdown, no extra commentary.
- The JSON must be valid and parseable by a strict JSON parser.
- Keep the text concise but informative.

Here is the GitHub issue:
"#;

/// The rendered user prompt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Returns the prompt text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the prompt, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Renders the comments block: one `- ` bullet per comment, each collapsed
/// onto a single line, separated by blank lines.
fn render_comments(comments: &[String]) -> String {
    if comments.is_empty() {
        return NO_COMMENTS.to_string();
    }
    comments
        .iter()
        .map(|c| format!("- {}", collapse_newlines(c)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the analysis prompt for an issue.
#[must_use]
pub fn build_prompt(issue: &RawIssue) -> Prompt {
    let mut prompt = String::with_capacity(
        INSTRUCTIONS.len() + issue.title.len() + issue.body.len() + 64,
    );

    prompt.push_str(INSTRUCTIONS);
    let _ = write!(prompt, "\nTitle:\n{}\n", issue.title);
    let _ = write!(prompt, "\nBody:\n{}\n", issue.body);
    let _ = write!(prompt, "\nComments:\n{}\n", render_comments(&issue.comments));

    Prompt(prompt)
}
