// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides repository URL parsing and the issue fetcher.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::IssueLensError;

pub mod issues;

pub use issues::GitHubClient;

/// `Accept` header value for the structured issue format.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Client identifier sent as `User-Agent` on every GitHub request.
pub const USER_AGENT: &str = concat!("issuelens/", env!("CARGO_PKG_VERSION"));

/// Host segment followed by `/owner/repo`; the host must start the input or
/// follow a `/`, `.` or `@` so look-alike hosts do not match.
static REPO_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[/.@])github\.com/([^/?#\s]+)/([^/?#\s]+)")
        .expect("repository URL pattern is valid")
});

/// An `owner/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoReference {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name, never carrying a `.git` suffix.
    pub name: String,
}

impl RepoReference {
    /// Parses a repository URL such as `https://github.com/owner/repo`.
    ///
    /// Extra path segments (`/issues/12`), a query string, a fragment, and a
    /// trailing `.git` are all tolerated.
    ///
    /// # Errors
    ///
    /// Returns `IssueLensError::InvalidReference` if the input does not contain
    /// a recognizable `github.com/owner/repo` segment.
    pub fn parse(input: &str) -> Result<Self, IssueLensError> {
        let input = input.trim();
        let invalid = || IssueLensError::InvalidReference {
            message: format!("Could not parse GitHub repo URL: {input}"),
        };

        let captures = REPO_URL_PATTERN.captures(input).ok_or_else(invalid)?;
        let owner = captures[1].to_string();
        let raw_name = &captures[2];
        let name = raw_name.strip_suffix(".git").unwrap_or(raw_name).to_string();

        if owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        debug!(owner = %owner, repo = %name, "Parsed repository URL");
        Ok(Self { owner, name })
    }

    /// Returns `owner/name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
