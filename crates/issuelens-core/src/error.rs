// SPDX-License-Identifier: Apache-2.0

//! Error types for issuelens.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Binaries should use `anyhow::Result` for top-level error handling and
//! downcast to [`IssueLensError`] when they need the error kind.

use thiserror::Error;

/// Errors that can occur while fetching, prompting, or analyzing an issue.
#[derive(Error, Debug)]
pub enum IssueLensError {
    /// The repository URL or issue number could not be resolved.
    #[error("Invalid repository reference: {message}")]
    InvalidReference {
        /// What was wrong with the input.
        message: String,
    },

    /// The issue or the repository does not exist (HTTP 404).
    #[error("Issue or repository not found. Double-check the URL and issue number.")]
    NotFound,

    /// The issue source answered with a non-success status.
    #[error("GitHub API error ({resource}): {status} - {body}")]
    RemoteApi {
        /// Which request failed ("issue" or "comments").
        resource: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The issue source could not be reached (DNS, refused, timeout).
    #[error("Could not reach GitHub: {message}")]
    Connectivity {
        /// Underlying transport error message.
        message: String,
    },

    /// The inference backend is misconfigured, unreachable, or returned no output.
    #[error("{message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// The model's reply could not be recovered as a JSON object.
    #[error("Model returned output that is not valid JSON: {message}")]
    MalformedModelOutput {
        /// Parser error or shape problem.
        message: String,
    },
}

impl IssueLensError {
    /// Returns true when the error stems from the caller's input or the
    /// issue source, as opposed to the inference backend.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IssueLensError::InvalidReference { .. }
                | IssueLensError::NotFound
                | IssueLensError::RemoteApi { .. }
                | IssueLensError::Connectivity { .. }
        )
    }

    /// HTTP status a front end should answer with for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }
}

impl From<config::ConfigError> for IssueLensError {
    fn from(err: config::ConfigError) -> Self {
        IssueLensError::Config {
            message: format!("Configuration error: {err}"),
        }
    }
}
