// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `IssueLensError` and appends a hint for the
//! error kind. Other errors are shown as-is.

use anyhow::Error;
use issuelens_core::IssueLensError;
use issuelens_core::config::{OLLAMA_BASE_URL_ENV, OLLAMA_MODEL_ENV, config_file_path};

/// Formats an error for CLI display with helpful hints.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<IssueLensError>() else {
        return format!("{error:#}");
    };

    match err {
        IssueLensError::InvalidReference { .. } => format!(
            "{err}\n\nTip: Use a repository URL like https://github.com/owner/repo and an issue number of 1 or more."
        ),
        IssueLensError::NotFound => format!(
            "{err}\n\nTip: Private repositories need a token in GH_TOKEN or GITHUB_TOKEN."
        ),
        IssueLensError::RemoteApi { status: 403 | 429, .. } => format!(
            "{err}\n\nTip: You may have hit the GitHub rate limit. Set GH_TOKEN or GITHUB_TOKEN for a higher limit."
        ),
        IssueLensError::RemoteApi { .. } => err.to_string(),
        IssueLensError::Connectivity { .. } => {
            format!("{err}\n\nTip: Check your internet connection and try again.")
        }
        IssueLensError::Config { .. } => format!(
            "{err}\n\nTip: Make sure Ollama is running and the model is pulled. \
             Set {OLLAMA_BASE_URL_ENV} and {OLLAMA_MODEL_ENV}, or edit {}",
            config_file_path().display()
        ),
        IssueLensError::MalformedModelOutput { .. } => format!(
            "{err}\n\nTip: Smaller models sometimes ignore the JSON instructions. Try again or use a larger model with --model."
        ),
    }
}
