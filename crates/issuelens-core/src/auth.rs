// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction for the optional GitHub credential.
//!
//! Front ends resolve the credential once at start-up through a
//! [`TokenProvider`] and pass it into the pipeline, so the core never reads
//! ambient state while handling a request.

use secrecy::SecretString;

/// Provides the GitHub credential for issue-source API calls.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    ///
    /// Returns `None` if no token is available; requests are then made
    /// anonymously.
    fn github_token(&self) -> Option<SecretString>;
}

/// Resolves the GitHub token from environment variables.
///
/// Reads `GH_TOKEN` first, then `GITHUB_TOKEN`. Empty values are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvTokenProvider;

impl TokenProvider for EnvTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        ["GH_TOKEN", "GITHUB_TOKEN"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|token| token.trim().to_string())
            .find(|token| !token.is_empty())
            .map(SecretString::from)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use serial_test::serial;

    use super::*;

    fn clear() {
        // SAFETY: env-touching tests are serialized with #[serial].
        unsafe {
            std::env::remove_var("GH_TOKEN");
            std::env::remove_var("GITHUB_TOKEN");
        }
    }

    #[test]
    #[serial]
    fn returns_none_when_env_vars_unset() {
        clear();
        assert!(EnvTokenProvider.github_token().is_none());
    }

    #[test]
    #[serial]
    fn prefers_gh_token_over_github_token() {
        clear();
        // SAFETY: serialized test.
        unsafe {
            std::env::set_var("GH_TOKEN", "gh-value");
            std::env::set_var("GITHUB_TOKEN", "github-value");
        }
        let token = EnvTokenProvider.github_token().expect("token");
        assert_eq!(token.expose_secret(), "gh-value");
        clear();
    }

    #[test]
    #[serial]
    fn skips_blank_values() {
        clear();
        // SAFETY: serialized test.
        unsafe {
            std::env::set_var("GH_TOKEN", "   ");
            std::env::set_var("GITHUB_TOKEN", "github-value");
        }
        let token = EnvTokenProvider.github_token().expect("token");
        assert_eq!(token.expose_secret(), "github-value");
        clear();
    }
}
