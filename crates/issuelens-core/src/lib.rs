// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # IssueLens Core
//!
//! Core library for `IssueLens` - GitHub issue analysis with a local model.
//!
//! This crate provides reusable components for:
//! - Parsing repository URLs and fetching issues from the GitHub REST API
//! - Rendering the analysis prompt
//! - Calling a local Ollama server
//! - Recovering and normalizing the model reply into an [`IssueAnalysis`]
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use issuelens_core::{EnvTokenProvider, IssueAnalyzer, TokenProvider, load_config};
//!
//! # async fn example() -> issuelens_core::Result<()> {
//! let config = load_config()?;
//! let analyzer = IssueAnalyzer::new(&config, EnvTokenProvider.github_token())?;
//!
//! let analysis = analyzer
//!     .analyze("https://github.com/rust-lang/rust", 1)
//!     .await?;
//! println!("{}: {}", analysis.issue_type, analysis.summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ai`] - Prompt, model backend and reply normalization
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`facade`] - End-to-end analysis pipeline
//! - [`github`] - Repository URL parsing and issue fetching

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{EnvTokenProvider, TokenProvider};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::IssueLensError;

/// Convenience Result type for `IssueLens` operations.
///
/// This is equivalent to `std::result::Result<T, IssueLensError>`.
pub type Result<T> = std::result::Result<T, IssueLensError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, GitHubConfig, OllamaConfig, ServerConfig, config_dir, config_file_path,
    load_config, load_config_from,
};

// ============================================================================
// Analysis
// ============================================================================

pub use ai::{
    AiProvider, IssueAnalysis, IssueType, OllamaClient, Prompt, RawIssue, build_prompt,
    parse_model_reply,
};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::{GitHubClient, RepoReference};

// ============================================================================
// Utilities
// ============================================================================

pub use utils::{collapse_newlines, truncate_for_analysis, truncate_with_marker};

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{IssueAnalyzer, analyze_issue};

// ============================================================================
// Modules
// ============================================================================

pub mod ai;
pub mod auth;
pub mod config;
pub mod error;
pub mod facade;
pub mod github;
pub mod utils;
