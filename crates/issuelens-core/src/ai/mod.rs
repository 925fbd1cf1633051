// SPDX-License-Identifier: Apache-2.0

//! AI integration module.
//!
//! Prompt rendering, the provider trait, the Ollama backend and the
//! normalization of model replies into an [`IssueAnalysis`].

pub mod normalize;
pub mod ollama;
pub mod prompt;
pub mod provider;
pub mod types;

pub use normalize::{ParseTier, RecoveredJson, parse_model_reply, recover_json};
pub use ollama::OllamaClient;
pub use prompt::{Prompt, build_prompt};
pub use provider::AiProvider;
pub use types::{IssueAnalysis, IssueType, RawIssue};
