// SPDX-License-Identifier: Apache-2.0

//! Ollama chat backend.
//!
//! Sends one non-streamed `POST {base_url}/api/chat` per analysis. There is
//! no retry; a failure at any point is reported as a configuration problem
//! naming the endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::prompt::{Prompt, SYSTEM_PROMPT};
use super::provider::AiProvider;
use super::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::OllamaConfig;
use crate::error::IssueLensError;

/// Client for a local Ollama server.
///
/// Holds the HTTP client and model configuration for reuse across requests.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// HTTP client with configured timeout.
    http: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Model name (e.g., "llama3").
    model: String,
}

impl OllamaClient {
    /// Creates a new client from configuration.
    ///
    /// The model name is not checked here so a process can start without one;
    /// every call validates it before touching the network.
    ///
    /// # Errors
    ///
    /// Returns `IssueLensError::Config` if the HTTP client cannot be built.
    pub fn new(config: &OllamaConfig) -> crate::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| IssueLensError::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.trim().to_string(),
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the chat endpoint URL.
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn build_request(&self, prompt: &Prompt) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            stream: false,
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(prompt.as_str()),
            ],
        }
    }
}

#[async_trait]
impl AiProvider for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn validate_model(&self) -> crate::Result<()> {
        if self.model.is_empty() {
            return Err(IssueLensError::Config {
                message: "OLLAMA_MODEL is not set. Please set it to a model you pulled in Ollama."
                    .to_string(),
            });
        }
        Ok(())
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &Prompt) -> crate::Result<String> {
        self.validate_model()?;

        let request = self.build_request(prompt);
        debug!(url = %self.chat_url(), "Calling Ollama chat API");

        let response = self
            .http
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| IssueLensError::Config {
                message: format!("Could not connect to Ollama at {}: {e}", self.base_url),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(IssueLensError::Config {
                message: format!("Ollama API error: {} - {error_body}", status.as_u16()),
            });
        }

        let body = response.text().await.map_err(|e| IssueLensError::Config {
            message: format!("Could not read Ollama response from {}: {e}", self.base_url),
        })?;
        let reply: ChatResponse =
            serde_json::from_str(&body).map_err(|e| IssueLensError::Config {
                message: format!("Ollama returned an unreadable response: {e}"),
            })?;

        let content = reply.message.map(|m| m.content).unwrap_or_default();
        if content.is_empty() {
            return Err(IssueLensError::Config {
                message: "Ollama returned an empty response.".to_string(),
            });
        }

        debug!(response_length = content.len(), "Received model response");
        Ok(content)
    }
}
