//! Language-model completion backed by a local Ollama daemon
//!
//! One synchronous (non-streaming) round-trip to `POST /api/generate` per
//! prompt. The trait seam keeps the query pipeline testable without a
//! running model.

use crate::config::OllamaConfig;
use crate::error::CompletionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for text completion
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for the prompt
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Completion provider that delegates to Ollama's generate endpoint.
pub struct OllamaGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaGenerator {
    pub fn new(config: &OllamaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/generate", config.url.trim_end_matches('/')),
            model: config.completion_model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for OllamaGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        tracing::debug!(model = %self.model, "Generating completion");

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::RequestFailed(format!(
                "HTTP {} from {}",
                status, self.endpoint
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(parsed.response)
    }
}
