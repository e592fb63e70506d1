//! Semantic embeddings backed by a local Ollama daemon
//!
//! Talks to `POST /api/embeddings` with one request per text. Service
//! vectors are adjusted to the configured dimension. A failure on a single
//! item falls back to the deterministic hash vector for that item only, so
//! one flaky call never aborts a whole ingestion batch.

use super::{EmbeddingProvider, hashed_vector, pad_or_truncate};
use crate::config::OllamaConfig;
use crate::error::EmbeddingError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Embedding provider that delegates to Ollama's embeddings endpoint.
pub struct OllamaEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    dimension: usize,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

impl OllamaEmbedder {
    pub fn new(config: &OllamaConfig, dimension: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/embeddings", config.url.trim_end_matches('/')),
            model: config.embedding_model.clone(),
            dimension,
        }
    }

    /// Construct an embedder and verify the service with one test embedding.
    ///
    /// Returns an error if the call fails or the service answers with an
    /// empty vector; the caller then commits to the fallback strategy.
    pub async fn probe(config: &OllamaConfig, dimension: usize) -> Result<Self, EmbeddingError> {
        let embedder = Self::new(config, dimension);
        let vector = embedder.embed_raw("test").await?;
        tracing::info!(
            model = %embedder.model,
            actual_dimension = vector.len(),
            "Ollama embedding service is available"
        );
        Ok(embedder)
    }

    /// One round-trip to the embeddings endpoint, unadjusted dimension.
    async fn embed_raw(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbeddingsRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::RequestFailed(format!(
                "HTTP {} from {}",
                status, self.endpoint
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        if parsed.embedding.is_empty() {
            return Err(EmbeddingError::EmptyVector);
        }

        Ok(parsed.embedding)
    }

    /// Embed one text, degrading to the hash vector if the service fails.
    async fn embed_with_fallback(&self, text: &str) -> Vec<f32> {
        match self.embed_raw(text).await {
            Ok(vector) => pad_or_truncate(vector, self.dimension),
            Err(e) => {
                tracing::warn!("Ollama embedding failed ({}), using hash fallback", e);
                hashed_vector(text, self.dimension)
            }
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            embeddings.push(self.embed_with_fallback(text).await);
            if (i + 1) % 5 == 0 {
                tracing::debug!("Embedded {}/{} chunks", i + 1, texts.len());
            }
        }
        Ok(embeddings)
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed_with_fallback(text).await)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_config(url: String) -> OllamaConfig {
        OllamaConfig {
            url,
            embedding_model: "nomic-embed-text".to_string(),
            completion_model: "phi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_probe_succeeds_with_vector() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(200)
                    .json_body(serde_json::json!({"embedding": [0.1, 0.2, 0.3]}));
            })
            .await;

        let embedder = OllamaEmbedder::probe(&test_config(server.base_url()), 4)
            .await
            .unwrap();
        assert_eq!(embedder.dimension(), 4);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_fails_on_empty_vector() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(200).json_body(serde_json::json!({"embedding": []}));
            })
            .await;

        let result = OllamaEmbedder::probe(&test_config(server.base_url()), 4).await;
        assert!(matches!(result, Err(EmbeddingError::EmptyVector)));
    }

    #[tokio::test]
    async fn test_probe_fails_on_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(500);
            })
            .await;

        let result = OllamaEmbedder::probe(&test_config(server.base_url()), 4).await;
        assert!(matches!(result, Err(EmbeddingError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_service_vector_padded_to_dimension() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(200)
                    .json_body(serde_json::json!({"embedding": [0.5, 0.5]}));
            })
            .await;

        let embedder = OllamaEmbedder::new(&test_config(server.base_url()), 4);
        let vector = embedder.embed_one("pad me").await.unwrap();
        assert_eq!(vector, vec![0.5, 0.5, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_service_vector_truncated_to_dimension() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(200)
                    .json_body(serde_json::json!({"embedding": [0.1, 0.2, 0.3, 0.4]}));
            })
            .await;

        let embedder = OllamaEmbedder::new(&test_config(server.base_url()), 2);
        let vector = embedder.embed_one("truncate me").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2]);
    }

    #[tokio::test]
    async fn test_per_item_fallback_on_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(503);
            })
            .await;

        let embedder = OllamaEmbedder::new(&test_config(server.base_url()), 8);
        let texts = vec!["alpha".to_string(), "beta".to_string()];
        let embeddings = embedder.embed_many(&texts).await.unwrap();

        // The batch still succeeds; each item degrades to its hash vector.
        assert_eq!(embeddings[0], hashed_vector("alpha", 8));
        assert_eq!(embeddings[1], hashed_vector("beta", 8));
    }

    #[tokio::test]
    async fn test_embed_many_preserves_order() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/embeddings")
                    .body_contains("first");
                then.status(200)
                    .json_body(serde_json::json!({"embedding": [1.0]}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/embeddings")
                    .body_contains("second");
                then.status(200)
                    .json_body(serde_json::json!({"embedding": [2.0]}));
            })
            .await;

        let embedder = OllamaEmbedder::new(&test_config(server.base_url()), 1);
        let texts = vec!["first".to_string(), "second".to_string()];
        let embeddings = embedder.embed_many(&texts).await.unwrap();
        assert_eq!(embeddings, vec![vec![1.0], vec![2.0]]);
    }
}
