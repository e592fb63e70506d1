//! Embedding generation
//!
//! Two interchangeable strategies behind one trait: a semantic provider
//! backed by Ollama, and a deterministic hash-based fallback. The strategy
//! is chosen once at construction by probing the Ollama daemon; a per-item
//! semantic failure still degrades to the fallback vector for that item
//! only.

mod hashed;
mod ollama;

pub use hashed::{HashedEmbedder, hashed_vector};
pub use ollama::OllamaEmbedder;

use crate::config::Config;
use crate::error::EmbeddingError;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation
///
/// Every vector returned has exactly `dimension()` entries, regardless of
/// strategy.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for a batch of texts, in order
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Generate an embedding for a single text
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Get the fixed dimension of the embeddings
    fn dimension(&self) -> usize;

    /// Get the strategy name for logging
    fn name(&self) -> &str;
}

/// Probe the semantic service once and commit to a strategy.
///
/// One successful test embedding with a non-empty vector commits to the
/// Ollama provider for the returned provider's lifetime; anything else
/// commits to the hash-based fallback. This is an availability check at
/// construction, not a per-call decision.
pub async fn connect(config: &Config) -> Arc<dyn EmbeddingProvider> {
    match OllamaEmbedder::probe(&config.ollama, config.embedding.dimension).await {
        Ok(embedder) => {
            tracing::info!(
                model = %config.ollama.embedding_model,
                "Using Ollama for semantic embeddings"
            );
            Arc::new(embedder)
        }
        Err(e) => {
            tracing::warn!("Ollama embeddings unavailable ({}), using hash-based fallback", e);
            Arc::new(HashedEmbedder::new(config.embedding.dimension))
        }
    }
}

/// Adjust a service vector to the configured dimension: zero-pad short
/// vectors, truncate long ones.
pub(crate) fn pad_or_truncate(mut vector: Vec<f32>, dimension: usize) -> Vec<f32> {
    vector.resize(dimension, 0.0);
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_short_vector() {
        let padded = pad_or_truncate(vec![1.0, 2.0], 4);
        assert_eq!(padded, vec![1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_truncate_long_vector() {
        let truncated = pad_or_truncate(vec![1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(truncated, vec![1.0, 2.0]);
    }

    #[test]
    fn test_exact_vector_unchanged() {
        let vector = pad_or_truncate(vec![1.0, 2.0, 3.0], 3);
        assert_eq!(vector, vec![1.0, 2.0, 3.0]);
    }
}
