//! Deterministic hash-based fallback embeddings
//!
//! Stands in for semantic embeddings when Ollama is unreachable. Identical
//! text always yields an identical vector, so retrieval stays stable and
//! testable without any external service.

use super::EmbeddingProvider;
use crate::error::EmbeddingError;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Embedding provider that derives vectors from a SHA-256 digest of the text.
pub struct HashedEmbedder {
    dimension: usize,
}

impl HashedEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl EmbeddingProvider for HashedEmbedder {
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts
            .iter()
            .map(|text| hashed_vector(text, self.dimension))
            .collect())
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(hashed_vector(text, self.dimension))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "hashed"
    }
}

/// Compute a deterministic unit-length vector from the text's SHA-256 digest.
///
/// Component `i` reads the 8-byte window starting at `(i * 8) % digest_len`
/// (zero-padded past the digest end), interprets it as a little-endian u64,
/// and maps `value % 1000` linearly into [-1, 1]. The vector is then
/// L2-normalized; an all-zero vector is left as-is.
pub fn hashed_vector(text: &str, dimension: usize) -> Vec<f32> {
    let digest = Sha256::digest(text.as_bytes());
    let bytes = digest.as_slice();

    let mut vector = Vec::with_capacity(dimension);
    for i in 0..dimension {
        let start = (i * 8) % bytes.len();
        let mut window = [0u8; 8];
        for (offset, slot) in window.iter_mut().enumerate() {
            if let Some(&byte) = bytes.get(start + offset) {
                *slot = byte;
            }
        }
        let value = u64::from_le_bytes(window);
        vector.push(2.0 * ((value % 1000) as f32 / 1000.0) - 1.0);
    }

    l2_normalize(&mut vector);
    vector
}

/// Scale a vector to unit length. No-op for the all-zero vector.
fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
