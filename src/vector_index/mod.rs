//! Vector index abstraction
//!
//! The external similarity index is consumed through one trait with three
//! operations: clear everything, upsert records, and query by vector. The
//! Pinecone client is the production backend; the in-memory index backs
//! tests and offline runs.

pub mod memory;
pub mod pinecone;

pub use memory::MemoryIndex;
pub use pinecone::PineconeIndex;

use crate::error::IndexError;
use serde::{Deserialize, Serialize};

/// One indexed record: id, embedding, and the original chunk text carried as
/// metadata (similarity search alone cannot reconstruct it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub text: String,
}

/// One similarity match, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub id: String,
    pub score: f32,
    /// Chunk text from the record's metadata, when the index returned it
    pub text: Option<String>,
}

/// Trait for vector index operations
#[async_trait::async_trait]
pub trait VectorIndex: Send + Sync {
    /// Remove all records (full-replace semantics)
    async fn clear(&self) -> Result<(), IndexError>;

    /// Upsert records; idempotent per id
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), IndexError>;

    /// Return the `top_k` most similar records with metadata, best first
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredMatch>, IndexError>;
}
