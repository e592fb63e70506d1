//! Embedded in-memory vector index
//!
//! Cosine-similarity ranking over a plain record list. Used by the
//! integration tests and by offline runs where no Pinecone index is
//! reachable. Upsert is idempotent per id, matching the external index's
//! contract.

use super::{ScoredMatch, VectorIndex, VectorRecord};
use crate::error::IndexError;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryIndex {
    records: RwLock<Vec<VectorRecord>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait::async_trait]
impl VectorIndex for MemoryIndex {
    async fn clear(&self) -> Result<(), IndexError> {
        self.records.write().await.clear();
        Ok(())
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), IndexError> {
        let mut stored = self.records.write().await;
        for record in records {
            match stored.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => stored.push(record),
            }
        }
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredMatch>, IndexError> {
        let stored = self.records.read().await;

        let mut matches: Vec<ScoredMatch> = stored
            .iter()
            .map(|record| ScoredMatch {
                id: record.id.clone(),
                score: cosine_similarity(vector, &record.values),
                text: Some(record.text.clone()),
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }
}
