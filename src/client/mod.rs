//! Core library client for vexa-rag
//!
//! This module provides the main client interface for using vexa-rag as a
//! library: ingest a folder of documents, ask questions against the index,
//! and clear the index.

mod ingest;
mod query;

pub use query::NO_INFORMATION_ANSWER;

use crate::completion::{CompletionProvider, OllamaGenerator};
use crate::config::Config;
use crate::embedding::{self, EmbeddingProvider};
use crate::error::RagError;
use crate::types::IngestReport;
use crate::vector_index::{PineconeIndex, VectorIndex};
use std::path::Path;
use std::sync::Arc;

/// Main client for the RAG pipeline
///
/// Holds the embedding provider (chosen once at construction by probing the
/// Ollama daemon), the external vector index, and the completion client.
///
/// # Example
///
/// ```no_run
/// use vexa_rag::{Config, RagClient};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let client = RagClient::connect(Config::new()?).await?;
///
///     let report = client.ingest_folder("/path/to/docs").await?;
///     println!("Ingested {} chunks", report.chunks_ingested);
///
///     let answer = client.ask("What color is the sky?").await?;
///     println!("{}", answer);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RagClient {
    pub(crate) embedder: Arc<dyn EmbeddingProvider>,
    pub(crate) index: Arc<dyn VectorIndex>,
    pub(crate) completion: Arc<dyn CompletionProvider>,
    pub(crate) config: Arc<Config>,
}

impl RagClient {
    /// Create a client against the configured Pinecone index and Ollama
    /// daemon, probing the embedding service once to pick a strategy.
    pub async fn connect(config: Config) -> Result<Self, RagError> {
        config.validate()?;

        tracing::info!(index = %config.index.name, "Initializing RAG client");

        let embedder = embedding::connect(&config).await;
        let index: Arc<dyn VectorIndex> = Arc::new(PineconeIndex::new(&config.index)?);
        let completion: Arc<dyn CompletionProvider> = Arc::new(OllamaGenerator::new(&config.ollama));

        Ok(Self {
            embedder,
            index,
            completion,
            config: Arc::new(config),
        })
    }

    /// Assemble a client from explicit parts.
    ///
    /// This is the dependency-injection seam: tests and embedding callers
    /// supply their own index or completion backend.
    pub fn with_parts(
        config: Config,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            embedder,
            index,
            completion,
            config: Arc::new(config),
        }
    }

    /// Ingest every supported document under `folder`.
    ///
    /// Full-replace semantics: the index is cleared before the new records
    /// are upserted, so at most one ingestion per index may be in flight at
    /// a time. Returns the number of chunks ingested.
    pub async fn ingest_folder(&self, folder: impl AsRef<Path>) -> Result<IngestReport, RagError> {
        ingest::ingest_folder(self, folder.as_ref()).await
    }

    /// Answer a question from the indexed documents.
    pub async fn ask(&self, question: &str) -> Result<String, RagError> {
        query::ask(self, question).await
    }

    /// Remove every record from the index.
    pub async fn clear_index(&self) -> Result<(), RagError> {
        self.index.clear().await?;
        tracing::info!("Index cleared");
        Ok(())
    }

    /// The embedding strategy the client committed to at construction.
    pub fn embedding_strategy(&self) -> &str {
        self.embedder.name()
    }
}
