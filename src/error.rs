/// Centralized error types for vexa-rag using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Main error type for the RAG pipeline
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Vector index error: {0}")]
    Index(#[from] IndexError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to splitting documents into chunks
#[derive(Error, Debug)]
pub enum ChunkingError {
    #[error("Chunk size must exceed chunk overlap (size {size}, overlap {overlap})")]
    InvalidWindow { size: usize, overlap: usize },
}

/// Errors related to embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Embedding request failed: {0}")]
    RequestFailed(String),

    #[error("Embedding service returned an empty vector")]
    EmptyVector,

    #[error("Failed to parse embedding response: {0}")]
    InvalidResponse(String),
}

/// Errors related to the external vector index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to build index client: {0}")]
    ClientBuildFailed(String),

    #[error("Failed to clear index: {0}")]
    ClearFailed(String),

    #[error("Failed to upsert vectors: {0}")]
    UpsertFailed(String),

    #[error("Failed to query index: {0}")]
    QueryFailed(String),

    #[error("Failed to parse index response: {0}")]
    InvalidResponse(String),
}

/// Errors related to language-model completion
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse completion response: {0}")]
    InvalidResponse(String),
}

/// Errors related to folder ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("No documents found in folder: {0}")]
    NoDocuments(String),

    #[error("No chunks created from documents in: {0}")]
    EmptyCorpus(String),

    #[error("Failed to walk folder: {0}")]
    WalkFailed(String),
}

/// Errors related to answering a query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Model returned an empty completion")]
    EmptyCompletion,
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

// Conversion from anyhow::Error to RagError
impl From<anyhow::Error> for RagError {
    fn from(err: anyhow::Error) -> Self {
        RagError::Other(format!("{:#}", err))
    }
}

// Helper methods for RagError
impl RagError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        RagError::Other(msg.into())
    }

    /// Check if this is a user error (bad input, nothing to ingest) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RagError::Ingest(_)
                | RagError::Query(QueryError::EmptyQuery)
                | RagError::Chunking(_)
                | RagError::Config(ConfigError::InvalidValue { .. })
        )
    }

    /// Check if this error is retryable (transport failures against external services)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RagError::Embedding(EmbeddingError::RequestFailed(_))
                | RagError::Index(
                    IndexError::ClearFailed(_)
                        | IndexError::UpsertFailed(_)
                        | IndexError::QueryFailed(_)
                )
                | RagError::Completion(CompletionError::RequestFailed(_))
                | RagError::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RagError::Ingest(IngestError::FolderNotFound("/docs".to_string()));
        assert_eq!(err.to_string(), "Ingestion error: Folder not found: /docs");
    }

    #[test]
    fn test_chunking_error_display() {
        let err = ChunkingError::InvalidWindow {
            size: 50,
            overlap: 50,
        };
        assert_eq!(
            err.to_string(),
            "Chunk size must exceed chunk overlap (size 50, overlap 50)"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let rag_err: RagError = io_err.into();
        assert!(matches!(rag_err, RagError::Io(_)));
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("test error");
        let rag_err: RagError = anyhow_err.into();
        assert!(matches!(rag_err, RagError::Other(_)));
    }

    #[test]
    fn test_is_user_error() {
        let user_err = RagError::Query(QueryError::EmptyQuery);
        assert!(user_err.is_user_error());

        let user_err = RagError::Ingest(IngestError::NoDocuments("/docs".to_string()));
        assert!(user_err.is_user_error());

        let system_err = RagError::Index(IndexError::UpsertFailed("timeout".to_string()));
        assert!(!system_err.is_user_error());
    }

    #[test]
    fn test_is_retryable() {
        let retryable = RagError::Embedding(EmbeddingError::RequestFailed("refused".to_string()));
        assert!(retryable.is_retryable());

        let not_retryable = RagError::Query(QueryError::EmptyQuery);
        assert!(!not_retryable.is_retryable());
    }

    #[test]
    fn test_error_chain() {
        let index_err = IndexError::QueryFailed("connection reset".to_string());
        let rag_err: RagError = index_err.into();
        assert!(matches!(rag_err, RagError::Index(_)));
        assert_eq!(
            rag_err.to_string(),
            "Vector index error: Failed to query index: connection reset"
        );
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            key: "chunking.chunk_size".to_string(),
            reason: "must exceed chunk_overlap".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'chunking.chunk_size': must exceed chunk_overlap"
        );
    }
}
