/// Configuration system for vexa-rag
///
/// Supports loading from multiple sources with priority:
/// Environment variables > Config file > Defaults
use crate::error::{ConfigError, RagError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// External vector index configuration
    #[serde(default)]
    pub index: IndexConfig,

    /// Ollama service configuration (embeddings + completion)
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Embedding configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Ingestion configuration
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Query configuration
    #[serde(default)]
    pub query: QueryConfig,
}

/// External vector index configuration (Pinecone-style data plane)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Index data-plane URL (e.g. "https://vexa-abc123.svc.us-east-1.pinecone.io")
    #[serde(default = "default_index_host")]
    pub host: String,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Index name
    #[serde(default = "default_index_name")]
    pub name: String,
}

/// Ollama service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama daemon
    #[serde(default = "default_ollama_url")]
    pub url: String,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Completion model name
    #[serde(default = "default_completion_model")]
    pub completion_model: String,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Fixed output dimension; shorter service vectors are zero-padded,
    /// longer ones truncated. Must match the index configuration.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

/// Chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive windows in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Number of records per upsert request
    #[serde(default = "default_upsert_batch_size")]
    pub upsert_batch_size: usize,
}

/// Query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Number of chunks retrieved per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

// Default value functions
fn default_index_host() -> String {
    "http://localhost:5080".to_string()
}

fn default_index_name() -> String {
    "vexa".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_completion_model() -> String {
    "phi".to_string()
}

fn default_dimension() -> usize {
    768
}

fn default_chunk_size() -> usize {
    500
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_upsert_batch_size() -> usize {
    100
}

fn default_top_k() -> usize {
    5
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: default_index_host(),
            api_key: String::new(),
            name: default_index_name(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            embedding_model: default_embedding_model(),
            completion_model: default_completion_model(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            upsert_batch_size: default_upsert_batch_size(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, RagError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, RagError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), RagError> {
        if self.embedding.dimension == 0 {
            return Err(ConfigError::InvalidValue {
                key: "embedding.dimension".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        // The chunker iterates by chunk_size - chunk_overlap and would not
        // advance otherwise.
        if self.chunking.chunk_size <= self.chunking.chunk_overlap {
            return Err(ConfigError::InvalidValue {
                key: "chunking.chunk_size".to_string(),
                reason: format!(
                    "must exceed chunk_overlap ({} <= {})",
                    self.chunking.chunk_size, self.chunking.chunk_overlap
                ),
            }
            .into());
        }

        if self.ingest.upsert_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ingest.upsert_batch_size".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.query.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                key: "query.top_k".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("VEXA_RAG_INDEX_HOST") {
            self.index.host = host;
        }

        if let Ok(api_key) = std::env::var("VEXA_RAG_API_KEY") {
            self.index.api_key = api_key;
        }

        if let Ok(name) = std::env::var("VEXA_RAG_INDEX_NAME") {
            self.index.name = name;
        }

        if let Ok(url) = std::env::var("VEXA_RAG_OLLAMA_URL") {
            self.ollama.url = url;
        }

        if let Ok(model) = std::env::var("VEXA_RAG_EMBED_MODEL") {
            self.ollama.embedding_model = model;
        }

        if let Ok(model) = std::env::var("VEXA_RAG_LLM_MODEL") {
            self.ollama.completion_model = model;
        }

        if let Ok(dimension) = std::env::var("VEXA_RAG_DIMENSION")
            && let Ok(dim) = dimension.parse()
        {
            self.embedding.dimension = dim;
        }
    }

    /// Create a new Config with defaults, config file, and environment overrides
    pub fn new() -> Result<Self, RagError> {
        let mut config = Self::load_or_default()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.embedding.dimension, 768);
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.chunk_overlap, 50);
        assert_eq!(config.ingest.upsert_batch_size, 100);
        assert_eq!(config.query.top_k, 5);
        assert_eq!(config.index.name, "vexa");
        assert_eq!(config.ollama.embedding_model, "nomic-embed-text");
        assert_eq!(config.ollama.completion_model, "phi");
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let mut config = Config::default();
        config.embedding.dimension = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_overlap_not_less_than_size() {
        let mut config = Config::default();
        config.chunking.chunk_size = 50;
        config.chunking.chunk_overlap = 50;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chunk_overlap"));
    }

    #[test]
    fn test_rejects_zero_top_k() {
        let mut config = Config::default();
        config.query.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(
            err,
            RagError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml = r#"
[index]
host = "https://vexa-abc.svc.us-east-1.pinecone.io"
api_key = "secret"

[chunking]
chunk_size = 200
chunk_overlap = 20
"#;
        std::fs::write(&path, toml).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.index.host, "https://vexa-abc.svc.us-east-1.pinecone.io");
        assert_eq!(config.index.api_key, "secret");
        assert_eq!(config.chunking.chunk_size, 200);
        // Sections omitted from the file fall back to defaults
        assert_eq!(config.embedding.dimension, 768);
        assert_eq!(config.query.top_k, 5);
    }

    #[test]
    fn test_from_file_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(
            &path,
            "[chunking]\nchunk_size = 10\nchunk_overlap = 10\n",
        )
        .unwrap();

        assert!(Config::from_file(&path).is_err());
    }
}
