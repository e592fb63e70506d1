//! # Vexa RAG - Document Question Answering over Local Models
//!
//! A minimal retrieval-augmented question-answering pipeline: ingest text,
//! markdown, and PDF documents, split them into overlapping chunks, embed
//! each chunk into a fixed-dimension vector, store the vectors in a
//! Pinecone-style similarity index, and answer natural-language questions by
//! retrieving the top-matching chunks and feeding them as context to a
//! locally hosted Ollama model.
//!
//! ## Overview
//!
//! Embeddings come from Ollama's `nomic-embed-text` when the daemon is
//! reachable; otherwise the pipeline commits to a deterministic hash-based
//! fallback so ingestion and retrieval keep working offline. Ingestion is
//! full-replace: every run clears the index before re-populating it.
//!
//! ## Architecture
//!
//! ```text
//! ingest:  folder -> reader -> chunker -> embedder -> index (clear + upsert)
//! ask:     question -> embedder -> index query -> prompt -> completion -> answer
//! ```
//!
//! ## Modules
//!
//! - [`client`]: high-level [`RagClient`] with ingest / ask / clear operations
//! - [`chunker`]: sliding-window text chunking
//! - [`reader`]: document text extraction (txt, md, pdf)
//! - [`embedding`]: embedding providers (Ollama semantic, hashed fallback)
//! - [`completion`]: Ollama completion client
//! - [`vector_index`]: vector index abstraction (Pinecone, in-memory)
//! - [`config`]: configuration with TOML file and environment overrides
//! - [`error`]: error types and result aliases
//! - [`paths`]: platform config-file location
//! - [`types`]: report types
//!
//! ## Usage Example
//!
//! ```no_run
//! use vexa_rag::{Config, RagClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = RagClient::connect(Config::new()?).await?;
//!     client.ingest_folder("./docs").await?;
//!     let answer = client.ask("What color is the sky?").await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

/// Sliding-window text chunking
pub mod chunker;

/// High-level client: ingest, ask, clear
pub mod client;

/// Ollama completion client
pub mod completion;

/// Configuration with TOML file and environment variable overrides
pub mod config;

/// Embedding providers: Ollama semantic and deterministic hashed fallback
pub mod embedding;

/// Error types and utilities
pub mod error;

/// Platform config-file location
pub mod paths;

/// Document text extraction for supported file types
pub mod reader;

/// Report types
pub mod types;

/// Vector index abstraction: Pinecone data plane and in-memory
pub mod vector_index;

pub use client::{NO_INFORMATION_ANSWER, RagClient};
pub use config::Config;
pub use error::RagError;
pub use types::IngestReport;
