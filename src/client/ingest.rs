//! Folder ingestion pipeline
//!
//! scan -> read-all -> chunk-all -> embed-all -> clear index -> batched
//! upsert. Per-file extraction failures degrade to empty text inside the
//! reader; everything else surfaces as an explicit error.

use super::RagClient;
use crate::chunker::TextChunker;
use crate::error::{IngestError, RagError};
use crate::reader;
use crate::types::IngestReport;
use crate::vector_index::VectorRecord;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

pub(crate) async fn ingest_folder(
    client: &RagClient,
    folder: &Path,
) -> Result<IngestReport, RagError> {
    let start = Instant::now();

    if !folder.exists() {
        return Err(IngestError::FolderNotFound(folder.display().to_string()).into());
    }
    if !folder.is_dir() {
        return Err(IngestError::NotADirectory(folder.display().to_string()).into());
    }

    tracing::info!(folder = %folder.display(), "Scanning folder");

    let files = collect_documents(folder)?;
    if files.is_empty() {
        return Err(IngestError::NoDocuments(folder.display().to_string()).into());
    }
    tracing::info!("Found {} files", files.len());

    // Read and chunk in enumeration order, flattening into one sequence.
    // Upsert ids are assigned from this sequence, so order is load-bearing.
    let chunker = TextChunker::new(
        client.config.chunking.chunk_size,
        client.config.chunking.chunk_overlap,
    )?;

    let mut chunks: Vec<String> = Vec::new();
    for path in &files {
        tracing::debug!(file = %path.display(), "Reading document");
        let text = reader::read_document(path);
        chunks.extend(chunker.chunk(&text));
    }

    if chunks.is_empty() {
        return Err(IngestError::EmptyCorpus(folder.display().to_string()).into());
    }
    tracing::info!("Created {} chunks", chunks.len());

    let embeddings = client.embedder.embed_many(&chunks).await?;

    // Full replace: wipe the previous corpus before upserting the new one
    client.index.clear().await?;

    let records: Vec<VectorRecord> = chunks
        .into_iter()
        .zip(embeddings)
        .enumerate()
        .map(|(i, (text, values))| VectorRecord {
            id: format!("chunk_{}", i),
            values,
            text,
        })
        .collect();

    let total = records.len();
    let batch_size = client.config.ingest.upsert_batch_size;
    let batch_count = total.div_ceil(batch_size);

    for (batch_index, batch) in records.chunks(batch_size).enumerate() {
        client.index.upsert(batch.to_vec()).await?;
        tracing::info!("Upserted batch {}/{}", batch_index + 1, batch_count);
    }

    tracing::info!("Ingested {} chunks", total);

    Ok(IngestReport {
        files_scanned: files.len(),
        chunks_ingested: total,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Recursively enumerate supported documents, sorted by file name so the
/// chunk sequence is stable across runs.
fn collect_documents(folder: &Path) -> Result<Vec<PathBuf>, RagError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry =
            entry.map_err(|e| RagError::Ingest(IngestError::WalkFailed(e.to_string())))?;

        if entry.file_type().is_file() && reader::is_supported(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}
