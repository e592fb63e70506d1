use serde::{Deserialize, Serialize};

/// Result of a folder ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// Number of supported files found under the folder
    pub files_scanned: usize,
    /// Number of chunks embedded and upserted
    pub chunks_ingested: usize,
    /// Time taken in milliseconds
    pub duration_ms: u64,
}
