//! Pinecone data-plane client
//!
//! Minimal REST client for the three operations the pipeline needs:
//! `POST /vectors/upsert`, `POST /query`, and `POST /vectors/delete` with
//! `deleteAll`. Every request carries the `Api-Key` header.

use super::{ScoredMatch, VectorIndex, VectorRecord};
use crate::config::IndexConfig;
use crate::error::IndexError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

pub struct PineconeIndex {
    client: reqwest::Client,
    host: String,
    name: String,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<UpsertVector<'a>>,
}

#[derive(Serialize)]
struct UpsertVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: Metadata<'a>,
}

#[derive(Serialize)]
struct Metadata<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    metadata: Option<MatchMetadata>,
}

#[derive(Deserialize)]
struct MatchMetadata {
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest {
    delete_all: bool,
}

impl PineconeIndex {
    /// Build a client for the index's data-plane host.
    pub fn new(config: &IndexConfig) -> Result<Self, IndexError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| IndexError::ClientBuildFailed(format!("invalid API key: {}", e)))?;
        headers.insert("Api-Key", api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| IndexError::ClientBuildFailed(e.to_string()))?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            name: config.name.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }
}

#[async_trait::async_trait]
impl VectorIndex for PineconeIndex {
    async fn clear(&self) -> Result<(), IndexError> {
        tracing::info!(index = %self.name, "Clearing all vectors from index");

        let response = self
            .client
            .post(self.endpoint("/vectors/delete"))
            .json(&DeleteRequest { delete_all: true })
            .send()
            .await
            .map_err(|e| IndexError::ClearFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::ClearFailed(format!("HTTP {}", status)));
        }

        Ok(())
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), IndexError> {
        if records.is_empty() {
            return Ok(());
        }

        tracing::debug!(count = records.len(), "Upserting vectors");

        let request = UpsertRequest {
            vectors: records
                .iter()
                .map(|record| UpsertVector {
                    id: &record.id,
                    values: &record.values,
                    metadata: Metadata { text: &record.text },
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.endpoint("/vectors/upsert"))
            .json(&request)
            .send()
            .await
            .map_err(|e| IndexError::UpsertFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::UpsertFailed(format!("HTTP {}", status)));
        }

        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredMatch>, IndexError> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(self.endpoint("/query"))
            .json(&request)
            .send()
            .await
            .map_err(|e| IndexError::QueryFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::QueryFailed(format!("HTTP {}", status)));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| IndexError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .matches
            .into_iter()
            .map(|m| ScoredMatch {
                id: m.id,
                score: m.score,
                text: m.metadata.and_then(|meta| meta.text),
            })
            .collect())
    }
}
