//! Query pipeline
//!
//! Embed the trimmed question, retrieve the top matches, build a
//! context-bound prompt, complete, and strip boilerplate from the answer.

use super::RagClient;
use crate::error::{QueryError, RagError};

/// Returned when no retrieved match carries usable text; the model is not
/// invoked in that case.
pub const NO_INFORMATION_ANSWER: &str = "I don't have information about that in the documents.";

/// Boilerplate openers models like to prepend despite instructions.
const ANSWER_PREFIXES: [&str; 3] = ["the answer is", "answer:", "based on the context,"];

pub(crate) async fn ask(client: &RagClient, question: &str) -> Result<String, RagError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(QueryError::EmptyQuery.into());
    }

    tracing::info!(query = %question, "Answering query");

    let query_vector = client.embedder.embed_one(question).await?;
    let matches = client
        .index
        .query(&query_vector, client.config.query.top_k)
        .await?;

    // Keep similarity-rank order; drop matches without usable text
    let retrieved: Vec<String> = matches
        .into_iter()
        .filter_map(|m| m.text)
        .filter(|text| !text.is_empty())
        .collect();

    if retrieved.is_empty() {
        tracing::info!("No usable matches retrieved, skipping completion");
        return Ok(NO_INFORMATION_ANSWER.to_string());
    }
    tracing::debug!("Retrieved {} chunks", retrieved.len());

    let context = retrieved.join("\n\n");
    let prompt = build_prompt(&context, question);

    let completion = client.completion.complete(&prompt).await?;
    let answer = completion.trim();
    if answer.is_empty() {
        return Err(QueryError::EmptyCompletion.into());
    }

    Ok(strip_answer_prefix(answer))
}

/// Prompt instructing the model to answer only from the supplied context.
fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Context:\n{context}\n\nQuestion: {question}\n\nInstructions: Answer the question \
         using ONLY the information provided in the context above. Do not add information \
         from your general knowledge. If the context doesn't contain enough information to \
         answer, say \"I don't know\" or \"Not mentioned in the documents\". Use the exact \
         wording from the context when possible. Provide a clear answer in 2-3 sentences:"
    )
}

/// Strip the first matching boilerplate prefix, case-insensitively.
fn strip_answer_prefix(answer: &str) -> String {
    let lowered = answer.to_lowercase();
    for prefix in ANSWER_PREFIXES {
        if lowered.starts_with(prefix) {
            return answer[prefix.len()..].trim().to_string();
        }
    }
    answer.to_string()
}
