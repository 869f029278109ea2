//! Question answering endpoint

use axum::{extract::State, Json};
use base64::Engine;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::OcrProvider;
use crate::server::state::AppState;
use crate::types::{query::QueryRequest, response::QueryResponse, Chunk};

/// POST /query - Answer a question from the indexed documents
pub async fn query_documents(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();

    tracing::info!("Query: \"{}\"", request.question);

    // An attached image augments the question; OCR failure is not fatal
    let question = match request.image_base64.as_deref() {
        Some(encoded) => augment_with_image(&state, &request.question, encoded).await,
        None => request.question.clone(),
    };

    let query_embedding = state.embedding_provider().embed(&question).await?;

    let top_k = request.top_k.unwrap_or(state.config().retrieval.top_k);
    let results = state.vector_index().search(&query_embedding, top_k).await?;

    if results.is_empty() {
        return Ok(Json(QueryResponse::new(
            "No documents have been indexed yet. Upload a file first.".to_string(),
            &[],
        )));
    }

    let context = PromptBuilder::build_context(&results);
    let answer = state
        .llm_provider()
        .generate_answer(&question, &context)
        .await?;

    let chunks: Vec<Chunk> = results.into_iter().map(|r| r.chunk).collect();

    tracing::info!("Answered in {:?} using {} chunks", start.elapsed(), chunks.len());

    Ok(Json(QueryResponse::new(answer, &chunks)))
}

/// Decode and OCR an attached image, appending its text to the question.
///
/// Any failure (bad base64, missing engine, unreadable image) logs a warning
/// and returns the question unchanged.
async fn augment_with_image(state: &AppState, question: &str, encoded: &str) -> String {
    let bytes = match base64::engine::general_purpose::STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Ignoring query image: invalid base64: {}", e);
            return question.to_string();
        }
    };

    let ocr = Arc::clone(state.ocr());
    let extracted = tokio::task::spawn_blocking(move || ocr.extract_text(&bytes))
        .await
        .map_err(|e| Error::Internal(format!("OCR task failed: {}", e)))
        .and_then(|r| r);

    match extracted {
        Ok(text) if !text.trim().is_empty() => {
            format!("{}\n\n[CONTEXT FROM USER IMAGE]: {}", question, text.trim())
        }
        Ok(_) => {
            tracing::info!("Query image contained no recognizable text");
            question.to_string()
        }
        Err(e) => {
            tracing::warn!("Ignoring query image: {}", e);
            question.to_string()
        }
    }
}
