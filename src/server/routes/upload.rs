//! File upload and indexing endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{response::UploadResponse, IngestOutcome};

/// POST /upload - Persist a file, extract its text, and index the chunks
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();

    // Take the first file field; extra fields are ignored
    let field = loop {
        match multipart
            .next_field()
            .await
            .map_err(|e| Error::Internal(format!("Failed to read multipart field: {}", e)))?
        {
            Some(field) if field.file_name().is_some() => break field,
            Some(_) => continue,
            None => return Err(Error::Internal("No file in upload request".to_string())),
        }
    };

    let filename = field
        .file_name()
        .unwrap_or("upload.bin")
        .to_string();
    let content_type = field.content_type().unwrap_or("").to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| Error::Internal(format!("Failed to read file: {}", e)))?;

    tracing::info!("Uploading file: {} ({} bytes)", filename, data.len());

    let stored = state
        .upload_store()
        .save(&filename, &content_type, &data)
        .await?;

    let chunks = match state
        .pipeline()
        .ingest(&stored.path, &stored.content_type, &stored.original_filename)
    {
        IngestOutcome::Chunks(chunks) => chunks,
        IngestOutcome::Empty => return Err(Error::NothingToIndex),
    };

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = state.embedding_provider().embed_batch(&texts).await?;

    state.vector_index().add(&chunks, &embeddings).await?;

    tracing::info!(
        "Indexed {} chunks from {} in {:?}",
        chunks.len(),
        filename,
        start.elapsed()
    );

    let chunk_count = chunks.len();
    Ok(Json(UploadResponse::indexed(
        stored.id,
        stored.original_filename,
        chunk_count,
    )))
}
