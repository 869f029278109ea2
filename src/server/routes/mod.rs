//! API routes for the Q&A server

pub mod query;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::post,
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with larger body limit for multipart bodies
        .route(
            "/upload",
            post(upload::upload_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Query
        .route("/query", post(query::query_documents))
}
