//! Query request types

use serde::{Deserialize, Serialize};

/// Query request for the RAG endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub question: String,

    /// Optional base64-encoded image; OCR'd text is appended to the query
    /// as extra context ("what is in this image?" style questions)
    #[serde(default)]
    pub image_base64: Option<String>,

    /// Number of chunks to retrieve (overrides config when set)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl QueryRequest {
    /// Create a new query
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            image_base64: None,
            top_k: None,
        }
    }
}
