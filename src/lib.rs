//! askdocs: Retrieval-augmented document Q&A service
//!
//! Upload PDF, DOCX, plain-text, CSV, SQLite, or image files; their text is
//! extracted, chunked, embedded, and indexed. Questions are answered by an
//! LLM grounded in the most similar chunks, with optional OCR of an image
//! attached to the question.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, FileKind, IngestOutcome, StoredFile},
    query::QueryRequest,
    response::{QueryResponse, UploadResponse},
};
