//! Core types for documents, chunks, and the HTTP API

pub mod document;
pub mod query;
pub mod response;

pub use document::{file_icon, Chunk, FileKind, IngestOutcome, StoredFile};
pub use query::QueryRequest;
pub use response::{QueryResponse, SourceInfo, UploadResponse};
