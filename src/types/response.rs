//! Response types for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{file_icon, Chunk};

/// Response from the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Generated file identifier
    pub file_id: Uuid,
    /// Original filename
    pub filename: String,
    /// Human-readable status
    pub message: String,
    /// Per-extension icon for the front end
    pub icon: String,
}

impl UploadResponse {
    /// Build the success response for an indexed upload
    pub fn indexed(file_id: Uuid, filename: String, chunk_count: usize) -> Self {
        let icon = file_icon(&filename).to_string();
        Self {
            file_id,
            message: format!("Successfully indexed {} chunks.", chunk_count),
            filename,
            icon,
        }
    }
}

/// One retrieved source shown alongside the answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Original filename of the source document
    pub filename: String,
    /// Per-extension icon for the front end
    pub file_type_icon: String,
    /// Snippet of the retrieved chunk
    pub page_content: String,
}

impl SourceInfo {
    /// Snippet length shown in source listings
    const SNIPPET_LEN: usize = 200;

    /// Build a source entry from a retrieved chunk
    pub fn from_chunk(chunk: &Chunk) -> Self {
        Self {
            filename: chunk.source.clone(),
            file_type_icon: file_icon(&chunk.source).to_string(),
            page_content: truncate_snippet(&chunk.text, Self::SNIPPET_LEN),
        }
    }
}

/// Response from the query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer
    pub answer: String,
    /// Retrieved sources, de-duplicated by filename
    pub sources: Vec<SourceInfo>,
}

impl QueryResponse {
    /// Build a response, collapsing chunks from the same file into one source
    pub fn new(answer: String, chunks: &[Chunk]) -> Self {
        let mut sources: Vec<SourceInfo> = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for chunk in chunks {
            if seen.insert(chunk.source.clone()) {
                sources.push(SourceInfo::from_chunk(chunk));
            }
        }

        Self { answer, sources }
    }
}

/// Truncate to at most `max` bytes on a char boundary, appending "..."
fn truncate_snippet(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }

    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_deduplicated_by_filename() {
        let chunks = vec![
            Chunk::new("first chunk", "a.pdf"),
            Chunk::new("second chunk", "a.pdf"),
            Chunk::new("other doc", "b.csv"),
        ];

        let response = QueryResponse::new("answer".to_string(), &chunks);
        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[0].filename, "a.pdf");
        assert_eq!(response.sources[1].filename, "b.csv");
    }

    #[test]
    fn test_snippet_truncation() {
        let long = "x".repeat(300);
        let chunk = Chunk::new(long, "a.txt");
        let source = SourceInfo::from_chunk(&chunk);
        assert_eq!(source.page_content.len(), 203);
        assert!(source.page_content.ends_with("..."));

        let short = Chunk::new("short", "a.txt");
        assert_eq!(SourceInfo::from_chunk(&short).page_content, "short");
    }
}
