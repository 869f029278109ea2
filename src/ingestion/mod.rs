//! Document ingestion: format dispatch, per-format extraction, chunking

pub mod chunker;
pub mod extract;
pub mod table;

pub use chunker::TextChunker;
pub use table::TextTable;

use std::path::Path;
use std::sync::Arc;

use crate::config::ChunkingConfig;
use crate::providers::ocr::OcrProvider;
use crate::types::{FileKind, IngestOutcome};

/// Drives dispatch -> extraction -> chunking for one stored file.
///
/// Deliberately fail-soft: an unsupported format, a failed extraction, and
/// an empty document all produce `IngestOutcome::Empty`. The extraction
/// error is logged and does not escape; the caller decides whether "nothing
/// to index" is worth reporting.
pub struct IngestPipeline {
    chunker: TextChunker,
    ocr: Arc<dyn OcrProvider>,
}

impl IngestPipeline {
    /// Create a pipeline from the chunking configuration
    pub fn new(config: &ChunkingConfig, ocr: Arc<dyn OcrProvider>) -> Self {
        Self {
            chunker: TextChunker::new(config.chunk_size, config.chunk_overlap),
            ocr,
        }
    }

    /// Ingest one file: select the extractor from the declared content type
    /// and filename, extract its text, and split it into chunks tagged with
    /// the original filename.
    pub fn ingest(
        &self,
        path: &Path,
        content_type: &str,
        original_filename: &str,
    ) -> IngestOutcome {
        let kind = FileKind::detect(content_type, original_filename);

        if !kind.is_supported() {
            tracing::info!(
                filename = original_filename,
                content_type,
                "No extractor for file, skipping"
            );
            return IngestOutcome::Empty;
        }

        let text = match extract::extract(&kind, path, self.ocr.as_ref()) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    filename = original_filename,
                    format = kind.display_name(),
                    error = %e,
                    "Extraction failed, producing no chunks"
                );
                return IngestOutcome::Empty;
            }
        };

        let chunks = self.chunker.split(&text, original_filename);
        if chunks.is_empty() {
            tracing::info!(
                filename = original_filename,
                "Extraction yielded no text, nothing to index"
            );
            return IngestOutcome::Empty;
        }

        IngestOutcome::Chunks(chunks)
    }
}
