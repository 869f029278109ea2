//! Application state for the Q&A server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::ingestion::IngestPipeline;
use crate::providers::{
    EmbeddingProvider, InMemoryVectorIndex, LlmProvider, OcrProvider, OllamaProvider,
    TesseractOcr, VectorIndexProvider,
};
use crate::storage::UploadStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Persisted upload storage
    upload_store: UploadStore,
    /// Extraction and chunking pipeline
    pipeline: IngestPipeline,
    /// Embedding provider
    embedding_provider: Arc<dyn EmbeddingProvider>,
    /// LLM provider
    llm_provider: Arc<dyn LlmProvider>,
    /// Vector index
    vector_index: Arc<dyn VectorIndexProvider>,
    /// OCR engine for query images
    ocr: Arc<dyn OcrProvider>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        config.validate()?;

        let upload_store = UploadStore::new(&config.storage)?;
        tracing::info!("Upload store ready at {}", config.storage.upload_dir.display());

        let (embedder, llm) = OllamaProvider::new(&config.llm).split();
        let embedding_provider: Arc<dyn EmbeddingProvider> = Arc::new(embedder);
        let llm_provider: Arc<dyn LlmProvider> = Arc::new(llm);
        tracing::info!(
            "Ollama providers initialized (embed: {}, generate: {})",
            config.llm.embed_model,
            config.llm.generate_model
        );

        let vector_index: Arc<dyn VectorIndexProvider> = Arc::new(InMemoryVectorIndex::new());

        let ocr: Arc<dyn OcrProvider> = Arc::new(TesseractOcr::new(config.ocr.clone()));
        if !ocr.is_available() {
            tracing::warn!(
                "OCR engine '{}' not found; image extraction will fail",
                config.ocr.tesseract_bin
            );
        }

        let pipeline = IngestPipeline::new(&config.chunking, Arc::clone(&ocr));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                upload_store,
                pipeline,
                embedding_provider,
                llm_provider,
                vector_index,
                ocr,
                ready: RwLock::new(true),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the upload store
    pub fn upload_store(&self) -> &UploadStore {
        &self.inner.upload_store
    }

    /// Get the ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Get the embedding provider
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedding_provider
    }

    /// Get the LLM provider
    pub fn llm_provider(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm_provider
    }

    /// Get the vector index
    pub fn vector_index(&self) -> &Arc<dyn VectorIndexProvider> {
        &self.inner.vector_index
    }

    /// Get the OCR engine
    pub fn ocr(&self) -> &Arc<dyn OcrProvider> {
        &self.inner.ocr
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
