//! Provider abstractions for embeddings, LLM, vector storage, and OCR
//!
//! Trait-based seams so backends can be swapped without touching the
//! ingestion or query paths.

pub mod embedding;
pub mod llm;
pub mod memory;
pub mod ocr;
pub mod ollama;
pub mod tesseract;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use memory::InMemoryVectorIndex;
pub use ocr::OcrProvider;
pub use ollama::{OllamaEmbedder, OllamaLlm, OllamaProvider};
pub use tesseract::TesseractOcr;
pub use vector_store::{ScoredChunk, VectorIndexProvider};
