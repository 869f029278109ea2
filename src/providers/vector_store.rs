//! Vector index provider trait for storing and searching embeddings

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Chunk;

/// Search result from a vector index
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk
    pub chunk: Chunk,
    /// Cosine similarity (higher is more similar)
    pub similarity: f32,
}

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `InMemoryVectorIndex`: brute-force cosine scan over all vectors
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Insert chunks together with their embeddings
    ///
    /// `chunks` and `embeddings` must have the same length.
    async fn add(&self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<()>;

    /// Search for the chunks most similar to a query embedding
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>>;

    /// Get total number of vectors stored
    async fn len(&self) -> Result<usize>;

    /// Check if the index is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
