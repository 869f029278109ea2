//! In-memory vector index with brute-force cosine search

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::types::Chunk;

use super::vector_store::{ScoredChunk, VectorIndexProvider};

struct Entry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// Vector index that keeps every embedding in process memory.
///
/// Search is a linear scan with cosine similarity, which is plenty for the
/// corpus sizes a single upload session produces. Contents are lost on
/// restart.
pub struct InMemoryVectorIndex {
    entries: RwLock<Vec<Entry>>,
}

impl InMemoryVectorIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndexProvider for InMemoryVectorIndex {
    async fn add(&self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(Error::VectorIndex(format!(
                "chunk/embedding count mismatch: {} chunks, {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let mut entries = self.entries.write();
        entries.reserve(chunks.len());
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            entries.push(Entry {
                chunk: chunk.clone(),
                embedding: embedding.clone(),
            });
        }
        Ok(())
    }

    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>> {
        let entries = self.entries.read();

        let mut scored: Vec<ScoredChunk> = entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                similarity: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

/// Cosine similarity between two vectors, 0.0 when either has zero norm
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> Chunk {
        Chunk::new(text.to_string(), "test.txt".to_string())
    }

    #[tokio::test]
    async fn test_add_and_len() {
        let index = InMemoryVectorIndex::new();
        assert!(index.is_empty().await.unwrap());

        index
            .add(
                &[chunk("alpha"), chunk("beta")],
                &[vec![1.0, 0.0], vec![0.0, 1.0]],
            )
            .await
            .unwrap();

        assert_eq!(index.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_add_length_mismatch() {
        let index = InMemoryVectorIndex::new();
        let result = index.add(&[chunk("alpha")], &[]).await;
        assert!(result.is_err());
        assert_eq!(index.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let index = InMemoryVectorIndex::new();
        index
            .add(
                &[chunk("x axis"), chunk("y axis"), chunk("diagonal")],
                &[
                    vec![1.0, 0.0],
                    vec![0.0, 1.0],
                    vec![0.7, 0.7],
                ],
            )
            .await
            .unwrap();

        let results = index.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.text, "x axis");
        assert_eq!(results[1].chunk.text, "diagonal");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[tokio::test]
    async fn test_search_empty_index() {
        let index = InMemoryVectorIndex::new();
        let results = index.search(&[1.0, 0.0], 4).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_top_k_larger_than_index() {
        let index = InMemoryVectorIndex::new();
        index
            .add(&[chunk("only")], &[vec![1.0, 0.0]])
            .await
            .unwrap();

        let results = index.search(&[1.0, 0.0], 10).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }
}
