//! Prompt templates for answer generation

use crate::providers::vector_store::ScoredChunk;

/// Prompt builder for retrieval-augmented queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build context from search results
    ///
    /// Chunk texts are joined with blank lines; table-heavy chunks keep
    /// their fixed-width layout intact.
    pub fn build_context(results: &[ScoredChunk]) -> String {
        results
            .iter()
            .map(|result| result.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the full answer prompt
    pub fn build_answer_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are a smart assistant. Use the context below to answer the user's question.
If the context contains tables, format them nicely in your answer.
If the answer is not in the context, say so instead of guessing.

Context:
{context}

Question: {question}

Answer:"#,
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    fn scored(text: &str) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk::new(text.to_string(), "doc.txt".to_string()),
            similarity: 0.9,
        }
    }

    #[test]
    fn test_build_context_joins_with_blank_lines() {
        let context = PromptBuilder::build_context(&[scored("first"), scored("second")]);
        assert_eq!(context, "first\n\nsecond");
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(PromptBuilder::build_context(&[]), "");
    }

    #[test]
    fn test_answer_prompt_contains_parts() {
        let prompt = PromptBuilder::build_answer_prompt("What is X?", "X is a thing.");
        assert!(prompt.contains("Context:\nX is a thing."));
        assert!(prompt.contains("Question: What is X?"));
        assert!(prompt.ends_with("Answer:"));
    }
}
