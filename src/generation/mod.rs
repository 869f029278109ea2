//! Answer generation: Ollama client and prompt templates

mod ollama;
mod prompt;

pub use ollama::OllamaClient;
pub use prompt::PromptBuilder;
