//! LLM provider trait for natural-language summarization

use async_trait::async_trait;

use crate::error::Result;

/// Trait for short-text summarization
///
/// The backend hands the provider a fully rendered prompt and expects a
/// short natural-language completion back; prompt construction lives in
/// [`crate::generation::PromptBuilder`].
///
/// Implementations:
/// - `OllamaLlm`: local Ollama server (phi3, llama3.2, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
