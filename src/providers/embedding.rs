//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for text -> fixed-dimension vector embedding
///
/// Implementations:
/// - `OllamaEmbedder`: local Ollama server (nomic-embed-text)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimensions (e.g. 768 for nomic-embed-text)
    fn dimensions(&self) -> usize;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
