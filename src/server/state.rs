//! Application state for the recommendation server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::generation::ReviewSummarizer;
use crate::ingestion::ReviewIngestPipeline;
use crate::profiles::ProfileSummarizer;
use crate::providers::{
    ollama::{OllamaClient, OllamaEmbedder, OllamaLlm},
    DocumentStore, EmbeddingProvider, LlmProvider, VectorIndex,
};
use crate::retrieval::ReviewSelector;
use crate::storage::{SqliteDocumentStore, SqliteVectorIndex};

/// Shared application state
///
/// Provider handles are created once at startup and shared by every request
/// handler; there is no other process-wide mutable state in the core.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Arc<dyn DocumentStore>,
    selector: ReviewSelector,
    ingest: ReviewIngestPipeline,
    summarizer: ReviewSummarizer,
    profile_summarizer: Arc<ProfileSummarizer>,
}

impl AppState {
    /// Create state with the default backends: SQLite document store and
    /// vector index, Ollama embeddings + LLM
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let store: Arc<dyn DocumentStore> =
            Arc::new(SqliteDocumentStore::new(&config.store.db_path)?);
        tracing::info!("Document store initialized ({})", store.name());

        // Embeddings share the document store's database file so both review
        // representations survive a restart together.
        let index: Arc<dyn VectorIndex> = Arc::new(SqliteVectorIndex::new(&config.store.db_path)?);
        tracing::info!("Vector index initialized ({})", index.name());

        let ollama = Arc::new(OllamaClient::new(&config.llm)?);
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::from_client(
            Arc::clone(&ollama),
            config.embeddings.dimensions,
        ));
        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaLlm::from_client(
            ollama,
            config.llm.generate_model.clone(),
        ));
        tracing::info!(
            "Ollama providers initialized (embed: {}, generate: {})",
            config.llm.embed_model,
            config.llm.generate_model
        );

        Ok(Self::with_providers(config, store, index, embedder, llm))
    }

    /// Create state from explicitly injected providers
    pub fn with_providers(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let selector = ReviewSelector::new(
            Arc::clone(&store),
            Arc::clone(&index),
            Arc::clone(&embedder),
        );
        let ingest = ReviewIngestPipeline::new(Arc::clone(&store), index, embedder);
        let summarizer = ReviewSummarizer::new(Arc::clone(&llm));
        let profile_summarizer = Arc::new(ProfileSummarizer::new(Arc::clone(&store), llm));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                selector,
                ingest,
                summarizer,
                profile_summarizer,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the document store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.inner.store
    }

    /// Get the review selector
    pub fn selector(&self) -> &ReviewSelector {
        &self.inner.selector
    }

    /// Get the review ingest pipeline
    pub fn ingest(&self) -> &ReviewIngestPipeline {
        &self.inner.ingest
    }

    /// Get the review summarizer
    pub fn summarizer(&self) -> &ReviewSummarizer {
        &self.inner.summarizer
    }

    /// Get the profile summarizer (shared for deferred spawns)
    pub fn profile_summarizer(&self) -> Arc<ProfileSummarizer> {
        Arc::clone(&self.inner.profile_summarizer)
    }
}
