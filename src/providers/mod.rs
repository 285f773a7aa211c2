//! Provider abstractions for the four external collaborators
//!
//! This module provides trait-based seams for the document store, the vector
//! index, the embedding service, and the summarization LLM, so the core
//! components stay independent of any concrete backend.

pub mod document_store;
pub mod embedding;
pub mod llm;
pub mod local;
pub mod ollama;
pub mod vector_index;

pub use document_store::DocumentStore;
pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use vector_index::VectorIndex;
