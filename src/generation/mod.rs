//! Summary generation with the LLM

pub mod prompt;
pub mod summarize;

pub use prompt::PromptBuilder;
pub use summarize::ReviewSummarizer;
