//! Profile Summarizer: derives the travel profile summary asynchronously
//!
//! Runs once per profile submission, after the synchronous write response,
//! as a fire-and-forget unit of work. Failures are logged, never retried.

use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::{DocumentStore, LlmProvider};
use crate::types::UserProfile;

/// Derives and stores a user's travel profile summary
pub struct ProfileSummarizer {
    store: Arc<dyn DocumentStore>,
    llm: Arc<dyn LlmProvider>,
}

impl ProfileSummarizer {
    pub fn new(store: Arc<dyn DocumentStore>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { store, llm }
    }

    /// One summarization pass: preference string -> prompt -> LLM -> in-place
    /// field update on the user's record
    pub async fn run(&self, user_id: &str, profile: &UserProfile) -> Result<()> {
        tracing::info!(user_id, "Updating travel profile summary");

        let prompt = PromptBuilder::build_travel_profile_prompt(profile);
        tracing::debug!(user_id, "Travel profile summary prompt:\n{}", prompt);

        let summary = self.llm.generate(&prompt).await?;
        tracing::debug!(user_id, "Travel profile summary:\n{}", summary);

        self.store
            .set_travel_profile_summary(user_id, &summary)
            .await?;

        Ok(())
    }

    /// Spawn a deferred run; the returned handle is dropped by callers on
    /// the request path
    pub fn spawn(self: Arc<Self>, user_id: String, profile: UserProfile) {
        tokio::spawn(async move {
            if let Err(e) = self.run(&user_id, &profile).await {
                tracing::warn!(user_id, "Travel profile summary update failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    use crate::storage::SqliteDocumentStore;

    struct CannedLlm(&'static str);

    #[async_trait]
    impl LlmProvider for CannedLlm {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned"
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl LlmProvider for FailingLlm {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(crate::error::Error::llm("model offline"))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn model(&self) -> &str {
            "failing"
        }
    }

    fn profile() -> UserProfile {
        let mut base = BTreeMap::new();
        base.insert("hiking".to_string(), true);
        UserProfile {
            base_preferences: base,
            additional_preferences: "mountain views".to_string(),
            travel_profile_summary: None,
        }
    }

    #[tokio::test]
    async fn run_writes_the_summary_field_in_place() {
        let store = Arc::new(SqliteDocumentStore::in_memory().unwrap());
        store.put_user_profile("u1", &profile()).await.unwrap();

        let summarizer =
            ProfileSummarizer::new(store.clone(), Arc::new(CannedLlm("I hike a lot.")));
        summarizer.run("u1", &profile()).await.unwrap();

        let stored = store.get_user_profile("u1").await.unwrap().unwrap();
        assert_eq!(stored.travel_profile_summary.as_deref(), Some("I hike a lot."));
        // Preferences are untouched by the in-place field update
        assert_eq!(stored.additional_preferences, "mountain views");
    }

    #[tokio::test]
    async fn run_surfaces_llm_failure_to_the_spawner() {
        let store = Arc::new(SqliteDocumentStore::in_memory().unwrap());
        store.put_user_profile("u1", &profile()).await.unwrap();

        let summarizer = ProfileSummarizer::new(store.clone(), Arc::new(FailingLlm));
        assert!(summarizer.run("u1", &profile()).await.is_err());

        let stored = store.get_user_profile("u1").await.unwrap().unwrap();
        assert!(stored.travel_profile_summary.is_none());
    }
}
