//! Review summarization entry points

use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;
use crate::types::HotelReview;

use super::prompt::PromptBuilder;

/// Turns a selected review set into a short natural-language summary
pub struct ReviewSummarizer {
    llm: Arc<dyn LlmProvider>,
}

impl ReviewSummarizer {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// General summary of a hotel's selected reviews
    ///
    /// Zero reviews short-circuits to an empty summary without an LLM call.
    pub async fn summarize_for_hotel(&self, reviews: &[HotelReview]) -> Result<Vec<String>> {
        if reviews.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = PromptBuilder::build_hotel_summary_prompt(reviews);
        let answer = self.llm.generate(&prompt).await?;
        Ok(split_summary(&answer))
    }

    /// User-tailored summary of the reviews selected for a traveller
    pub async fn summarize_for_user(
        &self,
        reviews: &[HotelReview],
        travel_profile_summary: &str,
    ) -> Result<Vec<String>> {
        if reviews.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = PromptBuilder::build_user_summary_prompt(reviews, travel_profile_summary);
        let answer = self.llm.generate(&prompt).await?;
        Ok(split_summary(&answer))
    }
}

/// Wire shape of a summary is a list of lines; split the single completion
/// on newlines and drop empties
fn split_summary(answer: &str) -> Vec<String> {
    answer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Canned LLM that records the prompts it saw
    struct CannedLlm {
        answer: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedLlm {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for CannedLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            Ok(self.answer.clone())
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

    fn reviews() -> Vec<HotelReview> {
        vec![HotelReview {
            title: "Nice pool".to_string(),
            body: "Warm water.".to_string(),
            rating: 5,
            id: "r1".to_string(),
        }]
    }

    #[test]
    fn split_drops_blank_lines() {
        assert_eq!(
            split_summary("Guests liked the pool.\n\n  Rooms are quiet.  \n"),
            vec!["Guests liked the pool.", "Rooms are quiet."]
        );
        assert!(split_summary("").is_empty());
    }

    #[tokio::test]
    async fn empty_review_set_skips_the_llm() {
        let llm = Arc::new(CannedLlm::new("should not be called"));
        let summarizer = ReviewSummarizer::new(llm.clone());

        let summary = summarizer.summarize_for_hotel(&[]).await.unwrap();
        assert!(summary.is_empty());
        assert!(llm.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn hotel_summary_uses_the_review_prompt() {
        let llm = Arc::new(CannedLlm::new("A fine hotel.\nGood pool."));
        let summarizer = ReviewSummarizer::new(llm.clone());

        let summary = summarizer.summarize_for_hotel(&reviews()).await.unwrap();
        assert_eq!(summary, vec!["A fine hotel.", "Good pool."]);
        assert!(llm.prompts.lock()[0].contains("Nice pool: Warm water."));
    }

    #[tokio::test]
    async fn user_summary_feeds_the_profile_through() {
        let llm = Arc::new(CannedLlm::new("Tailored summary."));
        let summarizer = ReviewSummarizer::new(llm.clone());

        let summary = summarizer
            .summarize_for_user(&reviews(), "I love pools.")
            .await
            .unwrap();
        assert_eq!(summary, vec!["Tailored summary."]);
        assert!(llm.prompts.lock()[0].contains("I love pools."));
    }
}
