//! Prompt templates for review and profile summarization

use crate::types::{HotelReview, UserProfile};

/// Prompt builder for the summarization LLM
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render the selected reviews as a numbered block for a prompt
    fn format_reviews(reviews: &[HotelReview]) -> String {
        reviews
            .iter()
            .enumerate()
            .map(|(i, review)| {
                format!(
                    "REVIEW {} (rated {}/5)\n{}: {}",
                    i + 1,
                    review.rating,
                    review.title,
                    review.body
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Prompt for the general hotel summary
    pub fn build_hotel_summary_prompt(reviews: &[HotelReview]) -> String {
        format!(
            r#"Summarize the following hotel reviews into a short overall impression for a traveller deciding where to stay.

Keep it concise and factual. Use at most three short sentences and a neutral tone. Mention only what the reviews say.

HOTEL REVIEWS:
{reviews}

CONCISE SUMMARY:"#,
            reviews = Self::format_reviews(reviews)
        )
    }

    /// Prompt for the user-tailored hotel summary
    pub fn build_user_summary_prompt(
        reviews: &[HotelReview],
        travel_profile_summary: &str,
    ) -> String {
        format!(
            r#"Summarize the following hotel reviews for a specific traveller, highlighting what matters to them.

Keep it concise and factual. Use at most three short sentences and a neutral tone. Mention only what the reviews say.

TRAVELLER'S PROFILE:
{profile}

HOTEL REVIEWS:
{reviews}

CONCISE SUMMARY:"#,
            profile = travel_profile_summary,
            reviews = Self::format_reviews(reviews)
        )
    }

    /// Compact preference string: names of boolean-true base preferences,
    /// uppercased and comma-joined, then the free-text preferences
    pub fn build_preference_string(profile: &UserProfile) -> String {
        let base_profile = profile
            .base_preferences
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.to_uppercase())
            .collect::<Vec<_>>()
            .join(", ");

        format!("{}, {}", base_profile, profile.additional_preferences)
    }

    /// Prompt for deriving the travel profile summary
    ///
    /// The two example summaries are deliberately about travellers that
    /// cannot exist, and the prompt fences them off so the model does not
    /// leak their content into the result.
    pub fn build_travel_profile_prompt(profile: &UserProfile) -> String {
        format!(
            r#"Summarize the following user's travel preferences, creating a short description that will be used to search for hotels that this user may like.

Keep it concise and clear. Use at least two and at most three short sentences and a neutral tone. Write in first person.

Here are two example summaries with information that is not relevant to the current user.
Only use these example summaries to understand the style of the summary. Absolutely do not use any information
contained in the example summaries when summarizing the current user's travel preferences.
Only use the information provided in the user's travel preferences.

EXAMPLE SUMMARY 1: I travel with a group of androids and enjoy going to droid repair factories and swamps. I am interested in creature-friendly hotels that can accommodate aliens.

EXAMPLE SUMMARY 2: I am a pixie traveller who values convenient barrows and close proximity to stone circles and bell-tolling options. I am not interested in dragons, crowded cities or axe-grinding. I enjoy playing the harpsichord.

USER'S TRAVEL PREFERENCES:
{travel_prefs}

CONCISE SUMMARY:"#,
            travel_prefs = Self::build_preference_string(profile)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn profile() -> UserProfile {
        let mut base = BTreeMap::new();
        base.insert("pool".to_string(), true);
        base.insert("parking".to_string(), false);
        base.insert("spa".to_string(), true);
        UserProfile {
            base_preferences: base,
            additional_preferences: "close to the old town".to_string(),
            travel_profile_summary: None,
        }
    }

    #[test]
    fn preference_string_keeps_only_enabled_names_uppercased() {
        let prefs = PromptBuilder::build_preference_string(&profile());
        assert_eq!(prefs, "POOL, SPA, close to the old town");
        assert!(!prefs.contains("PARKING"));
    }

    #[test]
    fn travel_profile_prompt_isolates_examples() {
        let prompt = PromptBuilder::build_travel_profile_prompt(&profile());
        assert!(prompt.contains("POOL, SPA, close to the old town"));
        assert!(prompt.contains("EXAMPLE SUMMARY 1"));
        assert!(prompt.contains("do not use any information"));
        assert!(prompt.contains("Write in first person"));
    }

    #[test]
    fn hotel_summary_prompt_numbers_reviews() {
        let reviews = vec![
            HotelReview {
                title: "Nice pool".to_string(),
                body: "Warm water.".to_string(),
                rating: 5,
                id: "r1".to_string(),
            },
            HotelReview {
                title: "Noisy".to_string(),
                body: "Thin walls.".to_string(),
                rating: 2,
                id: "r2".to_string(),
            },
        ];
        let prompt = PromptBuilder::build_hotel_summary_prompt(&reviews);
        assert!(prompt.contains("REVIEW 1 (rated 5/5)\nNice pool: Warm water."));
        assert!(prompt.contains("REVIEW 2 (rated 2/5)\nNoisy: Thin walls."));
    }

    #[test]
    fn user_summary_prompt_includes_profile() {
        let reviews = vec![HotelReview {
            title: "Spa day".to_string(),
            body: "Relaxing.".to_string(),
            rating: 4,
            id: "r1".to_string(),
        }];
        let prompt = PromptBuilder::build_user_summary_prompt(&reviews, "I love spas.");
        assert!(prompt.contains("TRAVELLER'S PROFILE:\nI love spas."));
        assert!(prompt.contains("Spa day: Relaxing."));
    }
}
