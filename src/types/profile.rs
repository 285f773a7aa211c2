//! User travel-preference profile

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user's travel preferences
///
/// Profile submission overwrites `base_preferences` and
/// `additional_preferences` wholesale; `travel_profile_summary` is derived
/// asynchronously afterwards and is the only field ever updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Fixed vocabulary of preference keys, each switched on or off
    pub base_preferences: BTreeMap<String, bool>,
    /// Free-text preferences
    pub additional_preferences: String,
    /// Derived summary used as the personalization query, null until first computed
    #[serde(default)]
    pub travel_profile_summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_defaults_to_none() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"base_preferences": {"pool": true}, "additional_preferences": "quiet rooms"}"#,
        )
        .unwrap();
        assert!(profile.travel_profile_summary.is_none());
        assert_eq!(profile.base_preferences.get("pool"), Some(&true));
    }
}
