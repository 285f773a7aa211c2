//! Hotel and city types

use serde::{Deserialize, Serialize};

/// A hotel, written once by bulk load and immutable afterwards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    /// Capped review count, filled in by the location listing endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<CappedCounter>,
}

/// A city, keyed in the document store as `"{country}/{city}"`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub city: String,
    pub country: String,
}

impl City {
    /// Document store key for this city
    pub fn key(&self) -> String {
        format!("{}/{}", self.country, self.city)
    }
}

/// Bounded-cost review count result
///
/// `at_ceiling` is true when the true count meets or exceeds the counting
/// ceiling, in which case `count` holds the ceiling rather than the exact
/// value. Clients are expected to check the flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CappedCounter {
    pub count: i64,
    #[serde(default)]
    pub at_ceiling: bool,
}

impl CappedCounter {
    /// Exact count below the ceiling
    pub fn exact(count: i64) -> Self {
        Self {
            count,
            at_ceiling: false,
        }
    }

    /// Count saturated at the ceiling
    pub fn capped(ceiling: i64) -> Self {
        Self {
            count: ceiling,
            at_ceiling: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_key_format() {
        let city = City {
            city: "Lisbon".to_string(),
            country: "PT".to_string(),
        };
        assert_eq!(city.key(), "PT/Lisbon");
    }

    #[test]
    fn capped_counter_serde() {
        let exact = CappedCounter::exact(42);
        let json = serde_json::to_value(&exact).unwrap();
        assert_eq!(json["count"], 42);
        assert_eq!(json["at_ceiling"], false);

        // at_ceiling defaults to false when absent
        let parsed: CappedCounter = serde_json::from_str(r#"{"count": 7}"#).unwrap();
        assert!(!parsed.at_ceiling);
    }
}
