use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::categories::parse_label_set;

/// A destination record from the catalog.
///
/// Serialized field names keep the source tables' PascalCase spelling so the
/// JSON surface and the CSV headers stay aligned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    pub name: String,
    pub district: String,
    pub state: String,
    /// Comma-separated category labels, e.g. "Beach, Adventure".
    pub category: String,
    pub best_time_to_visit: String,
    /// Popularity in [0, 1]. Backfilled once at load time when the source
    /// data carries no score.
    pub popularity_score: f64,
}

impl Destination {
    /// Normalized category labels for overlap scoring.
    #[inline]
    #[must_use]
    pub fn label_set(&self) -> HashSet<String> {
        parse_label_set(&self.category)
    }
}

/// A user profile with stated travel preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// Kept as a string and compared exactly; ids are opaque to the service.
    #[serde(rename = "UserID")]
    pub user_id: String,
    pub name: String,
    pub gender: String,
    pub location: String,
    /// Comma-separated preference labels, same vocabulary as
    /// [`Destination::category`].
    pub travel_preferences: String,
    pub number_of_adults: u32,
    pub number_of_children: u32,
}

impl User {
    /// Normalized preference labels for overlap scoring.
    #[inline]
    #[must_use]
    pub fn preference_set(&self) -> HashSet<String> {
        parse_label_set(&self.travel_preferences)
    }
}

/// One ranked result returned by the recommender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Recommendation {
    pub name: String,
    pub category: String,
    pub district: String,
    pub state: String,
    pub best_time_to_visit: String,
    /// Overlap coefficient of the query's label set against this
    /// destination's, in [0, 1]. Zero-score candidates are never returned.
    pub match_score: f64,
    pub popularity_score: f64,
}

impl Recommendation {
    #[inline]
    #[must_use]
    pub fn new(destination: &Destination, match_score: f64) -> Self {
        Self {
            name: destination.name.clone(),
            category: destination.category.clone(),
            district: destination.district.clone(),
            state: destination.state.clone(),
            best_time_to_visit: destination.best_time_to_visit.clone(),
            match_score,
            popularity_score: destination.popularity_score,
        }
    }
}
