//! Query-time scoring and ranking.
//!
//! Every query mode reduces to the same scan: normalize a query label set,
//! score each candidate destination by directional overlap, drop zero
//! scores, rank, truncate.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

use ordered_float::OrderedFloat;

use crate::catalog::Catalog;
use crate::categories::parse_label_set;
use crate::types::{Destination, Recommendation};

/// Upper bound on results returned for any query.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Directional overlap coefficient: shared labels divided by query size.
///
/// Asymmetric on purpose. A candidate covering every queried label scores
/// 1.0 even when it lists extra labels of its own; the reverse direction
/// divides by the other set's size. An empty query scores 0 against
/// everything.
pub fn overlap_coefficient(query: &HashSet<String>, candidate: &HashSet<String>) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let shared = query.intersection(candidate).count();
    shared as f64 / query.len() as f64
}

/// Precomputed pairwise similarity between catalog destinations.
///
/// Implemented by the offline model. Consulted only to order candidates
/// that match score and popularity leave tied, so serving works the same
/// with or without one attached.
pub trait SimilarityHint: Send + Sync {
    /// Similarity of `candidate` to `query`, if both are known.
    fn pair_score(&self, query: &str, candidate: &str) -> Option<f32>;
}

/// A recommendation request, already shape-validated by the caller.
#[derive(Debug, Clone)]
pub enum Query {
    /// Destinations similar to a named one. The anchor never recommends
    /// itself.
    ByDestination { name: String },
    /// Destinations matching a stored user's preferences.
    ByUser { user_id: String },
    /// Destinations matching ad-hoc preference labels, optionally limited
    /// to a single state.
    ByCustom {
        preferences: String,
        state: Option<String>,
    },
}

pub struct Recommender {
    catalog: Arc<Catalog>,
    hint: Option<Arc<dyn SimilarityHint>>,
}

impl Recommender {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            hint: None,
        }
    }

    /// Attach a precomputed similarity model for tie-breaking.
    #[must_use]
    pub fn with_similarity_hint(mut self, hint: Arc<dyn SimilarityHint>) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Run a query against the catalog.
    ///
    /// An unknown destination name or user id yields an empty list rather
    /// than an error; resolving those to 404s is the API layer's call.
    pub fn recommend(&self, query: &Query) -> Vec<Recommendation> {
        match query {
            Query::ByDestination { name } => self.by_destination(name),
            Query::ByUser { user_id } => self.by_user(user_id),
            Query::ByCustom { preferences, state } => {
                self.by_custom(preferences, state.as_deref())
            }
        }
    }

    fn by_destination(&self, name: &str) -> Vec<Recommendation> {
        let Some(anchor) = self.catalog.destination(name) else {
            return Vec::new();
        };
        let labels = anchor.label_set();
        let results = self.score(&labels, |dest| dest.name != name);
        self.rank(results, Some(name))
    }

    fn by_user(&self, user_id: &str) -> Vec<Recommendation> {
        let Some(user) = self.catalog.user(user_id) else {
            return Vec::new();
        };
        let prefs = user.preference_set();
        let results = self.score(&prefs, |_| true);
        self.rank(results, None)
    }

    fn by_custom(&self, preferences: &str, state: Option<&str>) -> Vec<Recommendation> {
        let labels = parse_label_set(preferences);
        let results = self.score(&labels, |dest| {
            state.map(|s| dest.state == s).unwrap_or(true)
        });
        self.rank(results, None)
    }

    /// Score every retained candidate, discarding zero overlaps.
    fn score<F>(&self, query_labels: &HashSet<String>, keep: F) -> Vec<Recommendation>
    where
        F: Fn(&Destination) -> bool,
    {
        self.catalog
            .destinations()
            .iter()
            .filter(|dest| keep(dest))
            .filter_map(|dest| {
                let score = overlap_coefficient(query_labels, &dest.label_set());
                (score > 0.0).then(|| Recommendation::new(dest, score))
            })
            .collect()
    }

    /// Sort by (match score, popularity) descending and cap the list.
    ///
    /// With an anchor and an attached model, the model's pairwise score is
    /// a third key so persistent ties order by precomputed similarity
    /// instead of catalog position.
    fn rank(&self, mut results: Vec<Recommendation>, anchor: Option<&str>) -> Vec<Recommendation> {
        results.sort_by_key(|rec| {
            let hint = match (anchor, &self.hint) {
                (Some(anchor), Some(hint)) => {
                    hint.pair_score(anchor, &rec.name).unwrap_or(0.0)
                }
                _ => 0.0,
            };
            (
                Reverse(OrderedFloat(rec.match_score)),
                Reverse(OrderedFloat(rec.popularity_score)),
                Reverse(OrderedFloat(f64::from(hint))),
            )
        });
        results.truncate(MAX_RECOMMENDATIONS);
        results
    }
}
