//! # wander Core
//!
//! Core library for the wander travel recommender.
//!
//! This crate provides the domain model and the online scoring path:
//!
//! - [`Catalog`] - immutable destination and user tables loaded from CSV
//! - [`parse_label_set`] - the category-set normalizer shared with the
//!   offline builder
//! - [`Recommender`] - overlap scoring, ranking, and truncation
//! - [`SimilarityHint`] - the seam the offline similarity model plugs into
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wander_core::{Catalog, Destination, Query, Recommender};
//!
//! let beach = Destination {
//!     name: "Goa Beaches".to_string(),
//!     district: "North Goa".to_string(),
//!     state: "Goa".to_string(),
//!     category: "Beach, Adventure".to_string(),
//!     best_time_to_visit: "Nov-Feb".to_string(),
//!     popularity_score: 0.9,
//! };
//! let catalog = Arc::new(Catalog::from_records(vec![beach], Vec::new()));
//!
//! // Score ad-hoc preferences against the catalog
//! let recommender = Recommender::new(catalog);
//! let results = recommender.recommend(&Query::ByCustom {
//!     preferences: "beach".to_string(),
//!     state: None,
//! });
//! assert_eq!(results[0].name, "Goa Beaches");
//! ```

pub mod catalog;
pub mod categories;
pub mod error;
pub mod recommend;
pub mod types;

pub use catalog::Catalog;
pub use categories::parse_label_set;
pub use error::{Error, Result};
pub use recommend::{
    overlap_coefficient, Query, Recommender, SimilarityHint, MAX_RECOMMENDATIONS,
};
pub use types::{Destination, Recommendation, User};
