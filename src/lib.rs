//! # wander
//!
//! A travel destination recommendation service.
//!
//! wander answers three kinds of queries over an immutable catalog: "more
//! like this destination", "matches for this user's stored preferences",
//! and "matches for these ad-hoc preferences". Scoring is a directional
//! category-overlap coefficient; an offline hybrid similarity model
//! (TF-IDF content + category co-occurrence) refines the ordering of
//! otherwise tied results.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! wander-reindex --destinations dataset/Destinations.csv --users dataset/Users.csv
//! wander --http-port 5000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wander::prelude::*;
//!
//! let catalog = Arc::new(
//!     Catalog::load("dataset/Destinations.csv", "dataset/Users.csv", None).unwrap(),
//! );
//!
//! // Build the offline model in-process instead of via wander-reindex
//! let model = build_model(&catalog);
//!
//! let recommender = Recommender::new(catalog).with_similarity_hint(Arc::new(model));
//! let results = recommender.recommend(&Query::ByCustom {
//!     preferences: "beach, adventure".to_string(),
//!     state: None,
//! });
//! ```
//!
//! ## Crate Structure
//!
//! wander is composed of several crates:
//!
//! - [`wander-core`](https://docs.rs/wander-core) - catalog tables, category
//!   normalization, overlap scoring and ranking
//! - [`wander-index`](https://docs.rs/wander-index) - offline hybrid model
//!   builder and the binary artifact store
//! - [`wander-api`](https://docs.rs/wander-api) - REST endpoints

// Re-export core types
pub use wander_core::{
    overlap_coefficient, parse_label_set, Catalog, Destination, Error, Query, Recommendation,
    Recommender, Result, SimilarityHint, User, MAX_RECOMMENDATIONS,
};

// Re-export the offline side
pub use wander_index::{build_model, HybridModel, Matrix, ModelStore};

// Re-export API
pub use wander_api::{ApiError, AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        build_model, overlap_coefficient, parse_label_set, ApiError, AppState, Catalog,
        Destination, Error, HybridModel, ModelStore, Query, Recommendation, Recommender,
        RestApi, Result, SimilarityHint, User, MAX_RECOMMENDATIONS,
    };
}
