//! # wander Index
//!
//! Offline side of the wander recommender: derives the hybrid
//! content + category similarity model from a catalog and persists it as a
//! pair of binary artifacts the server picks up at startup.
//!
//! - [`build_model`] - the TF-IDF + co-occurrence pipeline
//! - [`HybridModel`] - the artifact pair; plugs into the online scorer as
//!   a [`wander_core::SimilarityHint`]
//! - [`ModelStore`] - atomic save/load of the artifacts

pub mod builder;
pub mod matrix;
pub mod store;
pub mod tfidf;

pub use builder::{build_model, HybridModel, CATEGORY_WEIGHT, CONTENT_WEIGHT};
pub use matrix::Matrix;
pub use store::{ModelStore, DESTINATION_INDEX_FILE, HYBRID_SIMILARITY_FILE};
