//! Offline hybrid-model construction.
//!
//! Two channels feed one matrix: TF-IDF cosine over "Name Category State"
//! documents, and category co-occurrence derived from the same label
//! normalizer the online scorer uses. Each channel is min-max rescaled,
//! the pair is blended 60/40, and the blend is rescaled once more so every
//! entry lands in [0, 1].

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use wander_core::{Catalog, SimilarityHint};

use crate::matrix::Matrix;
use crate::tfidf;

/// Weight of the TF-IDF content channel in the blend.
pub const CONTENT_WEIGHT: f32 = 0.6;
/// Weight of the category co-occurrence channel in the blend.
pub const CATEGORY_WEIGHT: f32 = 0.4;

/// The artifact pair the builder persists: a destination-name row index and
/// the hybrid similarity matrix it addresses into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridModel {
    pub destination_index: AHashMap<String, usize>,
    pub similarity: Matrix,
}

impl HybridModel {
    /// Number of destinations the model covers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.similarity.rows()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Matrix row for a destination name, if indexed.
    pub fn row_of(&self, name: &str) -> Option<usize> {
        self.destination_index.get(name).copied()
    }
}

impl SimilarityHint for HybridModel {
    fn pair_score(&self, query: &str, candidate: &str) -> Option<f32> {
        let row = self.row_of(query)?;
        let col = self.row_of(candidate)?;
        Some(self.similarity.get(row, col))
    }
}

/// Build the hybrid similarity model for a catalog.
///
/// Row order follows catalog order; duplicate names keep their first row,
/// matching catalog lookups.
#[must_use]
pub fn build_model(catalog: &Catalog) -> HybridModel {
    let destinations = catalog.destinations();
    let n = destinations.len();

    // Content channel: TF-IDF cosine over the destination documents.
    // Rows come back L2-normalized, so the gram matrix is already cosine.
    let documents: Vec<String> = destinations
        .iter()
        .map(|dest| format!("{} {} {}", dest.name, dest.category, dest.state))
        .collect();
    let content = tfidf::document_vectors(&documents)
        .mul_transpose()
        .min_max_normalized();

    // Category channel: binary membership over the catalog's label
    // vocabulary, rescaled, then co-occurrence via the gram matrix.
    let vocabulary = catalog.category_labels();
    let label_index: AHashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(col, label)| (label.as_str(), col))
        .collect();
    let mut membership = Matrix::zeros(n, vocabulary.len());
    for (row, dest) in destinations.iter().enumerate() {
        for label in dest.label_set() {
            if let Some(&col) = label_index.get(label.as_str()) {
                membership.set(row, col, 1.0);
            }
        }
    }
    let cooc = membership.min_max_normalized().mul_transpose();

    let similarity =
        Matrix::blend(&content, &cooc, CONTENT_WEIGHT, CATEGORY_WEIGHT).min_max_normalized();

    let mut destination_index = AHashMap::with_capacity(n);
    for (row, dest) in destinations.iter().enumerate() {
        destination_index.entry(dest.name.clone()).or_insert(row);
    }

    info!(
        "Built hybrid similarity for {} destinations over {} category labels",
        n,
        vocabulary.len()
    );

    HybridModel {
        destination_index,
        similarity,
    }
}
