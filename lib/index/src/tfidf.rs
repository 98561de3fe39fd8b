//! TF-IDF document vectors for the content channel of the hybrid model.
//!
//! Documents are short "Name Category State" strings, so the whole pipeline
//! is eager: build the vocabulary, count document frequencies, weight with
//! smoothed idf, L2-normalize. Normalized rows make the gram matrix a
//! cosine-similarity matrix with no extra pass.

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::matrix::Matrix;

/// English stop words, sorted for binary search. Compact variant of the
/// usual NLTK/sklearn lists; plenty for place-name documents.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am",
    "among", "an", "and", "another", "any", "anyone", "anything", "anywhere",
    "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "been", "before", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "both", "but", "by", "can", "cannot",
    "could", "did", "do", "does", "doing", "done", "down", "during",
    "each", "either", "enough", "even", "ever", "every", "everyone", "everything",
    "everywhere", "few", "find", "first", "for", "former", "from", "further",
    "had", "has", "have", "having", "he", "hence", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "however", "i",
    "if", "in", "indeed", "instead", "into", "is", "it", "its",
    "itself", "just", "last", "latter", "least", "less", "like", "made",
    "make", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "much", "must", "my", "myself", "namely",
    "near", "neither", "never", "nevertheless", "next", "no", "nobody", "none",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often",
    "on", "once", "one", "only", "onto", "or", "other", "others",
    "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per",
    "perhaps", "rather", "same", "see", "seem", "seemed", "seems", "several",
    "she", "should", "since", "so", "some", "somehow", "someone", "something",
    "sometimes", "somewhere", "still", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "these", "they", "this", "those", "though", "through", "throughout",
    "thus", "to", "together", "too", "toward", "towards", "under", "until",
    "up", "upon", "us", "very", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereas", "wherever",
    "whether", "which", "while", "who", "whoever", "whole", "whom", "whose",
    "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

#[inline]
fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Tokenize free text: lowercase, split on anything non-alphanumeric, drop
/// single-character tokens and stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 1 && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// L2-normalized TF-IDF vectors for `documents`, one row per document.
///
/// Uses smoothed idf, ln((1 + n) / (1 + df)) + 1, so terms present in every
/// document still contribute instead of zeroing out. A document with no
/// surviving tokens gets an all-zero row; it is similar to nothing, itself
/// included.
#[must_use]
pub fn document_vectors(documents: &[String]) -> Matrix {
    let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

    // Sorted vocabulary keeps column order stable across runs
    let vocabulary: BTreeSet<&str> = tokenized
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    let term_index: AHashMap<&str, usize> = vocabulary
        .into_iter()
        .enumerate()
        .map(|(col, term)| (term, col))
        .collect();

    let mut document_frequency = vec![0u32; term_index.len()];
    for tokens in &tokenized {
        let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            if let Some(&col) = term_index.get(term) {
                document_frequency[col] += 1;
            }
        }
    }

    let total_docs = documents.len() as f32;
    let idf: Vec<f32> = document_frequency
        .iter()
        .map(|&df| ((1.0 + total_docs) / (1.0 + df as f32)).ln() + 1.0)
        .collect();

    let mut vectors = Matrix::zeros(documents.len(), idf.len());
    for (row, tokens) in tokenized.iter().enumerate() {
        for token in tokens {
            if let Some(&col) = term_index.get(token.as_str()) {
                let weighted = vectors.get(row, col) + idf[col];
                vectors.set(row, col, weighted);
            }
        }
    }
    vectors.normalize_rows_l2();
    vectors
}
