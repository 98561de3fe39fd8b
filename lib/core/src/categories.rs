// Category-set normalization shared by the catalog, the offline builder,
// and the online recommender. Keeping one parse path means the vocabulary
// built offline and the sets matched at query time always agree.
use std::collections::HashSet;

/// Parse a comma-separated category or preference string into a label set.
///
/// Labels are trimmed, lowercased, and deduplicated; empty fragments are
/// dropped. "Beach, Adventure" and "beach,adventure" produce the same set.
pub fn parse_label_set(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|label| label.trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .collect()
}
