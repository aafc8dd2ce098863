use crate::catalog::{Catalog, CatalogItem};

/// Hard cap on the number of items returned for a single query.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Number of leading catalog items returned when nothing matches.
pub const FALLBACK_COUNT: usize = 3;

/// Recommend catalog items for a free-text query.
///
/// An item matches when any of its skills, lowercased, occurs as a
/// substring of the lowercased query. Matches keep catalog order. When
/// nothing matches, the first [`FALLBACK_COUNT`] items are returned so
/// the caller always has something to show.
pub fn recommend(catalog: &Catalog, query: &str) -> Vec<CatalogItem> {
    let query_lower = query.to_lowercase();

    let mut matches: Vec<CatalogItem> = catalog
        .items()
        .iter()
        .filter(|item| matches_query(item, &query_lower))
        .cloned()
        .collect();

    if matches.is_empty() {
        matches = catalog
            .items()
            .iter()
            .take(FALLBACK_COUNT)
            .cloned()
            .collect();
    }

    matches.truncate(MAX_RECOMMENDATIONS);
    matches
}

fn matches_query(item: &CatalogItem, query_lower: &str) -> bool {
    item.skills
        .iter()
        .any(|skill| query_lower.contains(&skill.to_lowercase()))
}
