//! Deduplication and merging of result lists

use crate::models::SearchableItem;
use std::collections::HashSet;

/// Drop repeated `(type, id)` pairs, keeping the first occurrence in order
pub fn deduplicate_results(items: Vec<SearchableItem>) -> Vec<SearchableItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.dedup_key()))
        .collect()
}

/// Concatenate the lists in order, then deduplicate
pub fn merge_results<I>(lists: I) -> Vec<SearchableItem>
where
    I: IntoIterator<Item = Vec<SearchableItem>>,
{
    deduplicate_results(lists.into_iter().flatten().collect())
}
