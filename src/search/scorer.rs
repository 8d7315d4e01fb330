//! Relevance scoring and per-type result selection
//!
//! Matching is case-insensitive substring containment with additive field
//! weights. Everything here is pure; the service layer does the fetching.

use crate::models::labels::{type_label, type_priority};
use crate::models::{ItemType, ProjectedItem, SearchableItem};
use serde::{Deserialize, Serialize};

pub const TITLE_WEIGHT: u32 = 100;
pub const DESCRIPTION_WEIGHT: u32 = 50;
pub const KEYWORD_WEIGHT: u32 = 30;
pub const CATEGORY_WEIGHT: u32 = 20;

/// Matched items of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeResults {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub type_label: String,
    pub items: Vec<ProjectedItem>,
    pub count: usize,
}

impl TypeResults {
    pub fn new(item_type: ItemType, items: Vec<ProjectedItem>) -> Self {
        Self {
            type_label: type_label(&item_type).to_string(),
            count: items.len(),
            item_type,
            items,
        }
    }
}

/// Relevance of `item` for `query`; 0 means no field matched.
///
/// The keyword bonus is awarded once no matter how many keywords match.
pub fn score(item: &SearchableItem, query: &str) -> u32 {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    score_lowercased(item, &needle)
}

fn score_lowercased(item: &SearchableItem, needle: &str) -> u32 {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    let mut total = 0;
    if contains(&item.title) {
        total += TITLE_WEIGHT;
    }
    if contains(&item.description) {
        total += DESCRIPTION_WEIGHT;
    }
    if item.keywords.iter().any(|k| contains(k)) {
        total += KEYWORD_WEIGHT;
    }
    if item.category.as_deref().is_some_and(contains) {
        total += CATEGORY_WEIGHT;
    }
    total
}

/// Score, drop non-matches, rank and cut one type's candidates.
///
/// Equal scores keep catalog order (`sort_by` is stable).
pub fn filter_results(items: Vec<SearchableItem>, query: &str, limit: usize) -> Vec<ProjectedItem> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<SearchableItem> = items
        .into_iter()
        .filter_map(|mut item| {
            item.score = score_lowercased(&item, &needle);
            (item.score > 0).then_some(item)
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored.into_iter().map(ProjectedItem::from).collect()
}

/// Per-type result cap; never zero
pub fn per_type_limit(limit: usize, type_count: usize) -> usize {
    (limit / type_count.max(1)).max(1)
}

/// Order result groups by type priority, unknown types last, ties stable
pub fn sort_by_type_priority(results: &mut [TypeResults]) {
    results.sort_by_key(|r| type_priority(&r.item_type));
}
