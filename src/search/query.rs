//! Search query structure

use crate::models::ItemType;
use serde::{Deserialize, Serialize};

/// A validated search request as seen by the search core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Trimmed, non-empty free text
    pub query: String,

    /// Types to search; empty means every canonical type
    pub types: Vec<ItemType>,

    /// Overall result budget, split evenly across types
    pub limit: usize,

    /// Attach label suggestions to the response
    pub include_suggestions: bool,
}

impl SearchQuery {
    /// Create a new search query over all canonical types
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().trim().to_string(),
            types: Vec::new(),
            limit: 20,
            include_suggestions: false,
        }
    }

    /// Restrict to the given types
    pub fn with_types(mut self, types: impl IntoIterator<Item = ItemType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Set limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Enable/disable suggestions
    pub fn with_suggestions(mut self, include: bool) -> Self {
        self.include_suggestions = include;
        self
    }

    /// Requested types with duplicates removed, or the canonical set
    pub fn effective_types(&self) -> Vec<ItemType> {
        if self.types.is_empty() {
            return ItemType::CANONICAL.to_vec();
        }

        let mut seen = Vec::with_capacity(self.types.len());
        for item_type in &self.types {
            if !seen.contains(item_type) {
                seen.push(item_type.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = SearchQuery::new("  订单 ");
        assert_eq!(query.query, "订单");
        assert_eq!(query.limit, 20);
        assert!(!query.include_suggestions);
        assert_eq!(query.effective_types(), ItemType::CANONICAL.to_vec());
    }

    #[test]
    fn test_effective_types_dedupes_in_order() {
        let query = SearchQuery::new("x").with_types([
            ItemType::User,
            ItemType::Page,
            ItemType::User,
        ]);
        assert_eq!(query.effective_types(), vec![ItemType::User, ItemType::Page]);
    }
}
