//! Result filters

use crate::models::SearchableItem;
use std::fmt;
use std::sync::Arc;

/// What a filter inspects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    Type,
    Category,
    Keyword,
    Other(String),
}

impl FilterKind {
    pub fn parse(kind: &str) -> Self {
        match kind.trim() {
            "type" => FilterKind::Type,
            "category" => FilterKind::Category,
            "keyword" => FilterKind::Keyword,
            other => FilterKind::Other(other.to_string()),
        }
    }
}

/// The test a filter applies to each item
#[derive(Clone)]
pub enum FilterPredicate {
    TypeEquals(String),
    CategoryEquals(String),
    /// Lowercased needle, matched against title or description
    TextContains(String),
    Always,
    Custom(Arc<dyn Fn(&SearchableItem) -> bool + Send + Sync>),
}

impl FilterPredicate {
    pub fn matches(&self, item: &SearchableItem) -> bool {
        match self {
            FilterPredicate::TypeEquals(value) => item.item_type.as_str() == value,
            FilterPredicate::CategoryEquals(value) => item.category.as_deref() == Some(value.as_str()),
            FilterPredicate::TextContains(needle) => {
                item.title.to_lowercase().contains(needle)
                    || item.description.to_lowercase().contains(needle)
            }
            FilterPredicate::Always => true,
            FilterPredicate::Custom(predicate) => predicate(item),
        }
    }
}

impl fmt::Debug for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPredicate::TypeEquals(v) => f.debug_tuple("TypeEquals").field(v).finish(),
            FilterPredicate::CategoryEquals(v) => f.debug_tuple("CategoryEquals").field(v).finish(),
            FilterPredicate::TextContains(v) => f.debug_tuple("TextContains").field(v).finish(),
            FilterPredicate::Always => f.write_str("Always"),
            FilterPredicate::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultFilter {
    pub kind: FilterKind,
    pub value: String,
    pub label: String,
    pub enabled: bool,
    pub predicate: FilterPredicate,
}

impl ResultFilter {
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn matches(&self, item: &SearchableItem) -> bool {
        self.predicate.matches(item)
    }
}

/// Build an enabled filter; unknown kinds accept everything
pub fn create_filter(kind: FilterKind, value: impl Into<String>, label: impl Into<String>) -> ResultFilter {
    let value = value.into();
    let predicate = match &kind {
        FilterKind::Type => FilterPredicate::TypeEquals(value.clone()),
        FilterKind::Category => FilterPredicate::CategoryEquals(value.clone()),
        FilterKind::Keyword => FilterPredicate::TextContains(value.to_lowercase()),
        FilterKind::Other(_) => FilterPredicate::Always,
    };

    ResultFilter {
        kind,
        value,
        label: label.into(),
        enabled: true,
        predicate,
    }
}

/// Keep items passing every enabled filter; disabled filters are ignored
pub fn apply_filters(items: Vec<SearchableItem>, filters: &[ResultFilter]) -> Vec<SearchableItem> {
    let active: Vec<&ResultFilter> = filters.iter().filter(|f| f.enabled).collect();
    if active.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| active.iter().all(|f| f.matches(item)))
        .collect()
}
