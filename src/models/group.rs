use crate::models::SearchableItem;
use serde::Serialize;
use std::collections::BTreeMap;

/// How a hybrid group relates to its parent type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "hybridType", rename_all = "kebab-case")]
pub enum HybridLayout {
    /// The type had exactly one category and is shown flat
    #[serde(rename_all = "camelCase")]
    SingleCategory { category: String },

    /// One of several category sub-groups under the same type
    #[serde(rename_all = "camelCase")]
    MultiCategory { parent_type: String, category: String },
}

/// Recorded when a group's items were cut to the per-group cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Truncation {
    pub truncated: bool,
    pub original_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupMetadata {
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub layout: Option<HybridLayout>,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,
}

impl GroupMetadata {
    pub fn is_truncated(&self) -> bool {
        self.truncation.map(|t| t.truncated).unwrap_or(false)
    }

    pub fn original_count(&self) -> Option<usize> {
        self.truncation.map(|t| t.original_count)
    }
}

/// One presentation bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchGroup {
    pub id: String,
    pub label: String,
    pub description: String,
    pub icon: String,
    pub items: Vec<SearchableItem>,

    /// Item count before truncation
    pub count: usize,

    /// Lower sorts first
    pub priority: u32,

    pub default_expanded: bool,

    pub metadata: GroupMetadata,
}

impl SearchGroup {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        items: Vec<SearchableItem>,
        priority: u32,
    ) -> Self {
        let count = items.len();
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            icon: "📄".to_string(),
            items,
            count,
            priority,
            default_expanded: false,
            metadata: GroupMetadata::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = expanded;
        self
    }

    pub fn with_layout(mut self, layout: HybridLayout) -> Self {
        self.metadata.layout = Some(layout);
        self
    }

    /// Cut items to `max`, keeping `count` at the original size
    pub fn truncate(&mut self, max: usize) {
        if self.items.len() > max {
            let original_count = self.count.max(self.items.len());
            self.items.truncate(max);
            self.metadata.truncation = Some(Truncation {
                truncated: true,
                original_count,
            });
        }
    }
}

/// Group size summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub average_group_size: usize,
    pub largest_group_size: usize,
    pub smallest_group_size: usize,

    /// Number of groups per size bucket (`1`, `2-3`, `4-5`, `6-10`, `10+`)
    pub group_size_distribution: BTreeMap<String, usize>,
}

/// The output of one grouping call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedResults {
    pub groups: Vec<SearchGroup>,

    /// Number of input items, not of rendered items
    pub total_count: usize,

    pub group_count: usize,
    pub strategy: String,
    pub stats: GroupStats,
}

impl GroupedResults {
    pub fn empty(strategy: impl Into<String>) -> Self {
        Self {
            groups: Vec::new(),
            total_count: 0,
            group_count: 0,
            strategy: strategy.into(),
            stats: GroupStats::default(),
        }
    }

    pub fn group(&self, id: &str) -> Option<&SearchGroup> {
        self.groups.iter().find(|g| g.id == id)
    }
}
