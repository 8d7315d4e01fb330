//! Grouping configuration

use crate::models::labels::{type_priority, UNKNOWN_PRIORITY};
use crate::models::ItemType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options shared by every grouping strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Rank per type tag; unlisted tags get 999
    #[serde(default = "default_type_priority")]
    pub type_priority: HashMap<String, u32>,

    /// Rank per category; empty means categories are ordered by size
    #[serde(default)]
    pub category_priority: HashMap<String, u32>,

    /// Accepted for compatibility; groups are only built for present keys,
    /// so empty groups never exist
    #[serde(default)]
    pub show_empty_groups: bool,

    /// Maximum number of groups returned
    #[serde(default = "default_max_groups")]
    pub max_groups: usize,

    /// Maximum number of items rendered per group
    #[serde(default = "default_max_results_per_group")]
    pub max_results_per_group: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            type_priority: default_type_priority(),
            category_priority: HashMap::new(),
            show_empty_groups: false,
            max_groups: default_max_groups(),
            max_results_per_group: default_max_results_per_group(),
        }
    }
}

impl GroupingConfig {
    pub fn type_rank(&self, item_type: &ItemType) -> u32 {
        self.type_priority
            .get(item_type.as_str())
            .copied()
            .unwrap_or(UNKNOWN_PRIORITY)
    }

    pub fn category_rank(&self, category: &str) -> u32 {
        self.category_priority
            .get(category)
            .copied()
            .unwrap_or(UNKNOWN_PRIORITY)
    }
}

fn default_type_priority() -> HashMap<String, u32> {
    ItemType::CANONICAL
        .iter()
        .map(|t| (t.as_str().to_string(), type_priority(t)))
        .collect()
}

fn default_max_groups() -> usize {
    10
}

fn default_max_results_per_group() -> usize {
    20
}

/// Builder for GroupingConfig
pub struct GroupingConfigBuilder {
    config: GroupingConfig,
}

impl GroupingConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GroupingConfig::default(),
        }
    }

    pub fn type_priority(mut self, item_type: impl Into<String>, priority: u32) -> Self {
        self.config.type_priority.insert(item_type.into(), priority);
        self
    }

    pub fn category_priority(mut self, category: impl Into<String>, priority: u32) -> Self {
        self.config.category_priority.insert(category.into(), priority);
        self
    }

    pub fn show_empty_groups(mut self, show: bool) -> Self {
        self.config.show_empty_groups = show;
        self
    }

    pub fn max_groups(mut self, max: usize) -> Self {
        self.config.max_groups = max;
        self
    }

    pub fn max_results_per_group(mut self, max: usize) -> Self {
        self.config.max_results_per_group = max;
        self
    }

    pub fn build(self) -> GroupingConfig {
        self.config
    }
}

impl Default for GroupingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
