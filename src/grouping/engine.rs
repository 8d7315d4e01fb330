//! Partitioning of flat result lists into presentation groups

use crate::grouping::config::GroupingConfig;
use crate::grouping::stats::calculate_stats;
use crate::grouping::strategy::GroupingStrategy;
use crate::models::labels::{
    category_icon, type_description, type_icon, type_label, UNCATEGORIZED,
};
use crate::models::{GroupedResults, HybridLayout, ItemType, SearchGroup, SearchableItem};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

/// Groups of this size or smaller start expanded when grouped by type
const TYPE_EXPAND_THRESHOLD: usize = 5;

/// Groups of this size or smaller start expanded when grouped by category
const CATEGORY_EXPAND_THRESHOLD: usize = 3;

/// Stateless grouping over a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct GroupingEngine {
    config: GroupingConfig,
}

impl GroupingEngine {
    pub fn new(config: GroupingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Dispatch to the requested strategy
    pub fn group_by_strategy(
        &self,
        items: Vec<SearchableItem>,
        strategy: &GroupingStrategy,
    ) -> GroupedResults {
        match strategy {
            GroupingStrategy::Type => self.group_by_type(items),
            GroupingStrategy::Category => self.group_by_category(items),
            GroupingStrategy::Hybrid => self.group_by_hybrid(items),
            GroupingStrategy::Intelligent => self.group_intelligently(items),
            GroupingStrategy::Custom(Some(grouper)) => {
                let total_count = items.len();
                let mut groups = grouper(&items, &self.config);
                groups.sort_by_key(|g| g.priority);
                self.finish(groups, total_count, "custom")
            }
            GroupingStrategy::Custom(None) => {
                debug!("Custom strategy without a grouper, grouping by type");
                self.group_by_type(items)
            }
        }
    }

    /// One group per item type, ordered by type priority
    pub fn group_by_type(&self, items: Vec<SearchableItem>) -> GroupedResults {
        let total_count = items.len();

        let mut groups: Vec<SearchGroup> = partition_by(items, |item| item.item_type.clone())
            .into_iter()
            .map(|(item_type, items)| {
                let expanded = items.len() <= TYPE_EXPAND_THRESHOLD;
                SearchGroup::new(
                    format!("type-{}", item_type),
                    type_label(&item_type),
                    items,
                    self.config.type_rank(&item_type),
                )
                .with_description(type_description(&item_type))
                .with_icon(type_icon(&item_type))
                .with_expanded(expanded)
            })
            .collect();

        groups.sort_by_key(|g| g.priority);
        self.finish(groups, total_count, "type")
    }

    /// One group per category.
    ///
    /// Configured category priority sorts first (lower first, unconfigured
    /// last); ties go to the larger group, then to first appearance.
    pub fn group_by_category(&self, items: Vec<SearchableItem>) -> GroupedResults {
        let total_count = items.len();

        let mut groups: Vec<SearchGroup> = partition_by(items, category_key)
            .into_iter()
            .map(|(category, items)| {
                let count = items.len();
                SearchGroup::new(
                    format!("category-{}", category),
                    category.clone(),
                    items,
                    self.config.category_rank(&category),
                )
                .with_description(format!("{} 个结果", count))
                .with_icon(category_icon(&category))
                .with_expanded(count <= CATEGORY_EXPAND_THRESHOLD)
            })
            .collect();

        groups.sort_by(|a, b| a.priority.cmp(&b.priority).then(b.count.cmp(&a.count)));
        self.finish(groups, total_count, "category")
    }

    /// Types first, then categories inside each type.
    ///
    /// A type with a single category stays one flat group; otherwise each
    /// category becomes a sub-group ranked `type_index * 100 + category_index`.
    pub fn group_by_hybrid(&self, items: Vec<SearchableItem>) -> GroupedResults {
        let total_count = items.len();

        let mut by_type = partition_by(items, |item| item.item_type.clone());
        by_type.sort_by_key(|(item_type, _)| self.config.type_rank(item_type));

        let mut groups = Vec::new();
        for (type_index, (item_type, items)) in by_type.into_iter().enumerate() {
            let base_priority = type_index as u32 * 100;
            let label = type_label(&item_type).to_string();
            let mut by_category = partition_by(items, category_key);

            if by_category.len() == 1 {
                let (category, items) = by_category.remove(0);
                groups.push(
                    SearchGroup::new(format!("hybrid-{}", item_type), label, items, base_priority)
                        .with_description(type_description(&item_type))
                        .with_icon(type_icon(&item_type))
                        .with_layout(HybridLayout::SingleCategory { category }),
                );
                continue;
            }

            for (category_index, (category, items)) in by_category.into_iter().enumerate() {
                groups.push(
                    SearchGroup::new(
                        format!("hybrid-{}-{}", item_type, category),
                        format!("{} - {}", label, category),
                        items,
                        base_priority + category_index as u32,
                    )
                    .with_description(type_description(&item_type))
                    .with_icon(category_icon(&category))
                    .with_layout(HybridLayout::MultiCategory {
                        parent_type: item_type.to_string(),
                        category,
                    }),
                );
            }
        }

        // Push order is already type rank, then category order within the type.
        // The first group opens; the second only when it is a whole type
        for (position, group) in groups.iter_mut().enumerate() {
            group.default_expanded = match position {
                0 => true,
                1 => matches!(group.metadata.layout, Some(HybridLayout::SingleCategory { .. })),
                _ => false,
            };
        }

        self.finish(groups, total_count, "hybrid")
    }

    /// Pick a strategy from the shape of the input.
    ///
    /// Few types with richer categories group by category, many categorized
    /// types go hybrid, everything else groups by type. The chosen branch is
    /// reported as `intelligent-<strategy>`.
    pub fn group_intelligently(&self, items: Vec<SearchableItem>) -> GroupedResults {
        if items.is_empty() {
            return GroupedResults::empty("intelligent");
        }

        let type_count = items
            .iter()
            .map(|i| &i.item_type)
            .collect::<HashSet<&ItemType>>()
            .len();
        let category_count = items
            .iter()
            .filter_map(SearchableItem::category_name)
            .collect::<HashSet<&str>>()
            .len();
        let has_categories = category_count > 0;

        let mut grouped = if type_count <= 2 && has_categories && category_count > type_count {
            self.group_by_category(items)
        } else if type_count > 3 && has_categories {
            self.group_by_hybrid(items)
        } else {
            self.group_by_type(items)
        };

        debug!(
            type_count,
            category_count,
            strategy = %grouped.strategy,
            "Intelligent grouping selected strategy"
        );
        grouped.strategy = format!("intelligent-{}", grouped.strategy);
        grouped
    }

    /// Apply the per-group and group-count caps, then summarize
    fn finish(&self, mut groups: Vec<SearchGroup>, total_count: usize, strategy: &str) -> GroupedResults {
        for group in &mut groups {
            group.truncate(self.config.max_results_per_group);
        }
        groups.truncate(self.config.max_groups);

        let stats = calculate_stats(&groups);
        GroupedResults {
            group_count: groups.len(),
            groups,
            total_count,
            strategy: strategy.to_string(),
            stats,
        }
    }
}

fn category_key(item: &SearchableItem) -> String {
    item.category_name().unwrap_or(UNCATEGORIZED).to_string()
}

/// Bucket items by key, keeping first-seen key order and item order
fn partition_by<K, F>(items: Vec<SearchableItem>, key_fn: F) -> Vec<(K, Vec<SearchableItem>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&SearchableItem) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<(K, Vec<SearchableItem>)> = Vec::new();

    for item in items {
        let key = key_fn(&item);
        match index.get(&key) {
            Some(&position) => buckets[position].1.push(item),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, vec![item]));
            }
        }
    }

    buckets
}
