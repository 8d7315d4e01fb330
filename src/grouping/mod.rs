//! Result grouping engine
//!
//! Partitions a flat list of search results into labeled, ordered and capped
//! presentation groups:
//!
//! - **Type**: one group per content type, ordered by type priority
//! - **Category**: one group per category, priority first then size
//! - **Hybrid**: type groups split into category sub-groups when needed
//! - **Intelligent**: picks one of the above from the input distribution
//! - **Custom**: caller-supplied grouper, finalized like the others
//!
//! Filtering, deduplication and merging utilities operate on the same flat
//! lists. Nothing here fails: unknown configuration degrades to defaults.
//!
//! # Example
//!
//! ```
//! use mes_global_search::grouping::{GroupingEngine, GroupingStrategy};
//! use mes_global_search::models::{ItemType, SearchableItem};
//!
//! let items = vec![
//!     SearchableItem::new("1", ItemType::Page, "订单管理"),
//!     SearchableItem::new("2", ItemType::Order, "订单 #SO-1001"),
//! ];
//!
//! let grouped = GroupingEngine::default().group_by_strategy(items, &GroupingStrategy::Type);
//! assert_eq!(grouped.group_count, 2);
//! ```

mod config;
mod dedupe;
mod engine;
mod filters;
mod stats;
mod strategy;

pub use config::{GroupingConfig, GroupingConfigBuilder};
pub use dedupe::{deduplicate_results, merge_results};
pub use engine::GroupingEngine;
pub use filters::{apply_filters, create_filter, FilterKind, FilterPredicate, ResultFilter};
pub use stats::calculate_stats;
pub use strategy::{CustomGrouper, GroupingStrategy};
