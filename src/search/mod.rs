//! Global search: relevance scoring over per-type candidate catalogs
//!
//! This module turns a free-text query into ranked results, grouped by content
//! type:
//!
//! - **Scoring**: case-insensitive substring matching over title, description,
//!   keywords and category with additive weights (100 / 50 / 30 / 20)
//! - **Selection**: non-matching items are dropped, each type keeps its
//!   `limit / |types|` best results (at least one)
//! - **Ordering**: result groups follow the fixed type priority
//!   (page, order, product, user, setting, then anything else)
//! - **Suggestions**: bilingual content-type labels matching the query
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           Search Service API                     │
//! │  - search()          - suggest()                 │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │           Scorer (pure)                          │
//! │  - score()  - filter_results()  - sort by type   │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │           CandidateProvider                      │
//! │  - StaticCatalog (built-in MES catalogs)         │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mes_global_search::search::{SearchConfig, SearchQuery, SearchService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let search = SearchService::new(SearchConfig::default());
//!
//!     let query = SearchQuery::new("订单").with_limit(20);
//!     let response = search.search(&query).await?;
//!     println!("Found {} results", response.total);
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod config;
mod error;
mod query;
pub mod scorer;
mod service;
mod suggest;

pub use catalog::{CandidateProvider, StaticCatalog};
pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{SearchError, SearchResult};
pub use query::SearchQuery;
pub use scorer::{filter_results, per_type_limit, score, sort_by_type_priority, TypeResults};
pub use service::{SearchResponse, SearchService};
pub use suggest::{suggestions, SUGGESTION_LABELS};
