//! Main search service implementation

use crate::metrics::{SEARCH_DURATION_SECONDS, SEARCH_REQUESTS_TOTAL, SEARCH_RESULTS_RETURNED};
use crate::models::SearchableItem;
use crate::search::catalog::{CandidateProvider, StaticCatalog};
use crate::search::config::SearchConfig;
use crate::search::error::{SearchError, SearchResult};
use crate::search::query::SearchQuery;
use crate::search::scorer::{filter_results, per_type_limit, sort_by_type_priority, TypeResults};
use crate::search::suggest::suggestions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Search response with results and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Search query that was executed
    pub query: String,

    /// Matched items grouped by type, in type-priority order
    pub results: Vec<TypeResults>,

    /// Sum of per-type counts
    pub total: usize,

    /// Label suggestions (empty unless requested)
    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Search execution time in milliseconds
    pub search_time: f64,

    pub timestamp: DateTime<Utc>,
}

impl SearchResponse {
    /// All matched items as one flat list, type order preserved
    pub fn flatten(&self) -> Vec<SearchableItem> {
        self.results
            .iter()
            .flat_map(|group| group.items.iter().cloned().map(SearchableItem::from))
            .collect()
    }
}

/// Main search service
#[derive(Clone)]
pub struct SearchService {
    provider: Arc<dyn CandidateProvider>,
    config: SearchConfig,
}

impl SearchService {
    /// Create a search service over the built-in catalogs
    pub fn new(config: SearchConfig) -> Self {
        Self::with_provider(Arc::new(StaticCatalog::default()), config)
    }

    pub fn with_provider(provider: Arc<dyn CandidateProvider>, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a query against every requested type
    pub async fn search(&self, query: &SearchQuery) -> SearchResult<SearchResponse> {
        let start_time = Instant::now();

        let outcome = self.execute(query).await;
        let elapsed = start_time.elapsed();

        SEARCH_DURATION_SECONDS.observe(elapsed.as_secs_f64());
        let label = if outcome.is_ok() { "success" } else { "error" };
        SEARCH_REQUESTS_TOTAL.with_label_values(&[label]).inc();

        let results = outcome?;
        let total: usize = results.iter().map(|r| r.count).sum();
        SEARCH_RESULTS_RETURNED.observe(total as f64);

        let suggestions = if query.include_suggestions {
            self.suggest(&query.query)
        } else {
            Vec::new()
        };

        let search_time = (elapsed.as_secs_f64() * 100_000.0).round() / 100.0;

        info!(
            query = %query.query,
            types = results.len(),
            total,
            search_time_ms = search_time,
            "Search completed"
        );

        Ok(SearchResponse {
            query: query.query.clone(),
            results,
            total,
            suggestions,
            search_time,
            timestamp: Utc::now(),
        })
    }

    async fn execute(&self, query: &SearchQuery) -> SearchResult<Vec<TypeResults>> {
        if query.query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query must not be empty".to_string()));
        }

        let types = query.effective_types();
        let limit = per_type_limit(query.limit, types.len());
        debug!(
            provider = self.provider.name(),
            types = types.len(),
            per_type_limit = limit,
            "Executing search"
        );

        let mut results = Vec::new();
        for item_type in types {
            let candidates = self.provider.fetch_candidates(&item_type).await.map_err(|e| {
                warn!(item_type = %item_type, error = %e, "Failed to fetch candidates");
                e
            })?;

            let items = filter_results(candidates, &query.query, limit);
            if !items.is_empty() {
                results.push(TypeResults::new(item_type, items));
            }
        }

        sort_by_type_priority(&mut results);
        Ok(results)
    }

    /// Label suggestions for a partial query
    pub fn suggest(&self, partial_query: &str) -> Vec<String> {
        if !self.config.enable_suggestions {
            return Vec::new();
        }
        suggestions(partial_query, self.config.max_suggestions)
    }
}
