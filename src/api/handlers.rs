use crate::api::AppState;
use crate::error::{AppError, FieldErrors, Result};
use crate::grouping::{
    apply_filters, create_filter, deduplicate_results, FilterKind, GroupingConfig,
    GroupingEngine, GroupingStrategy, ResultFilter,
};
use crate::metrics::GROUPING_REQUESTS_TOTAL;
use crate::models::{GroupedResults, ItemType};
use crate::search::{SearchConfig, SearchQuery, SearchResponse};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use validator::{Validate, ValidationError};

/// Longest accepted query, in characters, after trimming
pub const MAX_QUERY_CHARS: usize = 100;

/// Success envelope shared by every search endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Search request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(custom(function = "validate_query"))]
    pub query: String,

    /// Empty or absent means every type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(custom(function = "validate_types"))]
    pub types: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 50, message = "limit 必须在 1 到 50 之间"))]
    pub limit: Option<usize>,

    #[serde(default)]
    pub include_suggestions: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            types: Vec::new(),
            limit: None,
            include_suggestions: false,
        }
    }

    /// Core query for this request; the limit defaults from and is capped by config
    pub fn to_query(&self, config: &SearchConfig) -> SearchQuery {
        let limit = self
            .limit
            .unwrap_or(config.default_limit)
            .min(config.max_limit);

        SearchQuery::new(self.query.as_str())
            .with_types(self.types.iter().map(|t| ItemType::parse(t)))
            .with_limit(limit)
            .with_suggestions(self.include_suggestions)
    }
}

fn validation_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_query(query: &str) -> std::result::Result<(), ValidationError> {
    let chars = query.trim().chars().count();
    if chars == 0 {
        return Err(validation_error("required", "搜索关键词不能为空"));
    }
    if chars > MAX_QUERY_CHARS {
        return Err(validation_error("length", "搜索关键词不能超过100个字符"));
    }
    Ok(())
}

fn validate_types(types: &[String]) -> std::result::Result<(), ValidationError> {
    match types
        .iter()
        .find(|t| !ItemType::CANONICAL.iter().any(|c| c.as_str() == t.as_str()))
    {
        Some(unsupported) => Err(validation_error(
            "unsupported_type",
            format!("不支持的搜索类型: {}", unsupported),
        )),
        None => Ok(()),
    }
}

/// Malformed or mistyped bodies are reported like any other validation failure
fn rejection_error(rejection: JsonRejection) -> AppError {
    let mut errors = FieldErrors::new();
    errors.insert("body".to_string(), vec![rejection.body_text()]);
    AppError::Validation {
        message: "请求参数格式无效".to_string(),
        errors,
    }
}

/// Run the scorer for a validated request
pub async fn search(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SearchResponse>>> {
    let Json(request) = payload.map_err(rejection_error)?;
    request.validate()?;

    let response = run_search(&state, &request).await?;
    Ok(Json(ApiResponse::ok(response)))
}

async fn run_search(state: &AppState, request: &SearchRequest) -> Result<SearchResponse> {
    let query = request.to_query(state.search.config());

    state.search.search(&query).await.map_err(|e| {
        tracing::error!(query = %query.query, error = %e, "Search request failed");
        AppError::from(e)
    })
}

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionData {
    pub query: String,
    pub suggestions: Vec<String>,
}

/// Label suggestions for a partial query
pub async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Json<ApiResponse<SuggestionData>> {
    let suggestions = state.search.suggest(&params.q);
    Json(ApiResponse::ok(SuggestionData {
        query: params.q,
        suggestions,
    }))
}

/// One filter as sent by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl From<FilterParams> for ResultFilter {
    fn from(params: FilterParams) -> Self {
        let label = params.label.unwrap_or_else(|| params.value.clone());
        let filter = create_filter(FilterKind::parse(&params.kind), params.value, label);
        if params.enabled {
            filter
        } else {
            filter.disabled()
        }
    }
}

/// Grouped search request body: a search plus grouping options
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GroupedSearchRequest {
    #[serde(flatten)]
    pub search: SearchRequest,

    /// Strategy name; unknown names group by type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "max_groups 必须大于 0"))]
    pub max_groups: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "max_results_per_group 必须大于 0"))]
    pub max_results_per_group: Option<usize>,

    /// Overrides merged over the configured type priorities
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub type_priority: HashMap<String, u32>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub category_priority: HashMap<String, u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterParams>,
}

impl GroupedSearchRequest {
    pub fn new(search: SearchRequest) -> Self {
        Self {
            search,
            strategy: None,
            max_groups: None,
            max_results_per_group: None,
            type_priority: HashMap::new(),
            category_priority: HashMap::new(),
            filters: Vec::new(),
        }
    }

    /// Server defaults with this request's overrides applied
    pub fn grouping_config(&self, defaults: &GroupingConfig) -> GroupingConfig {
        let mut config = defaults.clone();
        if let Some(max) = self.max_groups {
            config.max_groups = max;
        }
        if let Some(max) = self.max_results_per_group {
            config.max_results_per_group = max;
        }
        config
            .type_priority
            .extend(self.type_priority.iter().map(|(k, v)| (k.clone(), *v)));
        config
            .category_priority
            .extend(self.category_priority.iter().map(|(k, v)| (k.clone(), *v)));
        config
    }

    pub fn strategy(&self) -> GroupingStrategy {
        GroupingStrategy::from_name(self.strategy.as_deref().unwrap_or("intelligent"))
    }
}

#[derive(Debug, Serialize)]
pub struct GroupedSearchData {
    pub query: String,
    pub grouped: GroupedResults,
    pub search_time: f64,
    pub timestamp: DateTime<Utc>,
}

/// Search, then filter, deduplicate and group the flattened results
pub async fn grouped_search(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GroupedSearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<GroupedSearchData>>> {
    let Json(request) = payload.map_err(rejection_error)?;
    request.search.validate()?;
    request.validate()?;

    let response = run_search(&state, &request.search).await?;

    let filters: Vec<ResultFilter> = request.filters.iter().cloned().map(ResultFilter::from).collect();
    let items = deduplicate_results(apply_filters(response.flatten(), &filters));

    let engine = GroupingEngine::new(request.grouping_config(&state.grouping));
    let grouped = engine.group_by_strategy(items, &request.strategy());
    GROUPING_REQUESTS_TOTAL
        .with_label_values(&[&grouped.strategy])
        .inc();

    tracing::debug!(
        query = %response.query,
        strategy = %grouped.strategy,
        groups = grouped.group_count,
        "Grouped search completed"
    );

    Ok(Json(ApiResponse::ok(GroupedSearchData {
        query: response.query,
        grouped,
        search_time: response.search_time,
        timestamp: response.timestamp,
    })))
}

/// Prometheus metrics endpoint
///
/// Returns metrics in Prometheus text exposition format
pub async fn metrics() -> (StatusCode, String) {
    let metrics = crate::metrics::gather_metrics();
    (StatusCode::OK, metrics)
}
