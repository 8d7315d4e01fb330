//! HTTP surface tests driven through the router with `oneshot`

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{get, metric_exists, post_json, test_app, test_app_with};
use mes_global_search::metrics::init_metrics;
use mes_global_search::models::{ItemType, SearchableItem};
use mes_global_search::search::{
    CandidateProvider, SearchConfig, SearchError, SearchResult, SearchService,
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_search_success_envelope() {
    let (status, body) = post_json(test_app(), "/api/search", json!({ "query": "订单" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["query"], "订单");
    assert_eq!(data["total"], 6);
    assert!(data["search_time"].is_number());
    assert!(data["timestamp"].is_string());
    assert_eq!(data["suggestions"], json!([]));

    let first = &data["results"][0];
    assert_eq!(first["type"], "page");
    assert_eq!(first["type_label"], "页面");

    let item = &first["items"][0];
    assert_eq!(item["id"], "page-orders");
    assert!(item.get("keywords").is_none());
    assert!(item.get("score").is_none());
}

#[tokio::test]
async fn test_search_with_types_and_suggestions() {
    let (status, body) = post_json(
        test_app(),
        "/api/search",
        json!({ "query": "订单", "types": ["order"], "limit": 2, "include_suggestions": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["results"].as_array().unwrap().len(), 1);
    assert_eq!(data["results"][0]["count"], 2);
    assert_eq!(data["suggestions"], json!(["订单"]));
}

#[tokio::test]
async fn test_blank_query_is_rejected() {
    let (status, body) = post_json(test_app(), "/api/search", json!({ "query": "   " })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
    assert!(body["errors"]["query"].is_array());
}

#[tokio::test]
async fn test_invalid_fields_are_reported() {
    let (status, body) = post_json(
        test_app(),
        "/api/search",
        json!({ "query": "订单", "types": ["report"], "limit": 51 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["types"].is_array());
    assert!(body["errors"]["limit"].is_array());
}

#[tokio::test]
async fn test_overlong_query_is_rejected() {
    let query = "订".repeat(101);
    let (status, body) = post_json(test_app(), "/api/search", json!({ "query": query })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["query"].is_array());
}

#[tokio::test]
async fn test_malformed_body_is_validation_failure() {
    let (status, body) = post_json(test_app(), "/api/search", json!({ "limit": 5 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["errors"]["body"].is_array());
}

struct BrokenCatalog;

#[async_trait]
impl CandidateProvider for BrokenCatalog {
    async fn fetch_candidates(&self, _item_type: &ItemType) -> SearchResult<Vec<SearchableItem>> {
        Err(SearchError::Internal("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[tokio::test]
async fn test_internal_failure_hides_detail() {
    let service = SearchService::with_provider(Arc::new(BrokenCatalog), SearchConfig::default());
    let (status, body) = post_json(test_app_with(service), "/api/search", json!({ "query": "订单" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "SEARCH_SERVICE_ERROR");
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_suggestions_endpoint() {
    let (status, body) = get(test_app(), "/api/search/suggestions?q=ord").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["query"], "ord");
    assert_eq!(body["data"]["suggestions"], json!(["Orders"]));

    let (_, body) = get(test_app(), "/api/search/suggestions").await;
    assert_eq!(body["data"]["suggestions"], json!([]));
}

#[tokio::test]
async fn test_grouped_search_defaults_to_intelligent() {
    let (status, body) = post_json(test_app(), "/api/search/grouped", json!({ "query": "订单" })).await;

    assert_eq!(status, StatusCode::OK);
    let grouped = &body["data"]["grouped"];
    assert_eq!(grouped["totalCount"], 6);
    assert!(grouped["strategy"].as_str().unwrap().starts_with("intelligent-"));
}

#[tokio::test]
async fn test_grouped_search_with_filters_and_caps() {
    let (status, body) = post_json(
        test_app(),
        "/api/search/grouped",
        json!({
            "query": "订单",
            "strategy": "category",
            "max_results_per_group": 1,
            "category_priority": { "已完成": 0 },
            "filters": [{ "type": "type", "value": "order" }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let grouped = &body["data"]["grouped"];
    assert_eq!(grouped["strategy"], "category");
    assert_eq!(grouped["totalCount"], 4);

    let groups = grouped["groups"].as_array().unwrap();
    assert_eq!(groups[0]["label"], "已完成");
    assert_eq!(groups[1]["label"], "待处理");
    assert_eq!(groups[1]["count"], 2);
    assert_eq!(groups[1]["items"].as_array().unwrap().len(), 1);
    assert_eq!(groups[1]["metadata"]["truncated"], true);
    assert_eq!(groups[1]["metadata"]["originalCount"], 2);
}

#[tokio::test]
async fn test_grouped_search_validates_caps() {
    let (status, body) = post_json(
        test_app(),
        "/api/search/grouped",
        json!({ "query": "订单", "max_groups": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["max_groups"].is_array());
}

#[tokio::test]
async fn test_metrics_endpoint_reports_traffic() {
    init_metrics().unwrap();
    let app = test_app();

    let _ = post_json(app.clone(), "/api/search", json!({ "query": "订单" })).await;
    let _ = post_json(app.clone(), "/api/search/grouped", json!({ "query": "订单" })).await;
    let (status, body) = get(app, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    let output = body.as_str().unwrap();
    assert!(metric_exists(output, "mes_global_search_http_requests_total"));
    assert!(metric_exists(output, "mes_global_search_search_requests_total"));
    assert!(metric_exists(output, "mes_global_search_grouping_requests_total"));
    assert!(output.contains("path=\"/api/search\""));
}
