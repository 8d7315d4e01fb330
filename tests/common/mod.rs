//! Shared fixtures for the integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mes_global_search::api::{build_router, AppState};
use mes_global_search::grouping::GroupingConfig;
use mes_global_search::models::{ItemType, SearchableItem};
use mes_global_search::search::{SearchConfig, SearchService};
use serde_json::Value;
use tower::ServiceExt;

/// Six mixed results: page x2, order x2, product x1, user x1
pub fn mock_results() -> Vec<SearchableItem> {
    vec![
        SearchableItem::new("page-orders", ItemType::Page, "订单管理")
            .with_description("查看和管理生产订单")
            .with_category("业务"),
        SearchableItem::new("page-settings", ItemType::Page, "系统设置")
            .with_description("配置系统参数")
            .with_category("系统"),
        SearchableItem::new("order-1001", ItemType::Order, "订单 #SO-2024-1001")
            .with_category("业务"),
        SearchableItem::new("order-1002", ItemType::Order, "订单 #SO-2024-1002")
            .with_category("待处理"),
        SearchableItem::new("product-a100", ItemType::Product, "精密轴承 A100")
            .with_category("零部件"),
        SearchableItem::new("user-1", ItemType::User, "张伟").with_category("生产部"),
    ]
}

/// Router over the built-in catalogs
pub fn test_app() -> Router {
    test_app_with(SearchService::new(SearchConfig::default()))
}

pub fn test_app_with(service: SearchService) -> Router {
    build_router(AppState::new(service).with_grouping(GroupingConfig::default()))
}

/// Send one request and decode the body as JSON (or a JSON string for text bodies)
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Check if a metric exists in Prometheus output
pub fn metric_exists(output: &str, metric_name: &str) -> bool {
    output.lines().any(|line| {
        line.starts_with(&format!("# HELP {}", metric_name))
            || line.starts_with(&format!("# TYPE {}", metric_name))
            || line.starts_with(metric_name)
    })
}
