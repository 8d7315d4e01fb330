//! Scorer and search service behaviour against the built-in catalogs

use async_trait::async_trait;
use mes_global_search::models::{ItemType, SearchableItem};
use mes_global_search::search::*;
use std::sync::Arc;

fn create_test_service() -> SearchService {
    SearchService::new(SearchConfig::default())
}

fn ids(results: &TypeResults) -> Vec<&str> {
    results.items.iter().map(|i| i.id.as_str()).collect()
}

#[tokio::test]
async fn test_order_query_matches_order_catalog() {
    let service = create_test_service();
    let response = service.search(&SearchQuery::new("订单")).await.unwrap();

    let orders = response
        .results
        .iter()
        .find(|r| r.item_type == ItemType::Order)
        .expect("order results");
    // Title matches first, the keyword-only match last
    assert_eq!(
        ids(orders),
        vec!["order-1001", "order-1002", "order-1003", "order-1004"]
    );

    let all_ids: Vec<&str> = response
        .results
        .iter()
        .flat_map(|r| r.items.iter().map(|i| i.id.as_str()))
        .collect();
    assert!(all_ids.contains(&"page-orders"));
    assert!(!all_ids.contains(&"page-settings"));
}

#[tokio::test]
async fn test_total_is_sum_of_counts() {
    let service = create_test_service();
    let response = service.search(&SearchQuery::new("订单")).await.unwrap();

    let sum: usize = response.results.iter().map(|r| r.count).sum();
    assert_eq!(response.total, sum);
    assert_eq!(response.total, 6);
    for group in &response.results {
        assert_eq!(group.count, group.items.len());
    }
}

#[tokio::test]
async fn test_results_follow_type_priority() {
    let service = create_test_service();
    let query = SearchQuery::new("e").with_types(vec![
        ItemType::Setting,
        ItemType::User,
        ItemType::Product,
        ItemType::Page,
    ]);
    let response = service.search(&query).await.unwrap();

    let order: Vec<&ItemType> = response.results.iter().map(|r| &r.item_type).collect();
    assert_eq!(
        order,
        vec![&ItemType::Page, &ItemType::Product, &ItemType::User, &ItemType::Setting]
    );
}

#[tokio::test]
async fn test_unmatched_query_is_empty() {
    let service = create_test_service();
    let response = service.search(&SearchQuery::new("不存在的内容xyz")).await.unwrap();

    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
    assert!(response.search_time >= 0.0);
}

#[tokio::test]
async fn test_per_type_limit_applies() {
    let service = create_test_service();
    // limit 5 across 5 types leaves one result per type
    let response = service
        .search(&SearchQuery::new("订单").with_limit(5))
        .await
        .unwrap();

    for group in &response.results {
        assert_eq!(group.count, 1, "type {}", group.item_type);
    }
    let orders = response
        .results
        .iter()
        .find(|r| r.item_type == ItemType::Order)
        .unwrap();
    assert_eq!(ids(orders), vec!["order-1001"]);
}

#[test]
fn test_per_type_limit_values() {
    assert_eq!(per_type_limit(20, 5), 4);
    assert_eq!(per_type_limit(1, 5), 1);
    assert_eq!(per_type_limit(50, 1), 50);
}

#[test]
fn test_score_is_additive() {
    let item = SearchableItem::new("x", ItemType::Page, "Order list")
        .with_description("all orders")
        .with_keywords(["order", "orders"])
        .with_category("ORDER");

    assert_eq!(score(&item, "order"), 100 + 50 + 30 + 20);
    assert_eq!(score(&item, "list"), 100);
    assert_eq!(score(&item, "missing"), 0);
}

#[tokio::test]
async fn test_flatten_preserves_type_order() {
    let service = create_test_service();
    let response = service.search(&SearchQuery::new("订单")).await.unwrap();
    let flat = response.flatten();

    assert_eq!(flat.len(), response.total);
    assert_eq!(flat[0].id, "page-orders");
    assert!(flat.iter().all(|i| i.keywords.is_empty()));
}

struct FailingProvider;

#[async_trait]
impl CandidateProvider for FailingProvider {
    async fn fetch_candidates(&self, item_type: &ItemType) -> SearchResult<Vec<SearchableItem>> {
        Err(SearchError::CatalogUnavailable(item_type.to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let service = SearchService::with_provider(Arc::new(FailingProvider), SearchConfig::default());
    let result = service.search(&SearchQuery::new("订单")).await;
    assert!(matches!(result, Err(SearchError::CatalogUnavailable(_))));
}

#[tokio::test]
async fn test_custom_provider_catalog() {
    let catalog = StaticCatalog::empty().with_items(
        ItemType::Product,
        vec![
            SearchableItem::new("p1", ItemType::Product, "Widget"),
            SearchableItem::new("p2", ItemType::Product, "Gadget").with_keywords(["widget"]),
        ],
    );
    let service = SearchService::with_provider(Arc::new(catalog), SearchConfig::default());
    let response = service.search(&SearchQuery::new("WIDGET")).await.unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(ids(&response.results[0]), vec!["p1", "p2"]);
}
