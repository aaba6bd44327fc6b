mod common;

use brand_api_client::testing::MockApi;
use brand_api_client::HttpMethod;
use brand_resources::models::{Metric, Project};
use brand_resources::StoreRegistry;
use serde_json::json;

use crate::common::{as_api, ids, project};

#[tokio::test]
async fn consumers_share_a_live_store() {
    let mock = MockApi::new().with_response(
        HttpMethod::Get,
        "/projects",
        json!([project("p1", 0, "brand")]),
    );
    let registry = StoreRegistry::new(as_api(&mock));

    let first = registry.store_for::<Project>(None).await;
    let second = registry.store_for::<Project>(None).await;

    assert!(first.same_store(&second));
    assert_eq!(mock.calls_to(HttpMethod::Get, "/projects").len(), 1);
    assert_eq!(registry.live_count(), 1);
}

#[tokio::test]
async fn different_filters_get_different_stores() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/projects", json!([project("p1", 0, "brand")]))
        .with_response(HttpMethod::Get, "/projects", json!([project("p1", 0, "brand")]));
    let registry = StoreRegistry::new(as_api(&mock));

    let all = registry.store_for::<Project>(None).await;
    let events = registry.store_for::<Project>(Some("event")).await;

    assert!(!all.same_store(&events));
    assert_eq!(ids(&all.items()), vec!["p1"]);
    assert!(events.items().is_empty());
    assert_eq!(registry.live_count(), 2);
}

#[tokio::test]
async fn dropped_store_is_rebuilt_and_refetched() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/metrics", json!([]))
        .with_response(
            HttpMethod::Get,
            "/metrics",
            json!([{ "id": "m1", "label": "Followers", "value": "10k" }]),
        );
    let registry = StoreRegistry::new(as_api(&mock));

    let store = registry.store_for::<Metric>(None).await;
    assert!(store.items().is_empty());
    drop(store);
    assert_eq!(registry.live_count(), 0);

    let store = registry.store_for::<Metric>(None).await;
    assert_eq!(ids(&store.items()), vec!["m1"]);
    assert_eq!(mock.calls_to(HttpMethod::Get, "/metrics").len(), 2);
}

#[tokio::test]
async fn handles_keep_the_filter_they_were_keyed_by() {
    let mock = MockApi::new()
        .with_response(
            HttpMethod::Get,
            "/projects",
            json!([project("p1", 0, "brand"), project("p2", 1, "event")]),
        )
        .with_response(
            HttpMethod::Get,
            "/projects",
            json!([project("p1", 0, "brand"), project("p2", 1, "event")]),
        );
    let registry = StoreRegistry::new(as_api(&mock));

    let first = registry.store_for::<Project>(Some("brand")).await;
    first.refresh().await.unwrap();
    let second = registry.store_for::<Project>(Some("brand")).await;

    assert!(first.same_store(&second));
    assert_eq!(second.filter().as_deref(), Some("brand"));
    assert_eq!(ids(&second.items()), vec!["p1"]);
}

#[tokio::test]
async fn one_consumer_dropping_out_leaves_the_store_open_for_others() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/projects", json!([]))
        .with_response(HttpMethod::Post, "/projects", project("p1", 0, "brand"));
    let registry = StoreRegistry::new(as_api(&mock));

    let first = registry.store_for::<Project>(None).await;
    let second = registry.store_for::<Project>(None).await;
    drop(first);

    let created = second.create(&json!({ "title": "p1" })).await.unwrap();
    assert_eq!(created.id, "p1");
    assert_eq!(ids(&second.items()), vec!["p1"]);
    assert_eq!(registry.live_count(), 1);
}
