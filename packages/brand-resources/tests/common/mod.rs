//! Shared fixtures for resource store tests.

#![allow(dead_code)]

use std::sync::Arc;

use brand_api_client::testing::MockApi;
use brand_api_client::BaseApi;
use serde_json::{json, Value};

pub fn as_api(mock: &MockApi) -> Arc<dyn BaseApi> {
    Arc::new(mock.clone())
}

pub fn project(id: &str, order_index: i64, kind: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Project {}", id),
        "type": kind,
        "orderIndex": order_index,
        "isActive": true
    })
}

pub fn slide(id: &str, order_index: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Slide {}", id),
        "orderIndex": order_index,
        "isActive": true
    })
}

pub fn ids<T: brand_resources::ResourceItem>(items: &[T]) -> Vec<String> {
    items.iter().map(|i| i.id().to_string()).collect()
}
