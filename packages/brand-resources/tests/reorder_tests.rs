mod common;

use brand_api_client::testing::MockApi;
use brand_api_client::{ApiError, HttpMethod};
use brand_resources::models::TextSlide;
use brand_resources::{move_item, Direction, Resource, ResourceError, ResourceStore};
use serde_json::json;

use crate::common::{as_api, ids, slide};

async fn slides(mock: &MockApi) -> ResourceStore<TextSlide> {
    ResourceStore::open(as_api(mock), TextSlide::definition(), None).await
}

#[tokio::test]
async fn moving_up_swaps_order_with_previous_item() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/text-slides", json!([slide("A", 0), slide("B", 1)]))
        .with_response(HttpMethod::Patch, "/text-slides/B", slide("B", 0))
        .with_response(HttpMethod::Patch, "/text-slides/A", slide("A", 1));
    let store = slides(&mock).await;

    let plan = move_item(&store, "B", Direction::Up).await.unwrap().unwrap();
    assert_eq!(plan.moved_id, "B");
    assert_eq!(plan.neighbor_id, "A");

    let patches: Vec<_> = mock
        .calls()
        .into_iter()
        .filter(|c| c.method == HttpMethod::Patch)
        .collect();
    assert_eq!(patches.len(), 2);
    assert_eq!(patches[0].path, "/text-slides/B");
    assert_eq!(patches[0].body, Some(json!({ "orderIndex": 0 })));
    assert_eq!(patches[1].path, "/text-slides/A");
    assert_eq!(patches[1].body, Some(json!({ "orderIndex": 1 })));

    assert_eq!(ids(&store.sorted_by_order()), vec!["B", "A"]);
}

#[tokio::test]
async fn moving_down_swaps_order_with_next_item() {
    let mock = MockApi::new()
        .with_response(
            HttpMethod::Get,
            "/text-slides",
            json!([slide("A", 0), slide("B", 1), slide("C", 2)]),
        )
        .with_response(HttpMethod::Patch, "/text-slides/B", slide("B", 2))
        .with_response(HttpMethod::Patch, "/text-slides/C", slide("C", 1));
    let store = slides(&mock).await;

    move_item(&store, "B", Direction::Down).await.unwrap();

    assert_eq!(ids(&store.sorted_by_order()), vec!["A", "C", "B"]);
}

#[tokio::test]
async fn boundary_moves_send_nothing() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/text-slides", json!([slide("A", 0), slide("B", 1)]));
    let store = slides(&mock).await;
    let calls = mock.call_count();

    assert_eq!(move_item(&store, "A", Direction::Up).await.unwrap(), None);
    assert_eq!(move_item(&store, "B", Direction::Down).await.unwrap(), None);

    assert_eq!(mock.call_count(), calls);
    assert_eq!(ids(&store.sorted_by_order()), vec!["A", "B"]);
}

#[tokio::test]
async fn inactive_items_are_skipped_when_picking_a_neighbor() {
    let mock = MockApi::new()
        .with_response(
            HttpMethod::Get,
            "/text-slides",
            json!([
                slide("A", 0),
                { "id": "X", "title": "Hidden", "orderIndex": 1, "isActive": false },
                slide("B", 2)
            ]),
        )
        .with_response(HttpMethod::Patch, "/text-slides/B", slide("B", 0))
        .with_response(HttpMethod::Patch, "/text-slides/A", slide("A", 2));
    let store = slides(&mock).await;

    let plan = move_item(&store, "B", Direction::Up).await.unwrap().unwrap();

    assert_eq!(plan.neighbor_id, "A");
    assert!(mock.calls_to(HttpMethod::Patch, "/text-slides/X").is_empty());
    assert_eq!(ids(&store.active_sorted()), vec!["B", "A"]);
}

#[tokio::test]
async fn unknown_item_is_not_found() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/text-slides", json!([slide("A", 0)]));
    let store = slides(&mock).await;

    let err = move_item(&store, "missing", Direction::Up).await.unwrap_err();
    assert!(matches!(err, ResourceError::NotFound { .. }));
}

#[tokio::test]
async fn failed_second_patch_reports_partial_swap() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/text-slides", json!([slide("A", 0), slide("B", 1)]))
        .with_response(HttpMethod::Patch, "/text-slides/B", slide("B", 0))
        .with_error(
            HttpMethod::Patch,
            "/text-slides/A",
            ApiError::Api {
                status: 500,
                message: "Write conflict".into(),
            },
        );
    let store = slides(&mock).await;

    let err = move_item(&store, "B", Direction::Up).await.unwrap_err();

    match &err {
        ResourceError::PartialSwap {
            moved_id,
            neighbor_id,
            ..
        } => {
            assert_eq!(moved_id, "B");
            assert_eq!(neighbor_id, "A");
        }
        other => panic!("expected PartialSwap, got {:?}", other),
    }

    // First write stays applied; both now claim index 0.
    let b = store.find("B").unwrap();
    let a = store.find("A").unwrap();
    assert_eq!(b.order_index, 0);
    assert_eq!(a.order_index, 0);
}

#[tokio::test]
async fn failed_first_patch_changes_nothing() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/text-slides", json!([slide("A", 0), slide("B", 1)]))
        .with_error(HttpMethod::Patch, "/text-slides/B", ApiError::Network("reset".into()));
    let store = slides(&mock).await;

    let err = move_item(&store, "B", Direction::Up).await.unwrap_err();

    assert!(matches!(err, ResourceError::Api(_)));
    assert!(mock.calls_to(HttpMethod::Patch, "/text-slides/A").is_empty());
    assert_eq!(ids(&store.sorted_by_order()), vec!["A", "B"]);
}
