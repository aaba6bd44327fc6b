mod common;

use brand_api_client::testing::MockApi;
use brand_api_client::{ApiError, HttpMethod};
use brand_resources::drafts::{ProjectDraft, VideoDraft};
use brand_resources::models::{Project, Video};
use brand_resources::{
    FormController, FormState, Resource, ResourceError, ResourceStore, ValidationError,
};
use serde_json::json;

use crate::common::{as_api, ids, project};

#[tokio::test]
async fn successful_create_closes_the_form() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/projects", json!([]))
        .with_response(HttpMethod::Post, "/projects", project("p1", 0, "brand"));
    let store = ResourceStore::<Project>::open(as_api(&mock), Project::definition(), None).await;
    let mut form = FormController::<ProjectDraft>::new();

    form.open_new(ProjectDraft::default());
    form.draft_mut().unwrap().title = "Project p1".into();
    let created = form.submit(&store).await.unwrap();

    assert_eq!(created.id, "p1");
    assert!(form.is_idle());
    assert!(form.alert().is_none());
    assert_eq!(ids(&store.items()), vec!["p1"]);
}

#[tokio::test]
async fn server_rejection_keeps_draft_and_sets_alert() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/projects", json!([project("p1", 0, "brand")]))
        .with_error(
            HttpMethod::Patch,
            "/projects/p1",
            ApiError::Api {
                status: 409,
                message: "Title already taken".into(),
            },
        );
    let store = ResourceStore::<Project>::open(as_api(&mock), Project::definition(), None).await;
    let mut form = FormController::<ProjectDraft>::new();

    let existing = store.find("p1").unwrap();
    form.open_edit(&existing);
    form.draft_mut().unwrap().title = "Duplicate".into();
    let err = form.submit(&store).await.unwrap_err();

    assert!(matches!(err, ResourceError::Api(_)));
    assert_eq!(form.alert(), Some("Title already taken"));
    match form.state() {
        FormState::Editing { draft, target } => {
            assert_eq!(draft.title, "Duplicate");
            assert_eq!(target.as_deref(), Some("p1"));
        }
        other => panic!("expected Editing, got {:?}", other),
    }
    assert_eq!(store.find("p1").unwrap(), existing);
}

#[tokio::test]
async fn validation_failure_sends_nothing() {
    let mock = MockApi::new().with_response(HttpMethod::Get, "/projects", json!([]));
    let store = ResourceStore::<Project>::open(as_api(&mock), Project::definition(), None).await;
    let mut form = FormController::<ProjectDraft>::new();
    let calls = mock.call_count();

    form.open_new(ProjectDraft::default());
    let err = form.submit(&store).await.unwrap_err();

    assert!(err.is_validation());
    assert!(form.alert().is_some());
    assert!(form.draft().is_some());
    assert_eq!(mock.call_count(), calls);
}

#[tokio::test]
async fn video_links_are_sent_as_embed_urls() {
    let mock = MockApi::new().with_response(
        HttpMethod::Post,
        "/videos",
        json!({ "id": "v1", "influencerId": "p1", "url": "https://www.youtube.com/embed/dQw4w9WgXcQ" }),
    );
    let store = ResourceStore::<Video>::new(as_api(&mock), Video::definition());
    let mut form = FormController::<VideoDraft>::new();

    form.open_new(VideoDraft {
        influencer_id: "p1".into(),
        url: "https://youtu.be/dQw4w9WgXcQ".into(),
        ..Default::default()
    });
    form.submit(&store).await.unwrap();

    let sent = &mock.calls_to(HttpMethod::Post, "/videos")[0];
    assert_eq!(
        sent.body.as_ref().unwrap()["url"],
        "https://www.youtube.com/embed/dQw4w9WgXcQ"
    );
}

#[tokio::test]
async fn submit_outside_editing_is_rejected() {
    let store = ResourceStore::<Project>::new(as_api(&MockApi::new()), Project::definition());
    let mut form = FormController::<ProjectDraft>::new();

    let err = form.submit(&store).await.unwrap_err();

    assert!(matches!(
        err,
        ResourceError::Validation(ValidationError::NothingToSubmit)
    ));
    assert!(form.is_idle());
}

#[tokio::test]
async fn confirmed_delete_uses_resource_policy() {
    let mock = MockApi::new()
        .with_response(HttpMethod::Get, "/projects", json!([project("p1", 0, "brand")]))
        .with_response(
            HttpMethod::Patch,
            "/projects/p1",
            json!({ "id": "p1", "title": "Project p1", "type": "brand", "orderIndex": 0, "isActive": false }),
        );
    let store = ResourceStore::<Project>::open(as_api(&mock), Project::definition(), None).await;
    let mut form = FormController::<ProjectDraft>::new();

    form.request_delete("p1");
    assert!(matches!(form.state(), FormState::ConfirmingDelete { .. }));
    form.confirm_delete(&store).await.unwrap();

    assert!(form.is_idle());
    assert!(mock.calls_to(HttpMethod::Delete, "/projects/p1").is_empty());
    assert!(store.active_sorted().is_empty());
    assert_eq!(store.items().len(), 1);
}

#[tokio::test]
async fn cancelled_delete_sends_nothing() {
    let mock = MockApi::new().with_response(HttpMethod::Get, "/projects", json!([]));
    let store = ResourceStore::<Project>::open(as_api(&mock), Project::definition(), None).await;
    let mut form = FormController::<ProjectDraft>::new();
    let calls = mock.call_count();

    form.request_delete("p1");
    form.cancel();

    assert!(form.confirm_delete(&store).await.is_err());
    assert_eq!(mock.call_count(), calls);
}
