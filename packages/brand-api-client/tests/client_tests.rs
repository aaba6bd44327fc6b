//! ApiClient against an in-process axum server.

use std::net::SocketAddr;

use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use brand_api_client::{
    ApiClient, ApiError, BaseApi, HttpMethod, SharedToken, StaticToken, UploadFile,
};
use serde_json::{json, Value};

async fn whoami(headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "authorization": auth }))
}

async fn validation_failure() -> impl IntoResponse {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "message": "Title is required" })),
    )
}

async fn gateway_failure() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
}

async fn echo_patch(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "data": { "id": "p1", "patch": body } }))
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn upload_image(mut multipart: Multipart) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        return (
            StatusCode::CREATED,
            Json(json!({
                "data": {
                    "url": format!("https://cdn.test/{}", file_name),
                    "contentType": content_type,
                    "size": bytes
                }
            })),
        );
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "image field missing" })),
    )
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/whoami", get(whoami))
        .route("/projects", post(validation_failure))
        .route("/projects/p1", patch(echo_patch).delete(no_content))
        .route("/broken", get(gateway_failure))
        .route("/upload/image", post(upload_image));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn base(addr: SocketAddr) -> String {
    format!("http://{}/", addr)
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let addr = spawn_server().await;
    let client = ApiClient::new(base(addr));

    let body = client.request(HttpMethod::Get, "/whoami", None).await.unwrap();
    assert_eq!(body["authorization"], Value::Null);
}

#[tokio::test]
async fn attaches_bearer_token_from_provider() {
    let addr = spawn_server().await;
    let client = ApiClient::new(base(addr)).with_token_provider(StaticToken::new("s3cret"));

    let body = client.request(HttpMethod::Get, "whoami", None).await.unwrap();
    assert_eq!(body["authorization"], "Bearer s3cret");
}

#[tokio::test]
async fn token_changes_are_seen_on_next_request() {
    let addr = spawn_server().await;
    let token = SharedToken::new();
    let client = ApiClient::new(base(addr)).with_token_provider(token.clone());

    let before = client.request(HttpMethod::Get, "/whoami", None).await.unwrap();
    assert_eq!(before["authorization"], Value::Null);

    token.set("after-login");
    let after = client.request(HttpMethod::Get, "/whoami", None).await.unwrap();
    assert_eq!(after["authorization"], "Bearer after-login");
}

#[tokio::test]
async fn surfaces_server_message_on_failure() {
    let addr = spawn_server().await;
    let client = ApiClient::new(base(addr));

    let err = client
        .request(HttpMethod::Post, "/projects", Some(json!({ "title": "" })))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), "Title is required");
}

#[tokio::test]
async fn falls_back_to_generic_message() {
    let addr = spawn_server().await;
    let client = ApiClient::new(base(addr));

    let err = client.request(HttpMethod::Get, "/broken", None).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.message(), "Request failed with status 502");
}

#[tokio::test]
async fn patch_sends_json_and_empty_delete_is_null() {
    let addr = spawn_server().await;
    let client = ApiClient::new(base(addr));

    let body = client
        .request(HttpMethod::Patch, "/projects/p1", Some(json!({ "orderIndex": 3 })))
        .await
        .unwrap();
    assert_eq!(body["data"]["patch"]["orderIndex"], 3);

    let deleted = client.request(HttpMethod::Delete, "/projects/p1", None).await.unwrap();
    assert_eq!(deleted, Value::Null);
}

#[tokio::test]
async fn uploads_multipart_image_field() {
    let addr = spawn_server().await;
    let client = ApiClient::new(base(addr));
    let file = UploadFile::new("avatar.png", "image/png", vec![0x89, b'P', b'N', b'G']);

    let body = client.upload("/upload/image", "image", file).await.unwrap();
    assert_eq!(body["data"]["url"], "https://cdn.test/avatar.png");
    assert_eq!(body["data"]["contentType"], "image/png");
    assert_eq!(body["data"]["size"], 4);
}

#[tokio::test]
async fn connection_failure_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(base(addr));
    let err = client.request(HttpMethod::Get, "/whoami", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
}
