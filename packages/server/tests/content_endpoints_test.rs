//! Integration tests for the content HTTP API
//!
//! Tests drive the axum router in-process with `oneshot`, covering:
//! - Create / get / patch / delete scenarios on a nested tree
//! - Error envelopes for validation, not-found and unreadable bodies
//! - Search defaults and filters

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use contentspace_server::api::DELETE_CONFIRMATION;
use contentspace_server::{create_router, AppState, ServerConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Test helper: router over a fresh store
fn create_test_app() -> Router {
    create_router(AppState::from_config(ServerConfig::default()))
}

fn create_test_app_with(config: ServerConfig) -> Router {
    create_router(AppState::from_config(config))
}

/// Send a request and return status plus raw body text
async fn send_raw(app: &Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body bytes")
        .to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Send a request and parse the body as JSON
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, text) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
    let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, value)
}

fn test_article() -> Value {
    json!({
        "title": "Test Article",
        "body": "This is a test",
        "author": "Admin",
        "path": "/content/test-article",
        "tags": ["news"],
        "children": [
            {
                "title": "Child Section",
                "body": "Child content",
                "author": "Admin",
                "path": "/content/test-article/child"
            }
        ]
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, "POST", "/content", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", created);
    created
}

fn id_of(node: &Value) -> String {
    node["id"].as_str().expect("id").to_string()
}

#[tokio::test]
async fn test_create_returns_tree_with_identities() {
    let app = create_test_app();

    let created = create(&app, test_article()).await;

    let root_id = id_of(&created);
    let child = &created["children"][0];
    let child_id = id_of(child);
    assert!(!root_id.is_empty());
    assert!(!child_id.is_empty());
    assert_ne!(root_id, child_id);
    assert_eq!(created["createdAt"], created["updatedAt"]);
    assert_eq!(child["createdAt"], child["updatedAt"]);
    assert_eq!(created["tags"], json!(["news"]));
    assert_eq!(created["jcrMetadata"]["jcr:primaryType"], "nt:unstructured");
    assert_eq!(created["jcrMetadata"]["jcr:created"], created["createdAt"]);
}

#[tokio::test]
async fn test_get_child_directly_returns_standalone_node() {
    let app = create_test_app();
    let created = create(&app, test_article()).await;
    let child_id = id_of(&created["children"][0]);

    let (status, child) = send(&app, "GET", &format!("/content/{}", child_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(id_of(&child), child_id);
    assert_eq!(child["title"], "Child Section");
    assert_eq!(child["children"], json!([]));
}

#[tokio::test]
async fn test_patch_replaces_tags_and_children() {
    let app = create_test_app();
    let created = create(&app, test_article()).await;
    let root_id = id_of(&created);

    let mut update = test_article();
    update["tags"] = json!(["updated"]);
    update["children"] = json!([]);
    let (status, updated) = send(&app, "PATCH", &format!("/content/{}", root_id), Some(update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["tags"], json!(["updated"]));
    assert_eq!(updated["children"], json!([]));
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["jcrMetadata"]["jcr:lastModified"], updated["updatedAt"]);

    let old_child = id_of(&created["children"][0]);
    let (status, _) = send(&app, "GET", &format!("/content/{}", old_child), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_with_retain_policy_keeps_old_child() {
    let mut config = ServerConfig::default();
    config.store = contentspace_core::StoreConfig::retaining_replaced_children();
    let app = create_test_app_with(config);
    let created = create(&app, test_article()).await;

    let mut update = test_article();
    update["children"] = json!([]);
    send(&app, "PATCH", &format!("/content/{}", id_of(&created)), Some(update)).await;

    let old_child = id_of(&created["children"][0]);
    let (status, _) = send(&app, "GET", &format!("/content/{}", old_child), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_cascades_to_children() {
    let app = create_test_app();
    let created = create(&app, test_article()).await;
    let root_id = id_of(&created);
    let child_id = id_of(&created["children"][0]);

    let (status, text) = send_raw(&app, "DELETE", &format!("/content/{}", root_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, DELETE_CONFIRMATION);

    for id in [&root_id, &child_id] {
        let (status, body) = send(&app, "GET", &format!("/content/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], format!("Content not found with id: {}", id));
    }
}

#[tokio::test]
async fn test_not_found_envelope() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/content/missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["details"], json!(["Content not found with id: missing"]));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_patch_and_delete_unknown_id() {
    let app = create_test_app();

    let (status, _) = send(&app, "PATCH", "/content/missing", Some(test_article())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/content/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_validation_failure_lists_fields() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/content",
        Some(json!({ "title": "", "body": "Body", "tags": ["a","b","c","d","e","f","g","h","i","j","k"] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Failed");
    assert_eq!(body["message"], "Invalid input data");
    assert_eq!(
        body["details"],
        json!([
            "Title is mandatory",
            "Author is mandatory",
            "Maximum 10 tags allowed",
            "Path is mandatory"
        ])
    );
}

#[tokio::test]
async fn test_create_rejects_invalid_child() {
    let app = create_test_app();
    let mut article = test_article();
    article["children"][0]["author"] = json!("  ");

    let (status, body) = send(&app, "POST", "/content", Some(article)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!(["children[0]: Author is mandatory"]));
}

#[tokio::test]
async fn test_create_rejects_child_over_tag_limit_without_path() {
    let app = create_test_app();
    let mut article = test_article();
    let tags: Vec<String> = (0..11).map(|i| format!("tag-{}", i)).collect();
    article["children"][0]["tags"] = json!(tags);
    article["children"][0]["path"] = json!("");

    let (status, body) = send(&app, "POST", "/content", Some(article)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Failed");
    assert_eq!(
        body["details"],
        json!([
            "children[0]: Maximum 10 tags allowed",
            "children[0]: Path is mandatory"
        ])
    );

    let (_, all) = send(&app, "GET", "/content/search?tag=tag-0", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_patch_rejects_invalid_grandchild() {
    let app = create_test_app();
    let created = create(&app, test_article()).await;
    let mut update = test_article();
    update["children"][0]["children"] = json!([{ "title": "Deep", "body": "Body", "author": "Admin" }]);

    let (status, body) = send(&app, "PATCH", &format!("/content/{}", id_of(&created)), Some(update)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!(["children[0].children[0]: Path is mandatory"]));
}

#[tokio::test]
async fn test_null_body_is_validation_failure() {
    let app = create_test_app();

    let (status, body) = send(&app, "POST", "/content", Some(Value::Null)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!(["ContentDTO cannot be null"]));
}

#[tokio::test]
async fn test_patch_validation_failure() {
    let app = create_test_app();
    let created = create(&app, test_article()).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/content/{}", id_of(&created)),
        Some(json!({ "tags": ["updated"] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_malformed_json_is_server_error() {
    let app = create_test_app();

    let (status, text) = send_raw(&app, "POST", "/content", Some("{not json".to_string())).await;
    let body: Value = serde_json::from_str(&text).expect("error envelope");

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server Error");
    assert_eq!(body["message"], "An unexpected error occurred");
    assert_eq!(body["details"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_search_defaults_to_literal_tag() {
    let app = create_test_app();
    let mut tagged = test_article();
    tagged["tags"] = json!(["tag"]);
    tagged["children"] = json!([]);
    create(&app, tagged).await;
    create(&app, test_article()).await;

    let (status, results) = send(&app, "GET", "/content/search", None).await;

    assert_eq!(status, StatusCode::OK);
    let results = results.as_array().expect("array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["tags"], json!(["tag"]));
}

#[tokio::test]
async fn test_search_without_default_tag_matches_all() {
    let config = ServerConfig {
        search_default_tag: None,
        ..Default::default()
    };
    let app = create_test_app_with(config);
    create(&app, test_article()).await;

    let (status, results) = send(&app, "GET", "/content/search", None).await;

    assert_eq!(status, StatusCode::OK);
    // root and its child are both indexed
    assert_eq!(results.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_search_by_tag_and_author() {
    let app = create_test_app();
    create(&app, test_article()).await;
    let mut other = test_article();
    other["author"] = json!("Editor");
    other["tags"] = json!(["sports"]);
    create(&app, other).await;

    let (_, news) = send(&app, "GET", "/content/search?tag=news", None).await;
    assert_eq!(news.as_array().map(Vec::len), Some(1));
    assert_eq!(news[0]["children"].as_array().map(Vec::len), Some(1));

    let (_, by_author) = send(&app, "GET", "/content/search?tag=sports&author=editor", None).await;
    assert_eq!(by_author.as_array().map(Vec::len), Some(1));
    assert_eq!(by_author[0]["author"], "Editor");

    let (status, none) = send(&app, "GET", "/content/search?tag=news&author=editor", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
