//! Content Endpoints
//!
//! # Endpoints
//!
//! - `GET /health` - Health check endpoint
//! - `POST /content` - Create a content tree
//! - `GET /content/search?tag=&author=` - Search by tag and/or author
//! - `GET /content/:id` - Get a node (with its subtree) by ID
//! - `PATCH /content/:id` - Replace a node's tags and children
//! - `DELETE /content/:id` - Delete a node and its descendants

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use contentspace_core::ContentDto;
use serde::{Deserialize, Serialize};

use crate::api::validation::validate_content;
use crate::api::{AppState, HttpError};

/// Confirmation text returned by a successful delete
pub const DELETE_CONFIRMATION: &str = "Content and children deleted";

/// Query parameters for search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub tag: Option<String>,
    pub author: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Unwrap a JSON body, running field validation when one was supplied
///
/// A body that does not parse is an unexpected failure, not a validation one.
fn accept_body(
    body: Result<Json<Option<ContentDto>>, JsonRejection>,
) -> Result<Option<ContentDto>, HttpError> {
    let Json(dto) = body.map_err(|rejection| {
        tracing::error!("❌ Unreadable request body: {}", rejection.body_text());
        HttpError::internal(rejection.body_text())
    })?;

    if let Some(dto) = &dto {
        let details = validate_content(dto);
        if !details.is_empty() {
            return Err(HttpError::validation(details));
        }
    }
    Ok(dto)
}

/// Create a content tree
///
/// ```bash
/// curl -X POST http://localhost:8080/content \
///   -H "Content-Type: application/json" \
///   -d '{
///     "title": "Test Article",
///     "body": "This is a test",
///     "author": "Admin",
///     "path": "/content/test-article",
///     "tags": ["news"],
///     "children": [
///       { "title": "Child Section", "body": "...", "author": "Admin", "path": "/content/test-article/child" }
///     ]
///   }'
/// ```
async fn create_content(
    State(state): State<AppState>,
    body: Result<Json<Option<ContentDto>>, JsonRejection>,
) -> Result<(StatusCode, Json<ContentDto>), HttpError> {
    let dto = accept_body(body)?;
    let created = state.service.create_content(dto)?;

    tracing::info!(
        "✅ Created content: {}",
        created.id.as_deref().unwrap_or_default()
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a node by ID
///
/// ```bash
/// curl http://localhost:8080/content/<id>
/// ```
async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentDto>, HttpError> {
    state
        .service
        .get_content(&id)?
        .map(Json)
        .ok_or_else(|| HttpError::not_found(&id))
}

/// Search content by tag and/or author
///
/// An omitted (or empty) `tag` falls back to the configured default tag.
///
/// ```bash
/// curl "http://localhost:8080/content/search?tag=news&author=admin"
/// ```
async fn search_content(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<ContentDto>>, HttpError> {
    let tag = params
        .tag
        .filter(|tag| !tag.is_empty())
        .or_else(|| state.config.search_default_tag.clone());

    let results = state
        .service
        .search_content(tag.as_deref(), params.author.as_deref())?;

    tracing::debug!("🔍 Search tag={:?} returned {} nodes", tag, results.len());
    Ok(Json(results))
}

/// Replace a node's tags and children
///
/// ```bash
/// curl -X PATCH http://localhost:8080/content/<id> \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Test Article", "body": "...", "author": "Admin", "path": "/content/test-article", "tags": ["updated"], "children": []}'
/// ```
async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Option<ContentDto>>, JsonRejection>,
) -> Result<Json<ContentDto>, HttpError> {
    let dto = accept_body(body)?;
    tracing::info!("📝 UPDATE request for content: {}", id);

    match state.service.update_content(&id, dto)? {
        Some(updated) => {
            tracing::info!("✅ Updated content: {}", id);
            Ok(Json(updated))
        }
        None => Err(HttpError::not_found(&id)),
    }
}

/// Delete a node and its descendants
///
/// ```bash
/// curl -X DELETE http://localhost:8080/content/<id>
/// ```
async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str, HttpError> {
    if state.service.delete_content(&id)? {
        tracing::info!("🗑️ Deleted content: {}", id);
        Ok(DELETE_CONFIRMATION)
    } else {
        Err(HttpError::not_found(&id))
    }
}

/// Create router with all content endpoints
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/content", post(create_content))
        .route("/content/search", get(search_content))
        .route(
            "/content/:id",
            get(get_content).patch(update_content).delete(delete_content),
        )
        .with_state(state)
}
