//! Article endpoint handlers
//!
//! Database work runs on the blocking pool with a connection opened for
//! that request alone: read-only for reads, read-write for writes.

use std::path::Path;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use autoblog_core::{Article, ArticleStore, NewArticle, StoreError, StoreResult};

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned after a successful write
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

/// `POST /articles` - validate and store an article
pub async fn create_article(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let article = NewArticle::from_json(&body)?;
    let title = article.title.clone();

    let id = tokio::task::spawn_blocking(move || -> StoreResult<Uuid> {
        ArticleStore::open(state.config())?.create(&article)
    })
    .await??;

    info!(%id, title = %title, "article received");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            message: "Article received and stored".to_string(),
            id,
        }),
    ))
}

/// `GET /articles` - the latest article, or `null` when there is none
pub async fn latest_article(
    State(state): State<AppState>,
) -> Result<Json<Option<Article>>, ApiError> {
    let path = state.db_path();
    let latest = tokio::task::spawn_blocking(move || read_latest(&path)).await??;
    Ok(Json(latest))
}

fn read_latest(path: &Path) -> StoreResult<Option<Article>> {
    match ArticleStore::open_read_only(path) {
        Ok(store) => store.latest(),
        // Nothing has ever been written
        Err(StoreError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Any other method on `/articles`
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
