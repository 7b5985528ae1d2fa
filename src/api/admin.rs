use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde_json::{Map, Value, json};

use super::{ApiError, JsonOrForm};
use crate::{
    management::{PostError, collect_stats},
    server::AppState,
    types::{Post, Stats},
};

/// `GET /api/posts` never fails; an unreadable store lists as empty.
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    match state.posts.list().await {
        Ok(posts) => Json(posts),
        Err(e) => {
            tracing::warn!(error = %e, "cannot read posts, serving empty list");
            Json(Vec::new())
        }
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    body: Result<JsonOrForm<Map<String, Value>>, Response>,
) -> Result<Json<Value>, ApiError> {
    let fields = body.map(|JsonOrForm(fields)| fields).unwrap_or_default();

    match state.posts.add(fields).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "post saved");
            Ok(Json(json!({
                "success": true,
                "message": "Post saved successfully!",
            })))
        }
        Err(e) => {
            tracing::error!(error = %e, "saving post failed");
            Err(ApiError::internal("Failed to save post"))
        }
    }
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.posts.delete(&id).await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "message": "Post deleted successfully!",
        }))),
        Err(PostError::NoPosts) => Err(ApiError::not_found("No posts found")),
        Err(PostError::Store(e)) => {
            tracing::error!(error = %e, post_id = %id, "deleting post failed");
            Err(ApiError::internal("Failed to delete post"))
        }
    }
}

pub async fn stats(State(state): State<AppState>) -> Json<Stats> {
    Json(collect_stats(&state.posts, &state.visits, &state.pairing).await)
}

pub async fn track_visit(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.visits.track().await {
        Ok(count) => Ok(Json(json!({ "success": true, "count": count }))),
        Err(e) => {
            tracing::error!(error = %e, "tracking visit failed");
            Err(ApiError::internal("Failed to track visit"))
        }
    }
}
