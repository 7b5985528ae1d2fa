use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::{ApiError, JsonOrForm};
use crate::{
    server::AppState,
    types::{AiRequest, ImageRequest, SongQuery, TiktokQuery},
    upstream::UpstreamError,
};

fn relay_json(
    result: Result<Value, UpstreamError>,
    service: &str,
    failure: ApiError,
) -> Result<Json<Value>, ApiError> {
    result.map(Json).map_err(|e| {
        tracing::warn!(error = %e, service, "upstream call failed");
        failure
    })
}

fn relay_png(
    result: Result<Bytes, UpstreamError>,
    service: &str,
    failure: ApiError,
) -> Result<Response, ApiError> {
    match result {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response()),
        Err(e) => {
            tracing::warn!(error = %e, service, "upstream call failed");
            Err(failure)
        }
    }
}

pub async fn ai(
    State(state): State<AppState>,
    body: Result<JsonOrForm<AiRequest>, Response>,
) -> Result<Json<Value>, ApiError> {
    let message = body.ok().and_then(|JsonOrForm(req)| req.message).unwrap_or_default();
    relay_json(
        state.upstream.ask_ai(&message).await,
        "ai",
        ApiError::internal("AI service unavailable"),
    )
}

pub async fn song(
    State(state): State<AppState>,
    Query(params): Query<SongQuery>,
) -> Result<Json<Value>, ApiError> {
    let query = params.query.unwrap_or_default();
    relay_json(
        state.upstream.find_song(&query).await,
        "song",
        ApiError::internal("Song service unavailable"),
    )
}

pub async fn image(
    State(state): State<AppState>,
    body: Result<JsonOrForm<ImageRequest>, Response>,
) -> Result<Response, ApiError> {
    let prompt = body.ok().and_then(|JsonOrForm(req)| req.prompt).unwrap_or_default();
    relay_png(
        state.upstream.imagine(&prompt).await,
        "image",
        ApiError::internal("Image generation failed"),
    )
}

pub async fn tiktok(
    State(state): State<AppState>,
    Query(params): Query<TiktokQuery>,
) -> Result<Json<Value>, ApiError> {
    let username = params.username.unwrap_or_default();
    relay_json(
        state.upstream.tiktok_profile(&username).await,
        "tiktok",
        ApiError::internal("TikTok service unavailable"),
    )
}

pub async fn pies(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Response, ApiError> {
    relay_png(
        state.upstream.pies(&category).await,
        "pies",
        ApiError::internal("Pies service unavailable"),
    )
}
