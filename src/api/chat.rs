use axum::{Json, extract::State, response::Response};
use serde_json::{Value, json};

use super::JsonOrForm;
use crate::{
    server::AppState,
    types::{ChatMessage, ChatRequest},
};

pub async fn chat_history(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.chat.recent().await)
}

pub async fn post_chat(
    State(state): State<AppState>,
    body: Result<JsonOrForm<ChatRequest>, Response>,
) -> Json<Value> {
    let (user, message) = match body {
        Ok(JsonOrForm(req)) => (req.user, req.message.unwrap_or_default()),
        Err(_) => (None, String::new()),
    };

    let entry = state.chat.post(user.as_deref(), &message).await;
    Json(json!({ "success": true, "message": entry }))
}
