use crate::state::AppState;
use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tandem_core::RoomId;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub fn chat_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/rooms/{room_id}/messages",
        get(list_messages).post(post_message),
    )
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn post_message(
    Path(room_id): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewChatMessage>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("Rejected chat message body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, "body must be a JSON object");
        }
    };
    if body.sender_id.is_empty() || body.text.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "senderId and text required");
    }

    match state
        .chat
        .append(RoomId::from(room_id), body.sender_id.into(), body.text)
        .await
    {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(e) => {
            error!("Failed to write chat message: {:?}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to write message")
        }
    }
}

pub async fn list_messages(
    Path(room_id): Path<String>,
    Query(query): Query<HistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let limit = query.limit.unwrap_or(state.config.history_limit);

    match state.chat.history(&RoomId::from(room_id), limit).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => {
            error!("Failed to load chat history: {:?}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to load messages")
        }
    }
}
