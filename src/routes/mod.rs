// src/routes/mod.rs
pub mod chat;
pub mod memos;
pub mod sessions;
pub mod todos;

use crate::{error::AppError, message::Ping, state::SharedState};
use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/sessions", get(sessions::list_sessions).post(sessions::create_session))
        .route(
            "/sessions/{session_id}/memos",
            get(memos::list_memos).post(memos::create_memo),
        )
        .route(
            "/sessions/{session_id}/memos/{memo_id}",
            patch(memos::update_memo).delete(memos::delete_memo),
        )
        .route(
            "/sessions/{session_id}/todos",
            get(todos::list_todos).post(todos::create_todo),
        )
        .route(
            "/sessions/{session_id}/todos/{todo_id}",
            patch(todos::update_todo).delete(todos::delete_todo),
        )
        .route("/sessions/{session_id}/todos/{todo_id}/toggle", post(todos::toggle_todo))
        .route("/chat", post(chat::chat_handler))
        .route("/api/ping", get(ping))
        .route("/health", get(|| async { "OK" }))
        .route("/", get(|| async { "NotionLike Stock Trading AI backend" }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

async fn ping() -> Json<Ping> {
    Json(Ping { message: "pong".to_string() })
}

/// Trimmed text, or a 400 naming the empty field.
pub(crate) fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
