use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::chatbot::{SessionContext, generate_reply},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.prompt.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Prompt cannot be empty".to_string()));
    }

    let context = match payload.session_id.as_deref() {
        Some(id) if !id.trim().is_empty() => {
            let session = state
                .sessions
                .get_session(id)
                .await
                .ok_or_else(AppError::session_not_found)?;
            let (memo_count, todo_count) = state.sessions.counts(id).await.unwrap_or_default();
            Some(SessionContext { title: session.title, memo_count, todo_count })
        }
        _ => None,
    };

    tracing::debug!(with_session = context.is_some(), "chat prompt");
    Ok(Json(generate_reply(trimmed, context.as_ref())))
}
