use axum::{Json, extract::State, http::StatusCode};

use super::required;
use crate::{
    error::AppError,
    message::{CreateSession, Session},
    state::SharedState,
};

pub async fn list_sessions(State(state): State<SharedState>) -> Json<Vec<Session>> {
    Json(state.sessions.list_sessions().await)
}

pub async fn create_session(
    State(state): State<SharedState>,
    Json(payload): Json<CreateSession>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let title = required(&payload.title, "title")?;
    let session = state.sessions.create_session(title).await;
    tracing::info!(session_id = %session.id, "session created");
    Ok((StatusCode::CREATED, Json(session)))
}
