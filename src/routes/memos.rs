use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::required;
use crate::{
    error::AppError,
    message::{CreateMemo, Memo, UpdateMemo},
    state::SharedState,
};

pub async fn list_memos(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Memo>>, AppError> {
    state
        .sessions
        .list_memos(&session_id)
        .await
        .map(Json)
        .ok_or_else(AppError::session_not_found)
}

pub async fn create_memo(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<CreateMemo>,
) -> Result<(StatusCode, Json<Memo>), AppError> {
    let content = required(&payload.content, "content")?;
    let memo = state
        .sessions
        .create_memo(&session_id, content)
        .await
        .ok_or_else(AppError::session_not_found)?;
    Ok((StatusCode::CREATED, Json(memo)))
}

pub async fn update_memo(
    State(state): State<SharedState>,
    Path((session_id, memo_id)): Path<(String, String)>,
    Json(payload): Json<UpdateMemo>,
) -> Result<Json<Memo>, AppError> {
    let content = required(&payload.content, "content")?;
    state
        .sessions
        .update_memo(&session_id, &memo_id, content)
        .await
        .map_err(|_| AppError::session_not_found())?
        .map(Json)
        .ok_or_else(AppError::memo_not_found)
}

pub async fn delete_memo(
    State(state): State<SharedState>,
    Path((session_id, memo_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .sessions
        .delete_memo(&session_id, &memo_id)
        .await
        .map_err(|_| AppError::session_not_found())?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::memo_not_found())
    }
}
