use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::required;
use crate::{
    error::AppError,
    message::{CreateTodo, Todo, UpdateTodo},
    state::SharedState,
};

pub async fn list_todos(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Todo>>, AppError> {
    state
        .sessions
        .list_todos(&session_id)
        .await
        .map(Json)
        .ok_or_else(AppError::session_not_found)
}

pub async fn create_todo(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let title = required(&payload.title, "title")?;
    let todo = state
        .sessions
        .create_todo(&session_id, title)
        .await
        .ok_or_else(AppError::session_not_found)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(state): State<SharedState>,
    Path((session_id, todo_id)): Path<(String, String)>,
    Json(payload): Json<UpdateTodo>,
) -> Result<Json<Todo>, AppError> {
    let title = required(&payload.title, "title")?;
    state
        .sessions
        .update_todo(&session_id, &todo_id, title, payload.done)
        .await
        .map_err(|_| AppError::session_not_found())?
        .map(Json)
        .ok_or_else(AppError::todo_not_found)
}

pub async fn toggle_todo(
    State(state): State<SharedState>,
    Path((session_id, todo_id)): Path<(String, String)>,
) -> Result<Json<Todo>, AppError> {
    state
        .sessions
        .toggle_todo(&session_id, &todo_id)
        .await
        .map_err(|_| AppError::session_not_found())?
        .map(Json)
        .ok_or_else(AppError::todo_not_found)
}

pub async fn delete_todo(
    State(state): State<SharedState>,
    Path((session_id, todo_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .sessions
        .delete_todo(&session_id, &todo_id)
        .await
        .map_err(|_| AppError::session_not_found())?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::todo_not_found())
    }
}
