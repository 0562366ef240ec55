/// Task CRUD endpoints
///
/// # Endpoints
///
/// - `GET /v1/tasks` - List all tasks
/// - `POST /v1/tasks` - Create a task
/// - `PUT /v1/tasks/:id` - Replace a task's fields
/// - `DELETE /v1/tasks/:id` - Delete a task
///
/// `status` is a free-form string; no enumeration is enforced.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use projectlab_shared::models::task::{CreateTask, Task, UpdateTask};
use serde::Deserialize;

/// Create / update request body
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub iteration_id: i64,
    pub points: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub creator_id: i64,
    pub executor_id: Option<i64>,
}

/// Lists all tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list(&state.db).await?;
    Ok(Json(tasks))
}

/// Creates a task
///
/// # Errors
///
/// - `409 Conflict`: iteration, creator, or executor id doesn't exist
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = Task::create(
        &state.db,
        CreateTask {
            iteration_id: req.iteration_id,
            points: req.points,
            title: req.title,
            description: req.description,
            status: req.status,
            creator_id: req.creator_id,
            executor_id: req.executor_id,
        },
    )
    .await?;

    Ok(Json(task))
}

/// Replaces a task's fields (full-row update)
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            iteration_id: req.iteration_id,
            points: req.points,
            title: req.title,
            description: req.description,
            status: req.status,
            creator_id: req.creator_id,
            executor_id: req.executor_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;

    Ok(Json(task))
}

/// Deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;

    Ok(Json(task))
}
