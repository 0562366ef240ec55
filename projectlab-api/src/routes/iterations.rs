/// Iteration CRUD endpoints
///
/// # Endpoints
///
/// - `GET /v1/iterations` - List all iterations
/// - `POST /v1/iterations` - Create an iteration
/// - `PUT /v1/iterations/:id` - Replace an iteration's fields
/// - `DELETE /v1/iterations/:id` - Delete an iteration (tasks cascade)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use projectlab_shared::models::iteration::{CreateIteration, Iteration, UpdateIteration};
use serde::Deserialize;

/// Create / update request body
#[derive(Debug, Deserialize)]
pub struct IterationRequest {
    pub name: String,
    pub description: String,
    pub project_id: i64,
}

/// Lists all iterations
pub async fn list_iterations(State(state): State<AppState>) -> ApiResult<Json<Vec<Iteration>>> {
    let iterations = Iteration::list(&state.db).await?;
    Ok(Json(iterations))
}

/// Creates an iteration
///
/// # Errors
///
/// - `409 Conflict`: project id doesn't exist
pub async fn create_iteration(
    State(state): State<AppState>,
    Json(req): Json<IterationRequest>,
) -> ApiResult<Json<Iteration>> {
    let iteration = Iteration::create(
        &state.db,
        CreateIteration {
            name: req.name,
            description: req.description,
            project_id: req.project_id,
        },
    )
    .await?;

    Ok(Json(iteration))
}

/// Replaces an iteration's fields (full-row update)
pub async fn update_iteration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<IterationRequest>,
) -> ApiResult<Json<Iteration>> {
    let iteration = Iteration::update(
        &state.db,
        id,
        UpdateIteration {
            name: req.name,
            description: req.description,
            project_id: req.project_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Iteration {} not found", id)))?;

    Ok(Json(iteration))
}

/// Deletes an iteration
///
/// The iteration's tasks cascade.
pub async fn delete_iteration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Iteration>> {
    let iteration = Iteration::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Iteration {} not found", id)))?;

    Ok(Json(iteration))
}
