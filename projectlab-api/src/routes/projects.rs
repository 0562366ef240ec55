/// Project CRUD endpoints
///
/// # Endpoints
///
/// - `GET /v1/projects` - List all projects
/// - `POST /v1/projects` - Create a project
/// - `PUT /v1/projects/:id` - Replace a project's fields
/// - `DELETE /v1/projects/:id` - Delete a project (iterations/tasks cascade)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use projectlab_shared::models::project::{CreateProject, Project, UpdateProject};
use serde::Deserialize;

/// Create / update request body
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    pub name: String,
    pub description: String,
    pub join_code: String,
    pub owner_id: i64,
}

/// Lists all projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list(&state.db).await?;
    Ok(Json(projects))
}

/// Creates a project
///
/// # Errors
///
/// - `409 Conflict`: owner id doesn't exist
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<Json<Project>> {
    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            join_code: req.join_code,
            owner_id: req.owner_id,
        },
    )
    .await?;

    Ok(Json(project))
}

/// Replaces a project's fields (full-row update)
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<Json<Project>> {
    let project = Project::update(
        &state.db,
        id,
        UpdateProject {
            name: req.name,
            description: req.description,
            join_code: req.join_code,
            owner_id: req.owner_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", id)))?;

    Ok(Json(project))
}

/// Deletes a project
///
/// Iterations, their tasks, and membership rows cascade.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    let project = Project::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", id)))?;

    Ok(Json(project))
}
