/// ProjectMember CRUD endpoints
///
/// # Endpoints
///
/// - `GET /v1/project-members` - List all membership rows
/// - `POST /v1/project-members` - Create a membership row
/// - `PUT /v1/project-members/:id` - Replace a membership row's fields
/// - `DELETE /v1/project-members/:id` - Delete a membership row

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use projectlab_shared::models::project_member::{
    CreateProjectMember, ProjectMember, UpdateProjectMember,
};
use serde::Deserialize;

/// Create / update request body
#[derive(Debug, Deserialize)]
pub struct ProjectMemberRequest {
    pub user_id: i64,
    pub project_id: i64,
}

/// Lists all membership rows
pub async fn list_project_members(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProjectMember>>> {
    let members = ProjectMember::list(&state.db).await?;
    Ok(Json(members))
}

/// Creates a membership row
///
/// # Errors
///
/// - `409 Conflict`: user or project id doesn't exist
pub async fn create_project_member(
    State(state): State<AppState>,
    Json(req): Json<ProjectMemberRequest>,
) -> ApiResult<Json<ProjectMember>> {
    let member = ProjectMember::create(
        &state.db,
        CreateProjectMember {
            user_id: req.user_id,
            project_id: req.project_id,
        },
    )
    .await?;

    Ok(Json(member))
}

/// Replaces a membership row's fields (full-row update)
pub async fn update_project_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ProjectMemberRequest>,
) -> ApiResult<Json<ProjectMember>> {
    let member = ProjectMember::update(
        &state.db,
        id,
        UpdateProjectMember {
            user_id: req.user_id,
            project_id: req.project_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Project member {} not found", id)))?;

    Ok(Json(member))
}

/// Deletes a membership row
pub async fn delete_project_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProjectMember>> {
    let member = ProjectMember::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project member {} not found", id)))?;

    Ok(Json(member))
}
