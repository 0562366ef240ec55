/// User CRUD endpoints
///
/// # Endpoints
///
/// - `GET /v1/users` - List all users
/// - `POST /v1/users` - Create a user
/// - `PUT /v1/users/:id` - Replace a user's fields
/// - `DELETE /v1/users/:id` - Delete a user (cascades per schema)
///
/// Create and update share the same validation rules: username 3-20
/// characters, well-formed email, password 8-20 characters. Validation
/// failures are rejected before any store access.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use projectlab_shared::models::user::{CreateUser, UpdateUser, User};
use serde::Deserialize;
use validator::Validate;

/// Create / update request body
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    /// Display name
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, max = 20, message = "Password must be 8-20 characters"))]
    pub password: String,
}

/// Lists all users
///
/// # Endpoint
///
/// ```text
/// GET /v1/users
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// Creates a user
///
/// # Endpoint
///
/// ```text
/// POST /v1/users
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "hunter2hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: email already exists
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password: req.password,
        },
    )
    .await?;

    Ok(Json(user))
}

/// Replaces a user's fields (full-row update)
///
/// # Errors
///
/// - `404 Not Found`: no user with the given id
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: email already taken by another user
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UserRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            username: req.username,
            email: req.email,
            password: req.password,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user))
}

/// Deletes a user
///
/// The schema cascades: the user's salary, memberships, owned projects
/// (with their iterations and tasks) and created tasks are removed;
/// tasks executed by the user get `executor_id` nulled.
///
/// # Errors
///
/// - `404 Not Found`: no user with the given id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = User::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user))
}
