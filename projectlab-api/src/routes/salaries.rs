/// Salary CRUD endpoints
///
/// # Endpoints
///
/// - `GET /v1/salaries` - List all salary rows
/// - `POST /v1/salaries` - Create a salary row
/// - `PUT /v1/salaries/:id` - Replace a salary row's fields
/// - `DELETE /v1/salaries/:id` - Delete a salary row

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use projectlab_shared::models::salary::{CreateSalary, Salary, UpdateSalary};
use serde::Deserialize;
use validator::Validate;

/// Create / update request body
#[derive(Debug, Deserialize, Validate)]
pub struct SalaryRequest {
    /// Owning user
    pub user_id: i64,

    /// Amount, non-negative
    #[validate(range(min = 0.0, message = "Amount must be non-negative"))]
    pub amount: f64,
}

/// Lists all salary rows
pub async fn list_salaries(State(state): State<AppState>) -> ApiResult<Json<Vec<Salary>>> {
    let salaries = Salary::list(&state.db).await?;
    Ok(Json(salaries))
}

/// Creates a salary row
///
/// # Errors
///
/// - `422 Unprocessable Entity`: negative amount
/// - `409 Conflict`: user already has a salary, or user id doesn't exist
pub async fn create_salary(
    State(state): State<AppState>,
    Json(req): Json<SalaryRequest>,
) -> ApiResult<Json<Salary>> {
    req.validate()?;

    let salary = Salary::create(
        &state.db,
        CreateSalary {
            user_id: req.user_id,
            amount: req.amount,
        },
    )
    .await?;

    Ok(Json(salary))
}

/// Replaces a salary row's fields (full-row update)
pub async fn update_salary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SalaryRequest>,
) -> ApiResult<Json<Salary>> {
    req.validate()?;

    let salary = Salary::update(
        &state.db,
        id,
        UpdateSalary {
            user_id: req.user_id,
            amount: req.amount,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Salary {} not found", id)))?;

    Ok(Json(salary))
}

/// Deletes a salary row
pub async fn delete_salary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Salary>> {
    let salary = Salary::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Salary {} not found", id)))?;

    Ok(Json(salary))
}
