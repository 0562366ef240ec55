/// Read-only query endpoints
///
/// The query layer exposed under `/v1/queries/*`: five single-hop point
/// lookups and nine multi-hop composite queries, all GET with
/// query-string input. Handlers validate input, delegate to
/// `projectlab_shared::queries`, and return full entity rows.
///
/// Operations resolving a reference entity by unique key (project id for
/// the owner lookup, email, username, iteration name) answer 404 when
/// the reference doesn't resolve; listing queries keyed by id answer an
/// empty collection instead.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Json,
};
use projectlab_shared::{
    models::{project::Project, salary::Salary, task::Task, user::User},
    queries::{composite, lookups},
};
use serde::Deserialize;
use validator::Validate;

/// Input carrying one project id
#[derive(Debug, Deserialize)]
pub struct ProjectIdParams {
    pub project_id: i64,
}

/// Input carrying one user id
#[derive(Debug, Deserialize)]
pub struct UserIdParams {
    pub user_id: i64,
}

/// Input for the salary/status query
#[derive(Debug, Deserialize)]
pub struct SalaryAndStatusParams {
    /// Exclusive lower bound on salary.amount
    pub salary: f64,

    /// Task status to require (defaults to "DONE")
    #[serde(default = "default_done_status")]
    pub status: String,
}

fn default_done_status() -> String {
    "DONE".to_string()
}

/// Input for the iteration-count query
#[derive(Debug, Deserialize)]
pub struct MinIterationsParams {
    /// Exclusive lower bound on the project's iteration count
    pub min_iterations: i64,
}

/// Input for the two-status query
#[derive(Debug, Deserialize)]
pub struct TwoStatusesParams {
    pub first_status: String,
    pub second_status: String,
}

/// Input for the member-count/points query
#[derive(Debug, Deserialize)]
pub struct UsersAndPointsParams {
    /// Exact membership-row count to match
    pub users_count: i64,

    /// Exclusive lower bound on task points
    pub points_threshold: i32,
}

/// Input carrying one email address
#[derive(Debug, Deserialize, Validate)]
pub struct EmailParams {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Input carrying one username
#[derive(Debug, Deserialize, Validate)]
pub struct UsernameParams {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
}

/// Input carrying one iteration name
#[derive(Debug, Deserialize, Validate)]
pub struct IterationNameParams {
    #[validate(length(min = 1, message = "Iteration name must not be empty"))]
    pub iteration_name: String,
}

/// Tasks whose iteration belongs to the project
///
/// ```text
/// GET /v1/queries/tasks-by-project?project_id=1
/// ```
pub async fn tasks_by_project(
    State(state): State<AppState>,
    Query(params): Query<ProjectIdParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = lookups::tasks_by_project(&state.db, params.project_id).await?;
    Ok(Json(tasks))
}

/// Users with a membership row for the project
///
/// ```text
/// GET /v1/queries/users-by-project?project_id=1
/// ```
pub async fn users_by_project(
    State(state): State<AppState>,
    Query(params): Query<ProjectIdParams>,
) -> ApiResult<Json<Vec<User>>> {
    let users = lookups::users_by_project(&state.db, params.project_id).await?;
    Ok(Json(users))
}

/// Salary rows for the user (0 or 1)
///
/// ```text
/// GET /v1/queries/salaries-by-user?user_id=1
/// ```
pub async fn salaries_by_user(
    State(state): State<AppState>,
    Query(params): Query<UserIdParams>,
) -> ApiResult<Json<Vec<Salary>>> {
    let salaries = lookups::salaries_by_user(&state.db, params.user_id).await?;
    Ok(Json(salaries))
}

/// Tasks where the user is the executor
///
/// ```text
/// GET /v1/queries/tasks-by-user?user_id=1
/// ```
pub async fn tasks_by_user(
    State(state): State<AppState>,
    Query(params): Query<UserIdParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = lookups::tasks_by_user(&state.db, params.user_id).await?;
    Ok(Json(tasks))
}

/// The user owning the project
///
/// ```text
/// GET /v1/queries/owner-by-project?project_id=1
/// ```
///
/// # Errors
///
/// - `404 Not Found`: unknown project id (or a dangling owner reference)
pub async fn owner_by_project(
    State(state): State<AppState>,
    Query(params): Query<ProjectIdParams>,
) -> ApiResult<Json<User>> {
    let owner = lookups::owner_by_project(&state.db, params.project_id).await?;
    Ok(Json(owner))
}

/// Users above a salary with at least one task of the given status
///
/// ```text
/// GET /v1/queries/users-by-salary-and-task-status?salary=50&status=DONE
/// ```
pub async fn users_by_salary_and_task_status(
    State(state): State<AppState>,
    Query(params): Query<SalaryAndStatusParams>,
) -> ApiResult<Json<Vec<User>>> {
    let users =
        composite::users_by_salary_and_task_status(&state.db, params.salary, &params.status)
            .await?;
    Ok(Json(users))
}

/// Projects with more than N iterations and at least one member
///
/// ```text
/// GET /v1/queries/projects-by-iterations-and-users?min_iterations=2
/// ```
pub async fn projects_by_iterations_and_users(
    State(state): State<AppState>,
    Query(params): Query<MinIterationsParams>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects =
        composite::projects_by_iterations_and_users(&state.db, params.min_iterations).await?;
    Ok(Json(projects))
}

/// Users executing at least one task of each of two statuses
///
/// ```text
/// GET /v1/queries/users-by-two-task-statuses?first_status=DONE&second_status=TODO
/// ```
pub async fn users_by_two_task_statuses(
    State(state): State<AppState>,
    Query(params): Query<TwoStatusesParams>,
) -> ApiResult<Json<Vec<User>>> {
    let users = composite::users_by_two_task_statuses(
        &state.db,
        &params.first_status,
        &params.second_status,
    )
    .await?;
    Ok(Json(users))
}

/// Projects with exactly N members and a task above a points threshold
///
/// ```text
/// GET /v1/queries/projects-by-users-and-task-points?users_count=1&points_threshold=5
/// ```
pub async fn projects_by_users_and_task_points(
    State(state): State<AppState>,
    Query(params): Query<UsersAndPointsParams>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = composite::projects_by_users_and_task_points(
        &state.db,
        params.users_count,
        params.points_threshold,
    )
    .await?;
    Ok(Json(projects))
}

/// Users who are members of every existing project
///
/// With zero projects the membership condition is vacuously true and
/// every user is returned.
///
/// ```text
/// GET /v1/queries/users-in-all-projects
/// ```
pub async fn users_in_all_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<User>>> {
    let users = composite::users_in_all_projects(&state.db).await?;
    Ok(Json(users))
}

/// Users sharing at least one project with the user resolved by email
///
/// ```text
/// GET /v1/queries/users-in-same-projects-by-email?email=a@x.com
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no user with that email
/// - `422 Unprocessable Entity`: malformed email
pub async fn users_in_same_projects_by_email(
    State(state): State<AppState>,
    Query(params): Query<EmailParams>,
) -> ApiResult<Json<Vec<User>>> {
    params.validate()?;

    let users = composite::users_in_same_projects_by_email(&state.db, &params.email).await?;
    Ok(Json(users))
}

/// Projects with at least one member at or above the reference user's
/// salary
///
/// ```text
/// GET /v1/queries/projects-by-salary-floor?email=a@x.com
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no user with that email
/// - `409 Conflict` (domain_error): the user has no salary row
/// - `422 Unprocessable Entity`: malformed email
pub async fn projects_by_salary_floor(
    State(state): State<AppState>,
    Query(params): Query<EmailParams>,
) -> ApiResult<Json<Vec<Project>>> {
    params.validate()?;

    let projects = composite::projects_by_salary_floor(&state.db, &params.email).await?;
    Ok(Json(projects))
}

/// Users not in any project the reference user is a member of
///
/// ```text
/// GET /v1/queries/users-not-in-any-project-of-user?username=alice
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no user with that username
pub async fn users_not_in_any_project_of_user(
    State(state): State<AppState>,
    Query(params): Query<UsernameParams>,
) -> ApiResult<Json<Vec<User>>> {
    params.validate()?;

    let users =
        composite::users_not_in_any_project_of_user(&state.db, &params.username).await?;
    Ok(Json(users))
}

/// Names of iterations whose task-id set equals the named iteration's
///
/// Always includes the named iteration itself.
///
/// ```text
/// GET /v1/queries/iterations-with-same-task-set?iteration_name=Sprint+1
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no iteration with that name
pub async fn iterations_with_same_task_set(
    State(state): State<AppState>,
    Query(params): Query<IterationNameParams>,
) -> ApiResult<Json<Vec<String>>> {
    params.validate()?;

    let names =
        composite::iterations_with_same_task_set(&state.db, &params.iteration_name).await?;
    Ok(Json(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_done() {
        let params: SalaryAndStatusParams =
            serde_urlencoded::from_str("salary=50").unwrap();
        assert_eq!(params.status, "DONE");
        assert_eq!(params.salary, 50.0);

        let params: SalaryAndStatusParams =
            serde_urlencoded::from_str("salary=50&status=TODO").unwrap();
        assert_eq!(params.status, "TODO");
    }

    #[test]
    fn test_email_params_validation() {
        let params = EmailParams {
            email: "not-an-email".to_string(),
        };
        assert!(params.validate().is_err());

        let params = EmailParams {
            email: "a@x.com".to_string(),
        };
        assert!(params.validate().is_ok());
    }
}
