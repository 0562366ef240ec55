/// Single-hop point lookups
///
/// Lookups that cross exactly one relationship: tasks of a project (via
/// its iterations), members of a project, a user's salary, a user's
/// assigned tasks, and a project's owner. Only the owner lookup can fail
/// with NotFound; the listing lookups return the empty collection for an
/// unknown id.

use sqlx::PgPool;

use crate::models::{project::Project, salary::Salary, task::Task, user::User};
use crate::queries::QueryError;

/// Tasks whose iteration belongs to the given project
///
/// Empty when the project has no iterations, no tasks, or does not exist.
pub async fn tasks_by_project(pool: &PgPool, project_id: i64) -> Result<Vec<Task>, QueryError> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT t.id, t.iteration_id, t.points, t.title, t.description,
               t.status, t.creator_id, t.executor_id
        FROM tasks t
        JOIN iterations i ON i.id = t.iteration_id
        WHERE i.project_id = $1
        ORDER BY t.id
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Users with a membership row for the given project
///
/// Distinct even when duplicate membership rows exist; empty for a
/// project with no memberships.
pub async fn users_by_project(pool: &PgPool, project_id: i64) -> Result<Vec<User>, QueryError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT DISTINCT u.id, u.username, u.email, u.password
        FROM users u
        JOIN project_members pm ON pm.user_id = u.id
        WHERE pm.project_id = $1
        ORDER BY u.id
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Salary rows for the given user (0 or 1 by construction)
pub async fn salaries_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Salary>, QueryError> {
    let salaries = Salary::find_by_user(pool, user_id).await?;
    Ok(salaries)
}

/// Tasks where the given user is the executor
pub async fn tasks_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Task>, QueryError> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, iteration_id, points, title, description, status, creator_id, executor_id
        FROM tasks
        WHERE executor_id = $1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// The user owning the given project
///
/// Fails with NotFound when the project id does not exist. With the
/// cascade strategy in the schema a project cannot outlive its owner, so
/// a dangling owner_id is also reported as NotFound rather than null.
pub async fn owner_by_project(pool: &PgPool, project_id: i64) -> Result<User, QueryError> {
    let project = Project::find_by_id(pool, project_id)
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("project {}", project_id)))?;

    let owner = User::find_by_id(pool, project.owner_id)
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("owner of project {}", project_id)))?;

    Ok(owner)
}
