/// Multi-hop set-composition queries
///
/// Each operation here is a relational-algebra expression spanning
/// several tables, pushed down to the store as one SQL statement instead
/// of fetching whole tables and intersecting id sets in memory. The
/// single-statement form also means every query sees one consistent
/// snapshot of the data.
///
/// Operations taking an email, username, or iteration name first resolve
/// that reference entity and fail with NotFound when it doesn't resolve;
/// the result statement itself then runs against the resolved id.

use sqlx::PgPool;

use crate::models::{iteration::Iteration, project::Project, user::User};
use crate::queries::QueryError;

/// Users with salary.amount strictly greater than `salary` AND at least
/// one task of the given status as executor
///
/// Users without a salary row never qualify.
pub async fn users_by_salary_and_task_status(
    pool: &PgPool,
    salary: f64,
    status: &str,
) -> Result<Vec<User>, QueryError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password
        FROM users u
        JOIN salaries s ON s.user_id = u.id
        WHERE s.amount > $1
          AND EXISTS (
              SELECT 1 FROM tasks t
              WHERE t.executor_id = u.id AND t.status = $2
          )
        ORDER BY u.id
        "#,
    )
    .bind(salary)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Projects with strictly more than `min_iterations` iterations AND at
/// least one membership row
pub async fn projects_by_iterations_and_users(
    pool: &PgPool,
    min_iterations: i64,
) -> Result<Vec<Project>, QueryError> {
    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT p.id, p.name, p.description, p.join_code, p.owner_id
        FROM projects p
        WHERE (SELECT COUNT(*) FROM iterations i WHERE i.project_id = p.id) > $1
          AND EXISTS (SELECT 1 FROM project_members pm WHERE pm.project_id = p.id)
        ORDER BY p.id
        "#,
    )
    .bind(min_iterations)
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// Users who execute at least one task of `first_status` AND at least one
/// task of `second_status`
///
/// Equal statuses reduce to "users with at least one task of that
/// status".
pub async fn users_by_two_task_statuses(
    pool: &PgPool,
    first_status: &str,
    second_status: &str,
) -> Result<Vec<User>, QueryError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password
        FROM users u
        WHERE EXISTS (
                SELECT 1 FROM tasks t
                WHERE t.executor_id = u.id AND t.status = $1
              )
          AND EXISTS (
                SELECT 1 FROM tasks t
                WHERE t.executor_id = u.id AND t.status = $2
              )
        ORDER BY u.id
        "#,
    )
    .bind(first_status)
    .bind(second_status)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Projects with exactly `users_count` membership rows AND at least one
/// task (via the project's iterations) with points strictly greater than
/// `points_threshold`
///
/// Duplicate membership rows count individually, matching the row-count
/// semantics of the join table.
pub async fn projects_by_users_and_task_points(
    pool: &PgPool,
    users_count: i64,
    points_threshold: i32,
) -> Result<Vec<Project>, QueryError> {
    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT p.id, p.name, p.description, p.join_code, p.owner_id
        FROM projects p
        WHERE (SELECT COUNT(*) FROM project_members pm WHERE pm.project_id = p.id) = $1
          AND EXISTS (
              SELECT 1
              FROM tasks t
              JOIN iterations i ON i.id = t.iteration_id
              WHERE i.project_id = p.id AND t.points > $2
          )
        ORDER BY p.id
        "#,
    )
    .bind(users_count)
    .bind(points_threshold)
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// Users who are members of every existing project
///
/// Expressed as a double NOT EXISTS: no project may exist that the user
/// is not a member of. With zero projects the condition is vacuously true
/// and every user qualifies; that edge case is deliberate.
pub async fn users_in_all_projects(pool: &PgPool) -> Result<Vec<User>, QueryError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password
        FROM users u
        WHERE NOT EXISTS (
            SELECT 1 FROM projects p
            WHERE NOT EXISTS (
                SELECT 1 FROM project_members pm
                WHERE pm.user_id = u.id AND pm.project_id = p.id
            )
        )
        ORDER BY u.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Users sharing at least one project membership with the user resolved
/// by email
///
/// Includes the reference user itself whenever it has any membership,
/// since its own projects are in the candidate set. Fails with NotFound
/// when the email resolves to no user.
pub async fn users_in_same_projects_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Vec<User>, QueryError> {
    let reference = User::find_by_email(pool, email)
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("user with email {}", email)))?;

    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT DISTINCT u.id, u.username, u.email, u.password
        FROM users u
        JOIN project_members pm ON pm.user_id = u.id
        WHERE pm.project_id IN (
            SELECT project_id FROM project_members WHERE user_id = $1
        )
        ORDER BY u.id
        "#,
    )
    .bind(reference.id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Projects with at least one member whose salary.amount is greater than
/// or equal to the reference user's salary
///
/// The reference user is resolved by email (NotFound when absent) and
/// must carry a salary row (domain error otherwise). Note the "at least
/// one member" semantics: the original feature was described as "every
/// member above the floor" but shipped as an any-member filter, and that
/// observed behavior is kept as-is.
pub async fn projects_by_salary_floor(
    pool: &PgPool,
    email: &str,
) -> Result<Vec<Project>, QueryError> {
    let reference = User::find_by_email(pool, email)
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("user with email {}", email)))?;

    let salaries = crate::models::salary::Salary::find_by_user(pool, reference.id).await?;
    let floor = salaries
        .first()
        .map(|s| s.amount)
        .ok_or_else(|| QueryError::Domain(format!("user {} has no salary row", email)))?;

    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT p.id, p.name, p.description, p.join_code, p.owner_id
        FROM projects p
        WHERE EXISTS (
            SELECT 1
            FROM project_members pm
            JOIN salaries s ON s.user_id = pm.user_id
            WHERE pm.project_id = p.id AND s.amount >= $1
        )
        ORDER BY p.id
        "#,
    )
    .bind(floor)
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// Users who are not a member of any project the reference user (resolved
/// by username) is a member of
///
/// A reference user with no memberships excludes nothing, so every user
/// is returned, the reference included. Fails with NotFound when the
/// username resolves to no user.
pub async fn users_not_in_any_project_of_user(
    pool: &PgPool,
    username: &str,
) -> Result<Vec<User>, QueryError> {
    let reference = User::find_by_username(pool, username)
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("user with username {}", username)))?;

    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password
        FROM users u
        WHERE NOT EXISTS (
            SELECT 1 FROM project_members pm
            WHERE pm.user_id = u.id
              AND pm.project_id IN (
                  SELECT project_id FROM project_members WHERE user_id = $1
              )
        )
        ORDER BY u.id
        "#,
    )
    .bind(reference.id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Names of all iterations whose exact task-id set equals that of the
/// iteration carrying the given name
///
/// Set equality is by sorted task-id list, not by task content, so two
/// empty iterations compare equal. Always includes the reference
/// iteration's own name. Fails with NotFound when no iteration carries
/// the name; when several do, the lowest id is the reference.
pub async fn iterations_with_same_task_set(
    pool: &PgPool,
    iteration_name: &str,
) -> Result<Vec<String>, QueryError> {
    let reference = Iteration::find_by_name(pool, iteration_name)
        .await?
        .ok_or_else(|| QueryError::NotFound(format!("iteration named {}", iteration_name)))?;

    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT i.name
        FROM iterations i
        WHERE ARRAY(SELECT t.id FROM tasks t WHERE t.iteration_id = i.id ORDER BY t.id)
            = ARRAY(SELECT t.id FROM tasks t WHERE t.iteration_id = $1 ORDER BY t.id)
        ORDER BY i.id
        "#,
    )
    .bind(reference.id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}
