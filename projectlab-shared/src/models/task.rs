/// Task model and database operations
///
/// Tasks belong to one iteration and carry two distinct user references:
/// the creator and an optional executor. `status` is an uncontrolled
/// string compared by equality (observed values TODO / IN_PROGRESS /
/// DONE); no enum is enforced at the data layer.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     iteration_id BIGINT NOT NULL REFERENCES iterations(id) ON DELETE CASCADE,
///     points INTEGER NOT NULL,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     status VARCHAR(64) NOT NULL,
///     creator_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     executor_id BIGINT REFERENCES users(id) ON DELETE SET NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Owning iteration
    pub iteration_id: i64,

    /// Story points
    pub points: i32,

    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Free-form status string compared by equality
    pub status: String,

    /// User who created the task
    pub creator_id: i64,

    /// User assigned to execute the task; nulled when that user is
    /// deleted
    pub executor_id: Option<i64>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub iteration_id: i64,
    pub points: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub creator_id: i64,
    pub executor_id: Option<i64>,
}

/// Input for updating a task (full-row replace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub iteration_id: i64,
    pub points: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub creator_id: i64,
    pub executor_id: Option<i64>,
}

impl Task {
    /// Creates a task
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced id doesn't exist (FK violation)
    /// or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (iteration_id, points, title, description, status, creator_id, executor_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, iteration_id, points, title, description, status, creator_id, executor_id
            "#,
        )
        .bind(data.iteration_id)
        .bind(data.points)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.creator_id)
        .bind(data.executor_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Updates a task (full-row replace)
    ///
    /// Returns None if the id doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET iteration_id = $2, points = $3, title = $4, description = $5,
                status = $6, creator_id = $7, executor_id = $8
            WHERE id = $1
            RETURNING id, iteration_id, points, title, description, status, creator_id, executor_id
            "#,
        )
        .bind(id)
        .bind(data.iteration_id)
        .bind(data.points)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.creator_id)
        .bind(data.executor_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, returning it if the id existed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            RETURNING id, iteration_id, points, title, description, status, creator_id, executor_id
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, iteration_id, points, title, description, status, creator_id, executor_id
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }
}
