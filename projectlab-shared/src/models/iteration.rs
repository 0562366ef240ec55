/// Iteration model and database operations
///
/// Iterations belong to one project and hold N tasks. Removed when their
/// project is deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE iterations (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Iteration model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Iteration {
    /// Unique iteration ID
    pub id: i64,

    /// Iteration name (not unique at the store level)
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Owning project
    pub project_id: i64,
}

/// Input for creating an iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIteration {
    pub name: String,
    pub description: String,
    pub project_id: i64,
}

/// Input for updating an iteration (full-row replace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateIteration {
    pub name: String,
    pub description: String,
    pub project_id: i64,
}

impl Iteration {
    /// Creates an iteration
    ///
    /// # Errors
    ///
    /// Returns an error if the project id doesn't exist (FK violation) or
    /// the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateIteration) -> Result<Self, sqlx::Error> {
        let iteration = sqlx::query_as::<_, Iteration>(
            r#"
            INSERT INTO iterations (name, description, project_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, project_id
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.project_id)
        .fetch_one(pool)
        .await?;

        Ok(iteration)
    }

    /// Finds an iteration by name
    ///
    /// Names are not unique at the store level; the lowest id wins when
    /// several iterations share one.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let iteration = sqlx::query_as::<_, Iteration>(
            r#"
            SELECT id, name, description, project_id
            FROM iterations
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(iteration)
    }

    /// Updates an iteration (full-row replace)
    ///
    /// Returns None if the id doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateIteration,
    ) -> Result<Option<Self>, sqlx::Error> {
        let iteration = sqlx::query_as::<_, Iteration>(
            r#"
            UPDATE iterations
            SET name = $2, description = $3, project_id = $4
            WHERE id = $1
            RETURNING id, name, description, project_id
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.project_id)
        .fetch_optional(pool)
        .await?;

        Ok(iteration)
    }

    /// Deletes an iteration, returning it if the id existed
    ///
    /// The iteration's tasks cascade.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let iteration = sqlx::query_as::<_, Iteration>(
            r#"
            DELETE FROM iterations
            WHERE id = $1
            RETURNING id, name, description, project_id
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(iteration)
    }

    /// Lists all iterations
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let iterations = sqlx::query_as::<_, Iteration>(
            "SELECT id, name, description, project_id FROM iterations ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(iterations)
    }
}
