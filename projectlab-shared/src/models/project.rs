/// Project model and database operations
///
/// Projects are owned by one user and related N-N to users via the
/// ProjectMember join table. A project is removed when its owner is
/// deleted; its iterations (and their tasks) follow.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     join_code VARCHAR(255) NOT NULL,
///     owner_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: i64,

    /// Project name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Code shared with users joining the project
    pub join_code: String,

    /// Owning user
    pub owner_id: i64,
}

/// Input for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub join_code: String,
    pub owner_id: i64,
}

/// Input for updating a project (full-row replace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: String,
    pub description: String,
    pub join_code: String,
    pub owner_id: i64,
}

impl Project {
    /// Creates a project
    ///
    /// # Errors
    ///
    /// Returns an error if the owner id doesn't exist (FK violation) or
    /// the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, join_code, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, join_code, owner_id
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.join_code)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, join_code, owner_id FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Updates a project (full-row replace)
    ///
    /// Returns None if the id doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $2, description = $3, join_code = $4, owner_id = $5
            WHERE id = $1
            RETURNING id, name, description, join_code, owner_id
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.join_code)
        .bind(data.owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project, returning it if the id existed
    ///
    /// Iterations, their tasks, and membership rows cascade.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            DELETE FROM projects
            WHERE id = $1
            RETURNING id, name, description, join_code, owner_id
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, join_code, owner_id FROM projects ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }
}
