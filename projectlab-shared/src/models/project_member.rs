/// ProjectMember model and database operations
///
/// Join rows for the N-N relationship between users and projects.
/// (user_id, project_id) is intended unique but not enforced at the
/// store level; queries over this table tolerate duplicates.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE project_members (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Membership join row between one user and one project
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMember {
    /// Unique membership ID
    pub id: i64,

    /// Member user
    pub user_id: i64,

    /// Joined project
    pub project_id: i64,
}

/// Input for creating a membership row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectMember {
    pub user_id: i64,
    pub project_id: i64,
}

/// Input for updating a membership row (full-row replace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProjectMember {
    pub user_id: i64,
    pub project_id: i64,
}

impl ProjectMember {
    /// Creates a membership row
    ///
    /// # Errors
    ///
    /// Returns an error if either referenced id doesn't exist (FK
    /// violation) or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateProjectMember) -> Result<Self, sqlx::Error> {
        let member = sqlx::query_as::<_, ProjectMember>(
            r#"
            INSERT INTO project_members (user_id, project_id)
            VALUES ($1, $2)
            RETURNING id, user_id, project_id
            "#,
        )
        .bind(data.user_id)
        .bind(data.project_id)
        .fetch_one(pool)
        .await?;

        Ok(member)
    }

    /// Updates a membership row (full-row replace)
    ///
    /// Returns None if the id doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateProjectMember,
    ) -> Result<Option<Self>, sqlx::Error> {
        let member = sqlx::query_as::<_, ProjectMember>(
            r#"
            UPDATE project_members
            SET user_id = $2, project_id = $3
            WHERE id = $1
            RETURNING id, user_id, project_id
            "#,
        )
        .bind(id)
        .bind(data.user_id)
        .bind(data.project_id)
        .fetch_optional(pool)
        .await?;

        Ok(member)
    }

    /// Deletes a membership row, returning it if the id existed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let member = sqlx::query_as::<_, ProjectMember>(
            "DELETE FROM project_members WHERE id = $1 RETURNING id, user_id, project_id",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(member)
    }

    /// Lists all membership rows
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let members = sqlx::query_as::<_, ProjectMember>(
            "SELECT id, user_id, project_id FROM project_members ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(members)
    }
}
