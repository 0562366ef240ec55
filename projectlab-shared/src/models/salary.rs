/// Salary model and database operations
///
/// At most one salary row per user (unique user_id). The row is removed
/// when its user is deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE salaries (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
///     amount DOUBLE PRECISION NOT NULL CHECK (amount >= 0)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Salary row belonging to one user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Salary {
    /// Unique salary ID
    pub id: i64,

    /// Owning user (unique: at most one salary per user)
    pub user_id: i64,

    /// Amount, non-negative
    pub amount: f64,
}

/// Input for creating a salary row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSalary {
    pub user_id: i64,
    pub amount: f64,
}

/// Input for updating a salary row (full-row replace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSalary {
    pub user_id: i64,
    pub amount: f64,
}

impl Salary {
    /// Creates a salary row
    ///
    /// # Errors
    ///
    /// Returns an error if the user already has a salary (unique
    /// constraint), the user id doesn't exist (FK violation), or the
    /// database connection fails.
    pub async fn create(pool: &PgPool, data: CreateSalary) -> Result<Self, sqlx::Error> {
        let salary = sqlx::query_as::<_, Salary>(
            r#"
            INSERT INTO salaries (user_id, amount)
            VALUES ($1, $2)
            RETURNING id, user_id, amount
            "#,
        )
        .bind(data.user_id)
        .bind(data.amount)
        .fetch_one(pool)
        .await?;

        Ok(salary)
    }

    /// Finds the salary rows for a user (0 or 1 by construction)
    pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let salaries = sqlx::query_as::<_, Salary>(
            "SELECT id, user_id, amount FROM salaries WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(salaries)
    }

    /// Updates a salary row (full-row replace)
    ///
    /// Returns None if the id doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateSalary,
    ) -> Result<Option<Self>, sqlx::Error> {
        let salary = sqlx::query_as::<_, Salary>(
            r#"
            UPDATE salaries
            SET user_id = $2, amount = $3
            WHERE id = $1
            RETURNING id, user_id, amount
            "#,
        )
        .bind(id)
        .bind(data.user_id)
        .bind(data.amount)
        .fetch_optional(pool)
        .await?;

        Ok(salary)
    }

    /// Deletes a salary row, returning it if the id existed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let salary = sqlx::query_as::<_, Salary>(
            "DELETE FROM salaries WHERE id = $1 RETURNING id, user_id, amount",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(salary)
    }

    /// Lists all salary rows
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let salaries =
            sqlx::query_as::<_, Salary>("SELECT id, user_id, amount FROM salaries ORDER BY id")
                .fetch_all(pool)
                .await?;

        Ok(salaries)
    }
}
