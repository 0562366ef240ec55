/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing
/// user accounts. Users can belong to multiple projects via the
/// ProjectMember model and optionally carry one Salary row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(20) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL
/// );
/// ```
///
/// # Cascade
///
/// Deleting a user removes its salary, memberships, owned projects (and
/// transitively their iterations and tasks) and the tasks it created;
/// tasks where the user is only the executor get `executor_id` nulled.
/// All of this is declared on the schema's foreign keys, not implemented
/// here.
///
/// # Example
///
/// ```no_run
/// use projectlab_shared::models::user::{User, CreateUser};
/// use projectlab_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password: "hunter2hunter2".to_string(),
/// }).await?;
///
/// let found = User::find_by_email(&pool, "alice@example.com").await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User model representing a user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Display name (3-20 characters, enforced at the API boundary)
    pub username: String,

    /// Email address
    ///
    /// Must be unique across all users
    pub email: String,

    /// Password as supplied by the caller
    pub password: String,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub username: String,

    /// Email address (unique)
    pub email: String,

    /// Password
    pub password: String,
}

/// Input for updating an existing user
///
/// Full-row replace: every field is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name
    pub username: String,

    /// New email address
    pub email: String,

    /// New password
    pub password: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// Usernames are not unique at the store level; the lowest id wins
    /// when several users share one.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password
            FROM users
            WHERE username = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates an existing user (full-row replace)
    ///
    /// Returns the updated user if found, None if the id doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists for another user
    /// - Database connection fails
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, email = $3, password = $4
            WHERE id = $1
            RETURNING id, username, email, password
            "#,
        )
        .bind(id)
        .bind(data.username)
        .bind(data.email)
        .bind(data.password)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID, triggering the cascade described in the
    /// module docs
    ///
    /// Returns the deleted user if found, None if the id doesn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = $1 RETURNING id, username, email, password",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            username: "alice".to_string(),
            email: "test@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };

        assert_eq!(create_user.username, "alice");
        assert_eq!(create_user.email, "test@example.com");
    }

    #[test]
    fn test_user_serializes_all_fields() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "test@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["email"], "test@example.com");
    }

    // Integration tests for database operations are in projectlab-api/tests/
}
